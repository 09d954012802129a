use std::collections::BTreeMap;

use common_enums::{CaptureMethod, Currency};
use common_utils::{types::Money, MinorUnit};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    authorization::AuthorizationReference, payment_method_data::PaymentInstrument, utils,
    utils::Error,
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<Secret<String>>,
    pub address1: Option<Secret<String>>,
    pub address2: Option<Secret<String>>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<String>,
    pub phone: Option<Secret<String>>,
}

/// Caller supplied settings that shape a single operation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationOptions {
    pub order_id: Option<String>,
    pub currency: Option<Currency>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub description: Option<String>,
    #[serde(default)]
    pub apply_3d_secure: bool,
    pub merchant_return_url: Option<String>,
    pub terminal_id: Option<String>,
    /// Processor specific extension data, passed through where the processor accepts it
    #[serde(default)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl OperationOptions {
    pub fn get_order_id(&self) -> Result<String, Error> {
        self.order_id
            .clone()
            .ok_or_else(utils::missing_field_err("order_id"))
    }

    pub fn get_merchant_return_url(&self) -> Result<String, Error> {
        self.merchant_return_url
            .clone()
            .ok_or_else(utils::missing_field_err("merchant_return_url"))
    }

    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.get(key)
    }
}

/// Request data for purchase and authorize, distinguished by `capture_method`
#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub amount: MinorUnit,
    pub currency: Currency,
    pub payment_method_data: PaymentInstrument,
    pub capture_method: CaptureMethod,
    pub options: OperationOptions,
}

impl PaymentsAuthorizeData {
    pub fn new(
        money: Money,
        payment_method_data: PaymentInstrument,
        capture_method: CaptureMethod,
        options: OperationOptions,
    ) -> Self {
        Self {
            amount: money.amount,
            currency: money.currency,
            payment_method_data,
            capture_method,
            options,
        }
    }

    pub fn is_auto_capture(&self) -> bool {
        self.capture_method == CaptureMethod::Automatic
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsCaptureData {
    pub amount_to_capture: MinorUnit,
    /// Explicit option first, then the currency recorded in the token
    pub currency: Option<Currency>,
    pub reference: AuthorizationReference,
    pub options: OperationOptions,
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    /// `None` refunds the full captured amount
    pub refund_amount: Option<MinorUnit>,
    pub currency: Option<Currency>,
    pub reference: AuthorizationReference,
    pub options: OperationOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub currency: Option<Currency>,
    pub reference: AuthorizationReference,
    pub options: OperationOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentMethodTokenizationData {
    pub payment_method_data: PaymentInstrument,
    pub currency: Currency,
    pub options: OperationOptions,
}

#[derive(Debug, Clone)]
pub struct PaymentsVerifyData {
    pub payment_method_data: PaymentInstrument,
    pub currency: Currency,
    pub options: OperationOptions,
}

/// Request data that points at an earlier transaction
pub trait ReferencedTransaction {
    fn reference(&self) -> &AuthorizationReference;
    fn requested_amount(&self) -> Option<MinorUnit>;
}

impl ReferencedTransaction for PaymentsCaptureData {
    fn reference(&self) -> &AuthorizationReference {
        &self.reference
    }

    fn requested_amount(&self) -> Option<MinorUnit> {
        Some(self.amount_to_capture)
    }
}

impl ReferencedTransaction for RefundsData {
    fn reference(&self) -> &AuthorizationReference {
        &self.reference
    }

    fn requested_amount(&self) -> Option<MinorUnit> {
        self.refund_amount
    }
}

impl ReferencedTransaction for PaymentVoidData {
    fn reference(&self) -> &AuthorizationReference {
        &self.reference
    }

    fn requested_amount(&self) -> Option<MinorUnit> {
        None
    }
}
