use common_enums::{AttemptStatus, Currency};
use common_utils::{
    consts,
    crypto::{self, HmacSha256},
    date_time,
    errors::CustomResult,
    types::FloatMajorUnit,
};
use domain_types::{
    authorization::{AuthorizationReference, LegacyLayout},
    connector_flow::{FlowMarker, FlowName},
    errors,
    payment_method_data::{Card, PaymentInstrument, StoredToken},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{
        Address, OperationOptions, PaymentMethodTokenizationData, PaymentVoidData,
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsVerifyData, RefundsData,
    },
    router_response_types::{ProcessorReply, ReplyVerdict},
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::api::ConnectorCommon;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CommerceHubRouterData;
use crate::{
    types::ResponseRouterData,
    utils::{self, RequestCurrency},
};

type Error = error_stack::Report<errors::ConnectorError>;

const DEFAULT_TOKEN_SOURCE: &str = "TRANSARMOR";

pub struct CommerceHubAuthType {
    pub(super) api_key: Secret<String>,
    pub(super) api_secret: Secret<String>,
    pub(super) merchant_id: Secret<String>,
    pub(super) terminal_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for CommerceHubAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::MultiAuthKey {
                api_key,
                key1,
                api_secret,
                key2,
            } => Ok(Self {
                api_key: api_key.to_owned(),
                api_secret: api_secret.to_owned(),
                merchant_id: key1.to_owned(),
                terminal_id: key2.to_owned(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

impl CommerceHubAuthType {
    pub fn generate_client_request_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn generate_timestamp() -> String {
        date_time::now_unix_timestamp_millis().to_string()
    }

    /// Base64 HMAC-SHA256 over `api_key + client_request_id + timestamp + body`, keyed
    /// with the api secret
    pub fn generate_hmac_signature(
        &self,
        client_request_id: &str,
        timestamp: &str,
        request_body: &str,
    ) -> CustomResult<String, errors::ConnectorError> {
        let raw_signature = format!(
            "{}{client_request_id}{timestamp}{request_body}",
            self.api_key.peek()
        );
        crypto::sign_base64(
            &HmacSha256,
            self.api_secret.peek().as_bytes(),
            raw_signature.as_bytes(),
        )
        .change_context(errors::ConnectorError::RequestEncodingFailed)
        .attach_printable("Failed to sign CommerceHub request")
    }
}

#[derive(Debug, Serialize)]
pub struct Amount {
    pub total: FloatMajorUnit,
    pub currency: Currency,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityCodeIndicator {
    Provided,
    NotProvided,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    card_data: cards::CardNumber,
    expiration_month: Secret<String>,
    expiration_year: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_code: Option<Secret<String>>,
    security_code_indicator: SecurityCodeIndicator,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCardExpiry {
    expiration_month: Secret<String>,
    expiration_year: Secret<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "sourceType")]
pub enum Source {
    PaymentCard {
        card: CardData,
    },
    #[serde(rename_all = "camelCase")]
    PaymentToken {
        token_data: Secret<String>,
        token_source: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        card: Option<TokenCardExpiry>,
    },
}

impl TryFrom<&Card> for Source {
    type Error = Error;
    fn try_from(card: &Card) -> Result<Self, Self::Error> {
        let security_code = Some(card.card_cvc.clone()).filter(|cvc| !cvc.peek().is_empty());
        let security_code_indicator = match security_code {
            Some(_) => SecurityCodeIndicator::Provided,
            None => SecurityCodeIndicator::NotProvided,
        };
        Ok(Self::PaymentCard {
            card: CardData {
                card_data: card.card_number.clone(),
                expiration_month: card.get_expiry_month_2_digit()?,
                expiration_year: card.get_expiry_year_4_digit()?,
                security_code,
                security_code_indicator,
            },
        })
    }
}

impl Source {
    fn from_instrument(
        instrument: &PaymentInstrument,
        options: &OperationOptions,
    ) -> Result<Self, Error> {
        match instrument {
            PaymentInstrument::Card(card) => Self::try_from(card),
            PaymentInstrument::StoredToken(stored) => Self::from_stored_token(stored, options),
        }
    }

    /// Tokens returned by store are versioned authorization tokens around the raw
    /// token data; plain token data is sent as given.
    fn from_stored_token(stored: &StoredToken, options: &OperationOptions) -> Result<Self, Error> {
        let reference = AuthorizationReference::decode(stored.token.peek(), LegacyLayout::single())?;
        let token_data = utils::get_connector_transaction_id(&reference)
            .change_context(errors::ConnectorError::MissingRequiredField {
                field_name: "payment_method_data.token",
            })?;
        let card = stored
            .token_exp_month
            .clone()
            .zip(stored.token_exp_year.clone())
            .map(|(expiration_month, expiration_year)| TokenCardExpiry {
                expiration_month,
                expiration_year,
            });
        Ok(Self::PaymentToken {
            token_data: Secret::new(token_data),
            token_source: utils::get_extension_string(options, "token_source")
                .unwrap_or_else(|| DEFAULT_TOKEN_SOURCE.to_string()),
            card,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryTransactionType {
    AuthOnly,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    capture_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    create_token: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_transaction_type: Option<PrimaryTransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_verification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_invoice_number: Option<String>,
}

impl TransactionDetails {
    fn for_options(options: &OperationOptions) -> Self {
        Self {
            merchant_order_id: options.order_id.clone(),
            merchant_invoice_number: utils::get_extension_string(
                options,
                "merchant_invoice_number",
            ),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionOrigin {
    Ecom,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EciIndicator {
    ChannelEncrypted,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosConditionCode {
    CardNotPresentEcom,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInteraction {
    origin: TransactionOrigin,
    eci_indicator: EciIndicator,
    pos_condition_code: PosConditionCode,
}

impl Default for TransactionInteraction {
    fn default() -> Self {
        Self {
            origin: TransactionOrigin::Ecom,
            eci_indicator: EciIndicator::ChannelEncrypted,
            pos_condition_code: PosConditionCode::CardNotPresentEcom,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDetails {
    terminal_id: Secret<String>,
    merchant_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for MerchantDetails {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        let auth = CommerceHubAuthType::try_from(auth_type)?;
        Ok(Self {
            terminal_id: auth.terminal_id,
            merchant_id: auth.merchant_id,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    house_number_or_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_name_or_address: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state_or_province: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    phone_number: Secret<String>,
}

#[derive(Debug, Serialize)]
pub struct CommerceHubAddress {
    address: StreetAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<Phone>,
}

impl From<&Address> for CommerceHubAddress {
    fn from(address: &Address) -> Self {
        Self {
            address: StreetAddress {
                street: address.address1.clone(),
                house_number_or_name: address.address2.clone(),
                recipient_name_or_address: address.name.clone(),
                city: address.city.clone(),
                state_or_province: address.state.clone(),
                postal_code: address.zip.clone(),
                country: address.country.clone(),
            },
            phone: address.phone.clone().map(|phone_number| Phone { phone_number }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceTransactionType {
    Charges,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceTransactionDetails {
    reference_transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_transaction_type: Option<ReferenceTransactionType>,
}

/// Purchase and authorize, told apart by `captureFlag`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubPaymentsRequest {
    amount: Amount,
    source: Source,
    transaction_details: TransactionDetails,
    transaction_interaction: TransactionInteraction,
    merchant_details: MerchantDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_address: Option<CommerceHubAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_address: Option<CommerceHubAddress>,
}

impl<'a, F> TryFrom<CommerceHubRouterData<'a, RouterDataV2<F, PaymentsAuthorizeData>>>
    for CommerceHubPaymentsRequest
{
    type Error = Error;
    fn try_from(
        item: CommerceHubRouterData<'a, RouterDataV2<F, PaymentsAuthorizeData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let options = &request.options;
        Ok(Self {
            amount: Amount {
                total: item
                    .connector
                    .convert_amount(request.amount, request.currency)?,
                currency: request.currency,
            },
            source: Source::from_instrument(&request.payment_method_data, options)?,
            transaction_details: TransactionDetails {
                capture_flag: Some(request.is_auto_capture()),
                ..TransactionDetails::for_options(options)
            },
            transaction_interaction: TransactionInteraction::default(),
            merchant_details: MerchantDetails::try_from(&item.router_data.connector_auth_type)?,
            billing_address: options.billing_address.as_ref().map(CommerceHubAddress::from),
            shipping_address: options
                .shipping_address
                .as_ref()
                .map(CommerceHubAddress::from),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubCaptureRequest {
    amount: Amount,
    transaction_details: TransactionDetails,
    merchant_details: MerchantDetails,
    reference_transaction_details: ReferenceTransactionDetails,
}

impl<'a, F> TryFrom<CommerceHubRouterData<'a, RouterDataV2<F, PaymentsCaptureData>>>
    for CommerceHubCaptureRequest
{
    type Error = Error;
    fn try_from(
        item: CommerceHubRouterData<'a, RouterDataV2<F, PaymentsCaptureData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let currency = request
            .currency
            .unwrap_or_else(|| item.connector.default_currency());
        Ok(Self {
            amount: Amount {
                total: item
                    .connector
                    .convert_amount(request.amount_to_capture, currency)?,
                currency,
            },
            transaction_details: TransactionDetails {
                capture_flag: Some(true),
                ..TransactionDetails::for_options(&request.options)
            },
            merchant_details: MerchantDetails::try_from(&item.router_data.connector_auth_type)?,
            reference_transaction_details: ReferenceTransactionDetails {
                reference_transaction_id: utils::get_connector_transaction_id(&request.reference)?,
                reference_transaction_type: None,
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubVoidRequest {
    transaction_details: TransactionDetails,
    merchant_details: MerchantDetails,
    reference_transaction_details: ReferenceTransactionDetails,
}

impl<'a, F> TryFrom<CommerceHubRouterData<'a, RouterDataV2<F, PaymentVoidData>>>
    for CommerceHubVoidRequest
{
    type Error = Error;
    fn try_from(
        item: CommerceHubRouterData<'a, RouterDataV2<F, PaymentVoidData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        Ok(Self {
            transaction_details: TransactionDetails::for_options(&request.options),
            merchant_details: MerchantDetails::try_from(&item.router_data.connector_auth_type)?,
            reference_transaction_details: ReferenceTransactionDetails {
                reference_transaction_id: utils::get_connector_transaction_id(&request.reference)?,
                reference_transaction_type: Some(ReferenceTransactionType::Charges),
            },
        })
    }
}

/// A refund without an amount refunds everything captured
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubRefundRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Amount>,
    transaction_details: TransactionDetails,
    merchant_details: MerchantDetails,
    reference_transaction_details: ReferenceTransactionDetails,
}

impl<'a, F> TryFrom<CommerceHubRouterData<'a, RouterDataV2<F, RefundsData>>>
    for CommerceHubRefundRequest
{
    type Error = Error;
    fn try_from(
        item: CommerceHubRouterData<'a, RouterDataV2<F, RefundsData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let currency = request
            .currency
            .unwrap_or_else(|| item.connector.default_currency());
        let amount = request
            .refund_amount
            .map(|refund_amount| {
                item.connector
                    .convert_amount(refund_amount, currency)
                    .map(|total| Amount { total, currency })
            })
            .transpose()?;
        Ok(Self {
            amount,
            transaction_details: TransactionDetails::for_options(&request.options),
            merchant_details: MerchantDetails::try_from(&item.router_data.connector_auth_type)?,
            reference_transaction_details: ReferenceTransactionDetails {
                reference_transaction_id: utils::get_connector_transaction_id(&request.reference)?,
                reference_transaction_type: Some(ReferenceTransactionType::Charges),
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubTokenRequest {
    source: Source,
    transaction_details: TransactionDetails,
    merchant_details: MerchantDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_address: Option<CommerceHubAddress>,
}

impl<'a, F> TryFrom<CommerceHubRouterData<'a, RouterDataV2<F, PaymentMethodTokenizationData>>>
    for CommerceHubTokenRequest
{
    type Error = Error;
    fn try_from(
        item: CommerceHubRouterData<'a, RouterDataV2<F, PaymentMethodTokenizationData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        Ok(Self {
            source: Source::from_instrument(&request.payment_method_data, &request.options)?,
            transaction_details: TransactionDetails {
                create_token: Some(true),
                ..TransactionDetails::for_options(&request.options)
            },
            merchant_details: MerchantDetails::try_from(&item.router_data.connector_auth_type)?,
            billing_address: request
                .options
                .billing_address
                .as_ref()
                .map(CommerceHubAddress::from),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubVerifyRequest {
    source: Source,
    transaction_details: TransactionDetails,
    transaction_interaction: TransactionInteraction,
    merchant_details: MerchantDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_address: Option<CommerceHubAddress>,
}

impl<'a, F> TryFrom<CommerceHubRouterData<'a, RouterDataV2<F, PaymentsVerifyData>>>
    for CommerceHubVerifyRequest
{
    type Error = Error;
    fn try_from(
        item: CommerceHubRouterData<'a, RouterDataV2<F, PaymentsVerifyData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        Ok(Self {
            source: Source::from_instrument(&request.payment_method_data, &request.options)?,
            transaction_details: TransactionDetails {
                capture_flag: Some(false),
                primary_transaction_type: Some(PrimaryTransactionType::AuthOnly),
                account_verification: Some(true),
                ..TransactionDetails::for_options(&request.options)
            },
            transaction_interaction: TransactionInteraction::default(),
            merchant_details: MerchantDetails::try_from(&item.router_data.connector_auth_type)?,
            billing_address: request
                .options
                .billing_address
                .as_ref()
                .map(CommerceHubAddress::from),
        })
    }
}

// Response types keep every field they do not name in `additional_fields`, so the
// parameter map handed back to callers is the full reply.

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Authorized,
    Captured,
    Declined,
    Rejected,
    Failed,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Approved,
    Declined,
    ProcessingFailed,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProcessingDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_state: Option<TransactionState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_processing_details: Option<TransactionProcessingDetails>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorResponseDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_message: Option<String>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_response_details: Option<ProcessorResponseDetails>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentToken {
    pub token_data: String,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommerceHubErrorDetails {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceHubPaymentsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_response: Option<GatewayResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_receipt: Option<PaymentReceipt>,
    /// Token replies carry the processor details at the top level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_response_details: Option<ProcessorResponseDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_tokens: Option<Vec<PaymentToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<CommerceHubErrorDetails>>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

/// Error replies share the payment reply's shape
pub type CommerceHubErrorResponse = CommerceHubPaymentsResponse;

impl CommerceHubPaymentsResponse {
    fn first_error(&self) -> Option<&CommerceHubErrorDetails> {
        self.error.as_ref().and_then(|errors| errors.first())
    }

    fn processor_details(&self) -> Option<&ProcessorResponseDetails> {
        self.payment_receipt
            .as_ref()
            .and_then(|receipt| receipt.processor_response_details.as_ref())
            .or(self.processor_response_details.as_ref())
    }

    fn transaction_state(&self) -> Option<&TransactionState> {
        self.gateway_response
            .as_ref()
            .and_then(|response| response.transaction_state.as_ref())
    }

    fn transaction_id(&self) -> Option<&str> {
        self.gateway_response
            .as_ref()
            .and_then(|response| response.transaction_processing_details.as_ref())
            .and_then(|details| details.transaction_id.as_deref())
    }

    fn is_approved(&self) -> bool {
        let state_accepted = matches!(
            self.transaction_state(),
            Some(TransactionState::Authorized | TransactionState::Captured)
        );
        let approved = matches!(
            self.processor_details()
                .and_then(|details| details.approval_status.as_ref()),
            Some(ApprovalStatus::Approved)
        );
        self.first_error().is_none() && state_accepted && approved
    }

    fn first_token(&self) -> Option<&str> {
        self.payment_tokens
            .as_ref()
            .and_then(|tokens| tokens.first())
            .map(|token| token.token_data.as_str())
    }
}

impl CommerceHubErrorDetails {
    fn code(&self) -> String {
        self.error_type
            .clone()
            .or_else(|| self.code.clone())
            .unwrap_or_else(|| consts::NO_ERROR_CODE.to_string())
    }

    fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string())
    }

    /// The gateway reports refused API keys with an HTTP status as the error code.
    fn refuses_credentials(&self) -> bool {
        matches!(self.code.as_deref(), Some("401" | "403"))
    }
}

impl<'a, F, Req> TryFrom<ResponseRouterData<'a, CommerceHubPaymentsResponse, RouterDataV2<F, Req>>>
    for ProcessorReply
where
    F: FlowMarker,
    Req: RequestCurrency,
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<'a, CommerceHubPaymentsResponse, RouterDataV2<F, Req>>,
    ) -> Result<Self, Self::Error> {
        let response = &item.response;
        let params = utils::to_response_params(response)?;

        if let Some(error) = response.first_error() {
            let verdict = if error.refuses_credentials() {
                ReplyVerdict::CredentialsRejected
            } else {
                ReplyVerdict::Error
            };
            return Ok(Self::rejected(
                verdict,
                utils::refused_status(F::NAME),
                error.message(),
                Some(error.code()),
                params,
            ));
        }

        if !response.is_approved() {
            let details = response.processor_details();
            return Ok(Self::rejected(
                ReplyVerdict::Declined,
                utils::refused_status(F::NAME),
                details
                    .and_then(|details| details.response_message.clone())
                    .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
                details.and_then(|details| details.response_code.clone()),
                params,
            ));
        }

        let currency = item.router_data.request.request_currency();
        let reference = match F::NAME {
            FlowName::Store => response.first_token(),
            _ => response.transaction_id(),
        }
        .map(|id| AuthorizationReference::new(id, currency));

        Ok(Self::approved(
            utils::approved_status(F::NAME),
            reference,
            params,
        ))
    }
}

impl CommerceHubErrorResponse {
    pub fn into_error_response(self, status_code: u16) -> Result<ErrorResponse, Error> {
        let params = utils::to_response_params(&self)?;
        let first_error = self.first_error();
        let (code, message) = first_error
            .map(|error| (error.code(), error.message()))
            .unwrap_or_else(|| {
                (
                    consts::NO_ERROR_CODE.to_string(),
                    consts::NO_ERROR_MESSAGE.to_string(),
                )
            });
        let attempt_status = first_error
            .filter(|error| error.refuses_credentials())
            .map(|_| AttemptStatus::AuthenticationFailed);
        Ok(ErrorResponse {
            code,
            message,
            reason: None,
            status_code,
            attempt_status,
            connector_transaction_id: self.transaction_id().map(str::to_string),
            params,
        })
    }
}
