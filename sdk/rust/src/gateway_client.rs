use std::sync::Arc;

use common_enums::{CaptureMethod, Currency};
use common_utils::{errors::CustomResult, types::Money, MinorUnit};
use connector_integration::types::ConnectorData;
use domain_types::{
    authorization::AuthorizationReference,
    connector_flow::{Authorize, Capture, FlowMarker, Purchase, Refund, Store, Verify, Void},
    errors::{ConnectorError, GatewayError},
    payment_method_data::PaymentInstrument,
    router_data::ConnectorAuthType,
    router_data_v2::RouterDataV2,
    router_request_types::{
        OperationOptions, PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsVerifyData, RefundsData,
    },
    router_response_types::GatewayResponse,
    transcript::ScrubRules,
    types::{ConnectorEnum, Connectors, GatewayFlowData},
};
use error_stack::{report, ResultExt};
use external_services::{http_client::ReqwestTransport, service::execute_connector_processing_step};
use hyperswitch_masking::PeekInterface;
use interfaces::{
    api::AmountCeilingPolicy,
    connector_integration_v2::BoxedConnectorIntegrationV2,
    connector_types::BoxedConnector,
    transport::ConnectorTransport,
};

use crate::configs::Config;

/// One processor account behind the unified operation set.
///
/// Credentials, endpoints and the transport are fixed at construction; every operation
/// is an independent round trip.
pub struct GatewayClient {
    connector: BoxedConnector,
    connector_name: ConnectorEnum,
    auth: ConnectorAuthType,
    connectors: Connectors,
    test_mode: bool,
    transport: Arc<dyn ConnectorTransport>,
}

impl GatewayClient {
    pub fn new(connector_name: ConnectorEnum, auth: ConnectorAuthType, config: &Config) -> Self {
        let transport = ReqwestTransport::new(config.proxy.clone(), config.http.clone());
        Self::with_transport(
            connector_name,
            auth,
            config.connectors.clone(),
            config.test_mode,
            Arc::new(transport),
        )
    }

    pub fn with_transport(
        connector_name: ConnectorEnum,
        auth: ConnectorAuthType,
        connectors: Connectors,
        test_mode: bool,
        transport: Arc<dyn ConnectorTransport>,
    ) -> Self {
        let ConnectorData {
            connector,
            connector_name,
        } = ConnectorData::get_connector_by_name(&connector_name);
        Self {
            connector,
            connector_name,
            auth,
            connectors,
            test_mode,
            transport,
        }
    }

    pub fn connector_name(&self) -> ConnectorEnum {
        self.connector_name
    }

    pub fn supports_store(&self) -> bool {
        self.connector.supports_store()
    }

    pub fn supports_verify(&self) -> bool {
        self.connector.supports_verify()
    }

    /// Authorizes and captures in one step
    pub async fn purchase(
        &self,
        money: Money,
        instrument: PaymentInstrument,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "PURCHASE_FLOW: initiated");
        if let Err(error) = ensure_non_negative(money) {
            return Ok(self.invalid_request(error));
        }
        let scrub_rules = self.call_scrub_rules(Some(&instrument), None);
        let order_id = options.order_id.clone();
        let request = PaymentsAuthorizeData::new(
            self.resolve_money(money, &options),
            instrument,
            CaptureMethod::Automatic,
            options,
        );
        let connector: BoxedConnectorIntegrationV2<'_, Purchase, PaymentsAuthorizeData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    /// Reserves funds for a later capture
    pub async fn authorize(
        &self,
        money: Money,
        instrument: PaymentInstrument,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "AUTHORIZE_FLOW: initiated");
        if let Err(error) = ensure_non_negative(money) {
            return Ok(self.invalid_request(error));
        }
        let scrub_rules = self.call_scrub_rules(Some(&instrument), None);
        let order_id = options.order_id.clone();
        let request = PaymentsAuthorizeData::new(
            self.resolve_money(money, &options),
            instrument,
            CaptureMethod::Manual,
            options,
        );
        let connector: BoxedConnectorIntegrationV2<'_, Authorize, PaymentsAuthorizeData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    pub async fn capture(
        &self,
        amount: MinorUnit,
        authorization: &str,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "CAPTURE_FLOW: initiated");
        let reference = match self.decode_reference(authorization, Some(amount)) {
            Ok(reference) => reference,
            Err(error) => return Ok(self.invalid_request(error)),
        };
        let scrub_rules = self.call_scrub_rules(None, Some(authorization));
        let order_id = options.order_id.clone();
        let request = PaymentsCaptureData {
            amount_to_capture: amount,
            currency: options.currency.or(reference.currency),
            reference,
            options,
        };
        let connector: BoxedConnectorIntegrationV2<'_, Capture, PaymentsCaptureData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    /// `None` refunds everything that was captured
    pub async fn refund(
        &self,
        amount: Option<MinorUnit>,
        authorization: &str,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "REFUND_FLOW: initiated");
        let reference = match self.decode_reference(authorization, amount) {
            Ok(reference) => reference,
            Err(error) => return Ok(self.invalid_request(error)),
        };
        let scrub_rules = self.call_scrub_rules(None, Some(authorization));
        let order_id = options.order_id.clone();
        let request = RefundsData {
            refund_amount: amount,
            currency: options.currency.or(reference.currency),
            reference,
            options,
        };
        let connector: BoxedConnectorIntegrationV2<'_, Refund, RefundsData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    pub async fn void(
        &self,
        authorization: &str,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "VOID_FLOW: initiated");
        let reference = match self.decode_reference(authorization, None) {
            Ok(reference) => reference,
            Err(error) => return Ok(self.invalid_request(error)),
        };
        let scrub_rules = self.call_scrub_rules(None, Some(authorization));
        let order_id = options.order_id.clone();
        let request = PaymentVoidData {
            currency: options.currency.or(reference.currency),
            reference,
            options,
        };
        let connector: BoxedConnectorIntegrationV2<'_, Void, PaymentVoidData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    /// Tokenizes the instrument for later stored-token payments
    pub async fn store(
        &self,
        instrument: PaymentInstrument,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "STORE_FLOW: initiated");
        if !self.supports_store() {
            return Err(self.not_supported(Store::NAME.to_string()));
        }
        let scrub_rules = self.call_scrub_rules(Some(&instrument), None);
        let order_id = options.order_id.clone();
        let request = PaymentMethodTokenizationData {
            payment_method_data: instrument,
            currency: self.resolve_currency(&options),
            options,
        };
        let connector: BoxedConnectorIntegrationV2<'_, Store, PaymentMethodTokenizationData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    /// Checks the instrument without moving funds
    pub async fn verify(
        &self,
        instrument: PaymentInstrument,
        options: OperationOptions,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tracing::info!(connector = %self.connector_name, "VERIFY_FLOW: initiated");
        if !self.supports_verify() {
            return Err(self.not_supported(Verify::NAME.to_string()));
        }
        let scrub_rules = self.call_scrub_rules(Some(&instrument), None);
        let order_id = options.order_id.clone();
        let request = PaymentsVerifyData {
            payment_method_data: instrument,
            currency: self.resolve_currency(&options),
            options,
        };
        let connector: BoxedConnectorIntegrationV2<'_, Verify, PaymentsVerifyData> =
            self.connector.get_connector_integration_v2();
        self.execute(connector, request, order_id, scrub_rules).await
    }

    /// Redacts this client's credentials and the adapter's sensitive fields from a
    /// captured transcript
    pub fn scrub(&self, transcript: &str) -> String {
        self.call_scrub_rules(None, None).scrub_text(transcript)
    }

    async fn execute<F, Req>(
        &self,
        connector: BoxedConnectorIntegrationV2<'_, F, Req>,
        request: Req,
        order_id: Option<String>,
        scrub_rules: ScrubRules,
    ) -> CustomResult<GatewayResponse, GatewayError>
    where
        F: FlowMarker + 'static,
        Req: 'static,
    {
        let router_data = RouterDataV2::new(self.flow_data(order_id), self.auth.clone(), request);
        execute_connector_processing_step(
            self.transport.as_ref(),
            connector,
            &router_data,
            &scrub_rules,
        )
        .await
    }

    fn flow_data(&self, order_id: Option<String>) -> GatewayFlowData {
        GatewayFlowData {
            connectors: self.connectors.clone(),
            test_mode: self.test_mode,
            connector_request_reference_id: order_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string()),
        }
    }

    /// An explicit currency option wins over the one passed with the amount
    fn resolve_money(&self, money: Money, options: &OperationOptions) -> Money {
        Money {
            currency: options.currency.unwrap_or(money.currency),
            ..money
        }
    }

    fn resolve_currency(&self, options: &OperationOptions) -> Currency {
        options
            .currency
            .unwrap_or_else(|| self.connector.default_currency())
    }

    /// Decodes a caller held token and applies the local amount checks for the flow
    /// that references it
    fn decode_reference(
        &self,
        authorization: &str,
        requested: Option<MinorUnit>,
    ) -> Result<AuthorizationReference, error_stack::Report<ConnectorError>> {
        let reference =
            AuthorizationReference::decode(authorization, self.connector.legacy_token_layout())?;
        if let Some(amount) = requested {
            ensure_non_negative(Money {
                amount,
                currency: reference
                    .currency
                    .unwrap_or_else(|| self.connector.default_currency()),
            })?;
        }
        if let (AmountCeilingPolicy::RejectAboveAuthorized, Some(requested), Some(authorized)) = (
            self.connector.amount_ceiling_policy(),
            requested,
            self.connector.authorized_amount(&reference),
        ) {
            if requested.get_amount_as_i64() > authorized.get_amount_as_i64() {
                return Err(report!(ConnectorError::AmountExceedsAuthorized {
                    requested: requested.get_amount_as_i64(),
                    authorized: authorized.get_amount_as_i64(),
                }));
            }
        }
        Ok(reference)
    }

    /// The adapter's field rules plus every secret literal this call carries
    fn call_scrub_rules(
        &self,
        instrument: Option<&PaymentInstrument>,
        authorization: Option<&str>,
    ) -> ScrubRules {
        let mut rules = self.connector.scrub_rules();
        for secret in self.auth.secret_values() {
            rules.add_literal(secret);
        }
        match instrument {
            Some(PaymentInstrument::Card(card)) => {
                rules.add_literal(card.card_number.get_card_number());
                rules.add_literal(card.card_cvc.peek().clone());
            }
            Some(PaymentInstrument::StoredToken(token)) => {
                rules.add_literal(token.token.peek().clone());
            }
            None => {}
        }
        if let Some(authorization) = authorization {
            rules.add_literal(authorization);
        }
        rules
    }

    fn invalid_request(&self, error: error_stack::Report<ConnectorError>) -> GatewayResponse {
        tracing::info!(?error, "request refused before sending");
        GatewayResponse::invalid_request(error.current_context().to_string(), self.test_mode)
    }

    fn not_supported(&self, operation: String) -> error_stack::Report<GatewayError> {
        report!(GatewayError::OperationNotSupported {
            operation,
            connector: self.connector.id(),
        })
    }
}

fn ensure_non_negative(money: Money) -> Result<(), error_stack::Report<ConnectorError>> {
    money
        .validate_non_negative()
        .change_context(ConnectorError::NegativeAmount)
}
