pub mod transformers;


use common_utils::{
    errors::CustomResult, ext_traits::BytesExt, types::FloatMajorUnitForConnector,
};
use domain_types::{
    connector_flow::{Authorize, Capture, Purchase, Refund, Store, Verify, Void},
    errors,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{
        PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsVerifyData, RefundsData,
    },
    router_response_types::Response,
    transcript::{ScrubRules, SensitiveField},
    types::Connectors,
};
use error_stack::ResultExt;
use hyperswitch_masking::{ExposeInterface, Mask, Maskable};
use interfaces::{
    api::{AmountCeilingPolicy, ConnectorCommon},
    connector_integration_v2::ConnectorIntegrationV2,
    connector_types,
};
use transformers::{
    self as commercehub, CommerceHubCaptureRequest, CommerceHubErrorResponse,
    CommerceHubPaymentsRequest, CommerceHubPaymentsResponse, CommerceHubRefundRequest,
    CommerceHubTokenRequest, CommerceHubVerifyRequest, CommerceHubVoidRequest,
};

use super::macros;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const API_KEY: &str = "Api-Key";
    pub(crate) const CLIENT_REQUEST_ID: &str = "Client-Request-Id";
    pub(crate) const TIMESTAMP: &str = "Timestamp";
    pub(crate) const AUTH_TOKEN_TYPE: &str = "Auth-Token-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

const CHARGES_PATH: &str = "/payments/v1/charges";
const CANCELS_PATH: &str = "/payments/v1/cancels";
const REFUNDS_PATH: &str = "/payments/v1/refunds";
const TOKENS_PATH: &str = "/payments-vas/v1/tokens";
const VERIFICATION_PATH: &str = "/payments-vas/v1/accounts/verification";

macros::create_all_prerequisites!(
    connector_name: CommerceHub,
    amount_converter: FloatMajorUnitForConnector,
    member_functions: {
        /// Every request is signed over the exact body that goes on the wire
        pub fn build_headers<F, Req>(
            &self,
            req: &RouterDataV2<F, Req>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError>
        where
            Self: ConnectorIntegrationV2<F, Req>,
        {
            let auth = commercehub::CommerceHubAuthType::try_from(&req.connector_auth_type)
                .change_context(errors::ConnectorError::FailedToObtainAuthType)?;

            let client_request_id = commercehub::CommerceHubAuthType::generate_client_request_id();
            let timestamp = commercehub::CommerceHubAuthType::generate_timestamp();

            let request_body = self
                .get_request_body(req)?
                .map(|body| body.get_inner_value())
                .transpose()
                .change_context(errors::ConnectorError::RequestEncodingFailed)?
                .map(|body| body.expose())
                .unwrap_or_default();
            let signature =
                auth.generate_hmac_signature(&client_request_id, &timestamp, &request_body)?;

            Ok(vec![
                (
                    headers::CONTENT_TYPE.to_string(),
                    self.common_get_content_type().to_string().into(),
                ),
                (headers::CLIENT_REQUEST_ID.to_string(), client_request_id.into()),
                (headers::API_KEY.to_string(), auth.api_key.expose().into_masked()),
                (headers::TIMESTAMP.to_string(), timestamp.into()),
                (headers::AUTH_TOKEN_TYPE.to_string(), "HMAC".to_string().into()),
                (headers::AUTHORIZATION.to_string(), signature.into_masked()),
            ])
        }

        pub fn connector_url<F, Req>(&self, req: &RouterDataV2<F, Req>, path: &str) -> String {
            format!(
                "{}{path}",
                self.base_url(&req.resource_common_data.connectors)
                    .trim_end_matches('/')
            )
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubPaymentsRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Purchase,
    flow_request: PaymentsAuthorizeData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Purchase, PaymentsAuthorizeData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Purchase, PaymentsAuthorizeData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, CHARGES_PATH))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubPaymentsRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Authorize,
    flow_request: PaymentsAuthorizeData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Authorize, PaymentsAuthorizeData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Authorize, PaymentsAuthorizeData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, CHARGES_PATH))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubCaptureRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Capture,
    flow_request: PaymentsCaptureData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Capture, PaymentsCaptureData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Capture, PaymentsCaptureData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, CHARGES_PATH))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubRefundRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Refund,
    flow_request: RefundsData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Refund, RefundsData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Refund, RefundsData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, REFUNDS_PATH))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubVoidRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Void,
    flow_request: PaymentVoidData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Void, PaymentVoidData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Void, PaymentVoidData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, CANCELS_PATH))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubTokenRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Store,
    flow_request: PaymentMethodTokenizationData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Store, PaymentMethodTokenizationData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Store, PaymentMethodTokenizationData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, TOKENS_PATH))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: CommerceHub,
    curl_request: Json(CommerceHubVerifyRequest),
    curl_response: Json(CommerceHubPaymentsResponse),
    flow_name: Verify,
    flow_request: PaymentsVerifyData,
    http_method: Post,
    other_functions: {
        fn get_headers(
            &self,
            req: &RouterDataV2<Verify, PaymentsVerifyData>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            self.build_headers(req)
        }
        fn get_url(
            &self,
            req: &RouterDataV2<Verify, PaymentsVerifyData>,
        ) -> CustomResult<String, errors::ConnectorError> {
            Ok(self.connector_url(req, VERIFICATION_PATH))
        }
    }
);

impl connector_types::GatewayAdapter for CommerceHub {}

impl connector_types::ValidationTrait for CommerceHub {
    fn supports_store(&self) -> bool {
        true
    }

    fn supports_verify(&self) -> bool {
        true
    }
}

impl connector_types::PaymentPurchaseV2 for CommerceHub {}
impl connector_types::PaymentAuthorizeV2 for CommerceHub {}
impl connector_types::PaymentCapture for CommerceHub {}
impl connector_types::RefundV2 for CommerceHub {}
impl connector_types::PaymentVoidV2 for CommerceHub {}
impl connector_types::PaymentTokenV2 for CommerceHub {}
impl connector_types::PaymentVerifyV2 for CommerceHub {}

impl ConnectorCommon for CommerceHub {
    fn id(&self) -> &'static str {
        "commercehub"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        &connectors.commercehub.base_url
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        // signed per request in `build_headers`
        commercehub::CommerceHubAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![])
    }

    fn amount_ceiling_policy(&self) -> AmountCeilingPolicy {
        AmountCeilingPolicy::DeferToProcessor
    }

    fn scrub_rules(&self) -> ScrubRules {
        ScrubRules::with_fields([
            SensitiveField::Header(headers::API_KEY.to_string()),
            SensitiveField::Header(headers::AUTHORIZATION.to_string()),
            SensitiveField::JsonString("cardData".to_string()),
            SensitiveField::JsonString("securityCode".to_string()),
            SensitiveField::JsonString("tokenData".to_string()),
        ])
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let response: CommerceHubErrorResponse = if res.response.is_empty() {
            CommerceHubErrorResponse::default()
        } else {
            res.response
                .parse_struct("CommerceHubErrorResponse")
                .change_context(errors::ConnectorError::ResponseDeserializationFailed)?
        };

        tracing::info!(connector_response=?response);

        response.into_error_response(res.status_code)
    }
}
