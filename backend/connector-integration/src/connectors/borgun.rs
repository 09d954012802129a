pub mod transformers;

#[cfg(test)]
mod test;

use common_enums::Currency;
use common_utils::{
    errors::CustomResult,
    types::{MinorUnit, StringMinorUnitForConnector},
};
use domain_types::{
    authorization::{AuthorizationReference, LegacyLayout},
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
use hyperswitch_masking::{Mask, Maskable};
use interfaces::{
    api::{AmountCeilingPolicy, ConnectorCommon},
    connector_integration_v2::ConnectorIntegrationV2,
    connector_types,
};
use transformers::{self as borgun, BorgunRequest, BorgunResponse};

use super::macros;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

const LEGACY_TOKEN_LAYOUT: LegacyLayout = LegacyLayout::named(
    &[
        "dateandtime",
        "batch",
        "transaction",
        "rrn",
        "authcode",
        "transtype",
        "tramount",
    ],
    "transaction",
);

macros::create_all_prerequisites!(
    connector_name: Borgun,
    amount_converter: StringMinorUnitForConnector,
    member_functions: {
        pub fn build_headers<F, Req>(
            &self,
            req: &RouterDataV2<F, Req>,
        ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
            let mut header = vec![(
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            )];
            let mut auth_header = self.get_auth_header(&req.connector_auth_type)?;
            header.append(&mut auth_header);
            Ok(header)
        }

        /// Every operation posts to the single authorization endpoint
        pub fn connector_url<F, Req>(&self, req: &RouterDataV2<F, Req>) -> String {
            self.base_url(&req.resource_common_data.connectors).to_string()
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Borgun,
    curl_request: SoapXml(BorgunRequest),
    curl_response: SoapXml(BorgunResponse),
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
            Ok(self.connector_url(req))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Borgun,
    curl_request: SoapXml(BorgunRequest),
    curl_response: SoapXml(BorgunResponse),
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
            Ok(self.connector_url(req))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Borgun,
    curl_request: SoapXml(BorgunRequest),
    curl_response: SoapXml(BorgunResponse),
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
            Ok(self.connector_url(req))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Borgun,
    curl_request: SoapXml(BorgunRequest),
    curl_response: SoapXml(BorgunResponse),
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
            Ok(self.connector_url(req))
        }
    }
);

macros::macro_connector_implementation!(
    connector_default_implementations: [get_content_type, get_error_response_v2],
    connector: Borgun,
    curl_request: SoapXml(BorgunRequest),
    curl_response: SoapXml(BorgunResponse),
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
            Ok(self.connector_url(req))
        }
    }
);

// Borgun has no tokenization or zero amount verification endpoint
impl ConnectorIntegrationV2<Store, PaymentMethodTokenizationData> for Borgun {}
impl ConnectorIntegrationV2<Verify, PaymentsVerifyData> for Borgun {}

impl connector_types::GatewayAdapter for Borgun {}
impl connector_types::ValidationTrait for Borgun {}
impl connector_types::PaymentPurchaseV2 for Borgun {}
impl connector_types::PaymentAuthorizeV2 for Borgun {}
impl connector_types::PaymentCapture for Borgun {}
impl connector_types::RefundV2 for Borgun {}
impl connector_types::PaymentVoidV2 for Borgun {}
impl connector_types::PaymentTokenV2 for Borgun {}
impl connector_types::PaymentVerifyV2 for Borgun {}

impl ConnectorCommon for Borgun {
    fn id(&self) -> &'static str {
        "borgun"
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/xml; charset=utf-8"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        &connectors.borgun.base_url
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = borgun::BorgunAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![(
            headers::AUTHORIZATION.to_string(),
            auth.basic_auth_value().into_masked(),
        )])
    }

    fn default_currency(&self) -> Currency {
        Currency::ISK
    }

    fn amount_ceiling_policy(&self) -> AmountCeilingPolicy {
        AmountCeilingPolicy::RejectAboveAuthorized
    }

    fn authorized_amount(&self, reference: &AuthorizationReference) -> Option<MinorUnit> {
        reference
            .extra("tramount")
            .and_then(|amount| amount.trim().parse::<i64>().ok())
            .map(MinorUnit::new)
    }

    fn legacy_token_layout(&self) -> LegacyLayout {
        LEGACY_TOKEN_LAYOUT
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        borgun::error_response(res)
    }

    fn scrub_rules(&self) -> ScrubRules {
        ScrubRules::with_fields([
            SensitiveField::Header(headers::AUTHORIZATION.to_string()),
            SensitiveField::XmlElement("PAN".to_string()),
            SensitiveField::XmlElement("CVC2".to_string()),
        ])
    }
}
