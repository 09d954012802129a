use common_enums::Currency;
use common_utils::{consts, errors::CustomResult, MinorUnit};
use domain_types::{
    authorization::{AuthorizationReference, LegacyLayout},
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_response_types::Response,
    transcript::ScrubRules,
    types::Connectors,
};
use hyperswitch_masking::Maskable;

/// How capture and refund amounts above the authorized amount are handled
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AmountCeilingPolicy {
    /// Refuse locally when the token records the authorized amount
    RejectAboveAuthorized,
    /// Send as requested and let the processor decide
    DeferToProcessor,
}

pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP header used for authorization.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(Vec::new())
    }

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API.
    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;

    /// Currency used when neither the options nor the token name one
    fn default_currency(&self) -> Currency {
        Currency::USD
    }

    fn amount_ceiling_policy(&self) -> AmountCeilingPolicy;

    /// The authorized amount recorded in a token, when the connector records one
    fn authorized_amount(&self, _reference: &AuthorizationReference) -> Option<MinorUnit> {
        None
    }

    /// Positional layout of tokens issued before the versioned format
    fn legacy_token_layout(&self) -> LegacyLayout {
        LegacyLayout::single()
    }

    /// Fixed redaction rules for this connector's wire traffic
    fn scrub_rules(&self) -> ScrubRules {
        ScrubRules::new()
    }

    /// common error response for a connector if it is same in all case
    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: consts::NO_ERROR_CODE.to_string(),
            message: consts::NO_ERROR_MESSAGE.to_string(),
            reason: Some(String::from_utf8_lossy(&res.response).into_owned()),
            attempt_status: None,
            connector_transaction_id: None,
            params: serde_json::Map::new(),
        })
    }
}
