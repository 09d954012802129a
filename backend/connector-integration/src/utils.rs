use common_enums::{AttemptStatus, Currency};
use domain_types::{
    authorization::AuthorizationReference,
    connector_flow::FlowName,
    errors,
    router_request_types::{
        OperationOptions, PaymentMethodTokenizationData, PaymentVoidData, PaymentsAuthorizeData,
        PaymentsCaptureData, PaymentsVerifyData, RefundsData,
    },
};
use error_stack::{Report, ResultExt};
use serde::Serialize;
use serde_json::{Map, Value};

pub use domain_types::utils::missing_field_err;

type Error = Report<errors::ConnectorError>;

/// Processor transaction id of a referenced transaction. An empty token has none.
pub(crate) fn get_connector_transaction_id(
    reference: &AuthorizationReference,
) -> Result<String, Error> {
    if reference.is_empty() {
        return Err(errors::ConnectorError::MissingConnectorTransactionID.into());
    }
    Ok(reference.transaction_id.clone())
}

/// The currency a flow's request names, if it names one
pub trait RequestCurrency {
    fn request_currency(&self) -> Option<Currency>;
    fn request_options(&self) -> &OperationOptions;
}

impl RequestCurrency for PaymentsAuthorizeData {
    fn request_currency(&self) -> Option<Currency> {
        Some(self.currency)
    }
    fn request_options(&self) -> &OperationOptions {
        &self.options
    }
}

impl RequestCurrency for PaymentsCaptureData {
    fn request_currency(&self) -> Option<Currency> {
        self.currency
    }
    fn request_options(&self) -> &OperationOptions {
        &self.options
    }
}

impl RequestCurrency for RefundsData {
    fn request_currency(&self) -> Option<Currency> {
        self.currency
    }
    fn request_options(&self) -> &OperationOptions {
        &self.options
    }
}

impl RequestCurrency for PaymentVoidData {
    fn request_currency(&self) -> Option<Currency> {
        self.currency
    }
    fn request_options(&self) -> &OperationOptions {
        &self.options
    }
}

impl RequestCurrency for PaymentMethodTokenizationData {
    fn request_currency(&self) -> Option<Currency> {
        Some(self.currency)
    }
    fn request_options(&self) -> &OperationOptions {
        &self.options
    }
}

impl RequestCurrency for PaymentsVerifyData {
    fn request_currency(&self) -> Option<Currency> {
        Some(self.currency)
    }
    fn request_options(&self) -> &OperationOptions {
        &self.options
    }
}

/// Status of a transaction the processor accepted
pub(crate) fn approved_status(flow: FlowName) -> AttemptStatus {
    match flow {
        FlowName::Purchase | FlowName::Capture => AttemptStatus::Charged,
        FlowName::Authorize | FlowName::Store | FlowName::Verify => AttemptStatus::Authorized,
        FlowName::Refund => AttemptStatus::Refunded,
        FlowName::Void => AttemptStatus::Voided,
    }
}

/// Status of a transaction the processor refused
pub(crate) fn refused_status(flow: FlowName) -> AttemptStatus {
    match flow {
        FlowName::Purchase | FlowName::Authorize | FlowName::Store | FlowName::Verify => {
            AttemptStatus::AuthorizationFailed
        }
        FlowName::Capture => AttemptStatus::CaptureFailed,
        FlowName::Void => AttemptStatus::VoidFailed,
        FlowName::Refund => AttemptStatus::Failure,
    }
}

/// A string valued extension, or the string form of a scalar one
pub(crate) fn get_extension_string(options: &OperationOptions, key: &str) -> Option<String> {
    match options.extension(key)? {
        Value::String(value) => Some(value.clone()),
        Value::Null => None,
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Re-serializes a parsed reply into the parameter map handed back to callers
pub(crate) fn to_response_params<T: Serialize>(response: &T) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(response)
        .change_context(errors::ConnectorError::ResponseHandlingFailed)?
    {
        Value::Object(params) => Ok(params),
        other => {
            let mut params = Map::new();
            params.insert("response".to_string(), other);
            Ok(params)
        }
    }
}

pub fn serialize_to_xml_string_with_root<T: Serialize>(
    root_name: &str,
    data: &T,
) -> Result<String, Error> {
    let xml_content = quick_xml::se::to_string_with_root(root_name, data)
        .change_context(errors::ConnectorError::RequestEncodingFailed)
        .attach_printable("Failed to serialize XML with root")?;

    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>{xml_content}"
    ))
}
