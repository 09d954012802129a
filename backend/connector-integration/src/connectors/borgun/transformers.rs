use std::collections::BTreeMap;

use common_enums::{AttemptStatus, Currency};
use common_utils::{
    consts,
    date_time::{self, DateFormat},
    errors::CustomResult,
};
use domain_types::{
    authorization::AuthorizationReference,
    connector_flow::FlowMarker,
    errors,
    payment_method_data::PaymentInstrument,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::{
        OperationOptions, PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData,
        RefundsData,
    },
    router_response_types::{ProcessorReply, ReplyVerdict, Response},
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::api::ConnectorCommon;
use quick_xml::events::Event;
use rand::Rng;
use serde::Serialize;
use serde_json::{Map, Value};

use super::BorgunRouterData;
use crate::{
    connectors::macros::{SoapXmlRequest, SoapXmlResponse},
    types::ResponseRouterData,
    utils::{self, RequestCurrency},
};

type Error = error_stack::Report<errors::ConnectorError>;

const API_VERSION: &str = "1000";
const DEFAULT_TERMINAL_ID: &str = "1";
const RRN_PREFIX: &str = "AMRCNT";
const APPROVED_ACTION_CODE: &str = "000";
const SOAP_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const AUTHORIZATION_NAMESPACE: &str = "http://Borgun/Heimir/pub/ws/Authorization";
const PASSENGER_ITINERARY_EXTENSION: &str = "passenger_itinerary_data";
/// Integration server fault code for refused credentials
const INVALID_CREDENTIALS_FAULT: &str = "ISS.0084.9001";

/// Token fields kept besides the transaction id, in legacy slot order
pub(super) const TOKEN_FIELDS: [&str; 6] =
    ["dateandtime", "batch", "rrn", "authcode", "transtype", "tramount"];

pub struct BorgunAuthType {
    pub(super) username: Secret<String>,
    pub(super) password: Secret<String>,
    pub(super) processor: Secret<String>,
    pub(super) merchant_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for BorgunAuthType {
    type Error = Error;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::MultiAuthKey {
                api_key,
                key1,
                api_secret,
                key2,
            } => Ok(Self {
                username: api_key.to_owned(),
                password: api_secret.to_owned(),
                processor: key1.to_owned(),
                merchant_id: key2.to_owned(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

impl BorgunAuthType {
    pub fn basic_auth_value(&self) -> String {
        use base64::Engine;

        let credentials = format!("{}:{}", self.username.peek(), self.password.peek());
        format!("Basic {}", consts::BASE64_ENGINE.encode(credentials))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorgunMode {
    GetAuthorization,
    CancelAuthorization,
    ThreeDsAuthentication,
}

impl BorgunMode {
    fn root(self) -> &'static str {
        match self {
            Self::GetAuthorization => "getAuthorization",
            Self::CancelAuthorization => "cancelAuthorization",
            Self::ThreeDsAuthentication => "get3DSAuthentication",
        }
    }

    fn reply_element(self) -> &'static str {
        match self {
            Self::GetAuthorization => "getAuthorizationReply",
            Self::CancelAuthorization => "cancelAuthorizationReply",
            Self::ThreeDsAuthentication => "get3DSAuthenticationReply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorgunTransType {
    Sale,
    Refund,
    PreAuthorization,
}

impl BorgunTransType {
    fn code(self) -> &'static str {
        match self {
            Self::Sale => "1",
            Self::Refund => "3",
            Self::PreAuthorization => "5",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PassengerItineraryData {
    #[serde(rename = "A1")]
    a1: BTreeMap<String, String>,
}

/// The inner authorization document, sent HTML-escaped inside the SOAP envelope
#[derive(Debug, Serialize)]
pub struct BorgunAuthorizationDocument {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Processor")]
    processor: Secret<String>,
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "TerminalID")]
    terminal_id: String,
    #[serde(rename = "TransType", skip_serializing_if = "Option::is_none")]
    trans_type: Option<String>,
    #[serde(rename = "TrAmount")]
    tr_amount: String,
    #[serde(rename = "TrCurrency")]
    tr_currency: &'static str,
    #[serde(rename = "TrCurrencyExponent", skip_serializing_if = "Option::is_none")]
    tr_currency_exponent: Option<u8>,
    #[serde(rename = "DateAndTime")]
    date_and_time: String,
    #[serde(rename = "PAN", skip_serializing_if = "Option::is_none")]
    pan: Option<cards::CardNumber>,
    #[serde(rename = "ExpDate", skip_serializing_if = "Option::is_none")]
    exp_date: Option<Secret<String>>,
    #[serde(rename = "CVC2", skip_serializing_if = "Option::is_none")]
    cvc2: Option<Secret<String>>,
    #[serde(rename = "RRN")]
    rrn: String,
    #[serde(rename = "Transaction", skip_serializing_if = "Option::is_none")]
    transaction: Option<String>,
    #[serde(rename = "AuthCode", skip_serializing_if = "Option::is_none")]
    auth_code: Option<String>,
    #[serde(rename = "SaleDescription", skip_serializing_if = "Option::is_none")]
    sale_description: Option<String>,
    #[serde(rename = "MerchantReturnURL", skip_serializing_if = "Option::is_none")]
    merchant_return_url: Option<String>,
    #[serde(rename = "PassengerItineraryData", skip_serializing_if = "Option::is_none")]
    passenger_itinerary_data: Option<PassengerItineraryData>,
}

#[derive(Debug)]
pub struct BorgunRequest {
    mode: BorgunMode,
    document: BorgunAuthorizationDocument,
}

impl SoapXmlRequest for BorgunRequest {
    fn to_soap_xml(&self) -> CustomResult<String, errors::ConnectorError> {
        let root = self.mode.root();
        let document = utils::serialize_to_xml_string_with_root(root, &self.document)?;
        let escaped = quick_xml::escape::escape(document.as_str());
        let body = match self.mode {
            BorgunMode::ThreeDsAuthentication => format!(
                "<aut:{root}><inputXML>{escaped}</inputXML></aut:{root}>"
            ),
            BorgunMode::GetAuthorization | BorgunMode::CancelAuthorization => {
                let input = root.trim_end_matches("Authorization");
                format!(
                    "<aut:{root}Input><{input}AuthReqXml>{escaped}</{input}AuthReqXml></aut:{root}Input>"
                )
            }
        };
        Ok(format!(
            r#"<soapenv:Envelope xmlns:soapenv="{SOAP_NAMESPACE}" xmlns:aut="{AUTHORIZATION_NAMESPACE}"><soapenv:Header/><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"#
        ))
    }
}

/// Fields common to every document: version, credentials and terminal
struct DocumentHeader {
    processor: Secret<String>,
    merchant_id: Secret<String>,
    terminal_id: String,
}

impl DocumentHeader {
    fn new(auth_type: &ConnectorAuthType, options: &OperationOptions) -> Result<Self, Error> {
        let auth = BorgunAuthType::try_from(auth_type)?;
        Ok(Self {
            processor: auth.processor,
            merchant_id: auth.merchant_id,
            terminal_id: options
                .terminal_id
                .clone()
                .unwrap_or_else(|| DEFAULT_TERMINAL_ID.to_string()),
        })
    }
}

/// ISK is sent with exponent 2 on 3DS requests and 0 everywhere else
fn currency_exponent(currency: Currency, three_ds: bool) -> Option<u8> {
    match (currency, three_ds) {
        (Currency::ISK, true) => Some(2),
        (Currency::ISK, false) => Some(0),
        _ => None,
    }
}

fn generate_rrn() -> String {
    let digits: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{RRN_PREFIX}{digits:06}")
}

fn current_date_and_time() -> Result<String, Error> {
    date_time::format_date(date_time::now(), DateFormat::YYMMDDHHmmss)
        .change_context(errors::ConnectorError::RequestEncodingFailed)
        .attach_printable("Failed to format DateAndTime")
}

fn passenger_itinerary_data(options: &OperationOptions) -> Option<PassengerItineraryData> {
    let Value::Object(entries) = options.extension(PASSENGER_ITINERARY_EXTENSION)? else {
        return None;
    };
    let a1 = entries
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key.clone(), text.clone())),
            Value::Number(number) => Some((key.clone(), number.to_string())),
            _ => None,
        })
        .collect::<BTreeMap<_, _>>();
    Some(PassengerItineraryData { a1 })
}

/// Reference fields shared by capture, refund and void
struct ReferenceFields {
    date_and_time: String,
    transaction: String,
    rrn: String,
    auth_code: Option<String>,
}

impl TryFrom<&AuthorizationReference> for ReferenceFields {
    type Error = Error;
    fn try_from(reference: &AuthorizationReference) -> Result<Self, Self::Error> {
        let transaction = utils::get_connector_transaction_id(reference)?;
        let required = |name: &'static str| {
            reference
                .extra(name)
                .map(str::to_string)
                .ok_or_else(utils::missing_field_err(name))
        };
        Ok(Self {
            date_and_time: required("dateandtime")?,
            transaction,
            rrn: required("rrn")?,
            auth_code: reference.extra("authcode").map(str::to_string),
        })
    }
}

impl<'a, F> TryFrom<BorgunRouterData<'a, RouterDataV2<F, PaymentsAuthorizeData>>>
    for BorgunRequest
{
    type Error = Error;
    fn try_from(
        item: BorgunRouterData<'a, RouterDataV2<F, PaymentsAuthorizeData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let options = &request.options;
        let card = match &request.payment_method_data {
            PaymentInstrument::Card(card) => card,
            PaymentInstrument::StoredToken(_) => Err(errors::ConnectorError::NotSupported {
                message: "stored token payments".to_string(),
                connector: "borgun",
            })?,
        };
        let header = DocumentHeader::new(&item.router_data.connector_auth_type, options)?;
        let three_ds = options.apply_3d_secure;

        let (mode, trans_type) = if three_ds {
            (BorgunMode::ThreeDsAuthentication, None)
        } else if request.is_auto_capture() {
            (BorgunMode::GetAuthorization, Some(BorgunTransType::Sale))
        } else {
            (
                BorgunMode::GetAuthorization,
                Some(BorgunTransType::PreAuthorization),
            )
        };

        let document = BorgunAuthorizationDocument {
            version: API_VERSION,
            processor: header.processor,
            merchant_id: header.merchant_id,
            terminal_id: header.terminal_id,
            trans_type: trans_type.map(|trans_type| trans_type.code().to_string()),
            tr_amount: item
                .connector
                .convert_amount(request.amount, request.currency)?
                .get_amount_as_string(),
            tr_currency: request.currency.iso_4217(),
            tr_currency_exponent: currency_exponent(request.currency, three_ds),
            date_and_time: current_date_and_time()?,
            pan: Some(card.card_number.clone()),
            exp_date: Some(card.get_expiry_date_as_yymm()?),
            cvc2: Some(card.card_cvc.clone()),
            rrn: generate_rrn(),
            transaction: None,
            auth_code: None,
            sale_description: three_ds
                .then(|| options.description.clone().unwrap_or_default()),
            merchant_return_url: options
                .merchant_return_url
                .clone()
                .filter(|_| three_ds),
            passenger_itinerary_data: passenger_itinerary_data(options),
        };
        Ok(Self { mode, document })
    }
}

impl BorgunRequest {
    fn referenced(
        header: DocumentHeader,
        mode: BorgunMode,
        trans_type: String,
        tr_amount: String,
        currency: Currency,
        reference: &AuthorizationReference,
    ) -> Result<Self, Error> {
        let fields = ReferenceFields::try_from(reference)?;
        Ok(Self {
            mode,
            document: BorgunAuthorizationDocument {
                version: API_VERSION,
                processor: header.processor,
                merchant_id: header.merchant_id,
                terminal_id: header.terminal_id,
                trans_type: Some(trans_type),
                tr_amount,
                tr_currency: currency.iso_4217(),
                tr_currency_exponent: currency_exponent(currency, false),
                date_and_time: fields.date_and_time,
                pan: None,
                exp_date: None,
                cvc2: None,
                rrn: fields.rrn,
                transaction: Some(fields.transaction),
                auth_code: fields.auth_code,
                sale_description: None,
                merchant_return_url: None,
                passenger_itinerary_data: None,
            },
        })
    }
}

impl<'a, F> TryFrom<BorgunRouterData<'a, RouterDataV2<F, PaymentsCaptureData>>> for BorgunRequest {
    type Error = Error;
    fn try_from(
        item: BorgunRouterData<'a, RouterDataV2<F, PaymentsCaptureData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let currency = request
            .currency
            .unwrap_or_else(|| item.connector.default_currency());
        Self::referenced(
            DocumentHeader::new(&item.router_data.connector_auth_type, &request.options)?,
            BorgunMode::GetAuthorization,
            BorgunTransType::Sale.code().to_string(),
            item.connector
                .convert_amount(request.amount_to_capture, currency)?
                .get_amount_as_string(),
            currency,
            &request.reference,
        )
    }
}

impl<'a, F> TryFrom<BorgunRouterData<'a, RouterDataV2<F, RefundsData>>> for BorgunRequest {
    type Error = Error;
    fn try_from(
        item: BorgunRouterData<'a, RouterDataV2<F, RefundsData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let currency = request
            .currency
            .unwrap_or_else(|| item.connector.default_currency());
        // a refund without an amount returns what the original transaction took
        let tr_amount = match request.refund_amount {
            Some(amount) => item
                .connector
                .convert_amount(amount, currency)?
                .get_amount_as_string(),
            None => request
                .reference
                .extra("tramount")
                .map(str::to_string)
                .ok_or_else(utils::missing_field_err("refund_amount"))?,
        };
        Self::referenced(
            DocumentHeader::new(&item.router_data.connector_auth_type, &request.options)?,
            BorgunMode::GetAuthorization,
            BorgunTransType::Refund.code().to_string(),
            tr_amount,
            currency,
            &request.reference,
        )
    }
}

/// Cancellation repeats the type and amount of the transaction it cancels
impl<'a, F> TryFrom<BorgunRouterData<'a, RouterDataV2<F, PaymentVoidData>>> for BorgunRequest {
    type Error = Error;
    fn try_from(
        item: BorgunRouterData<'a, RouterDataV2<F, PaymentVoidData>>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let reference = &request.reference;
        let currency = request
            .currency
            .unwrap_or_else(|| item.connector.default_currency());
        let from_token = |name: &'static str| {
            reference
                .extra(name)
                .map(str::to_string)
                .ok_or_else(utils::missing_field_err(name))
        };
        Self::referenced(
            DocumentHeader::new(&item.router_data.connector_auth_type, &request.options)?,
            BorgunMode::CancelAuthorization,
            from_token("transtype")?,
            from_token("tramount")?,
            currency,
            reference,
        )
    }
}

/// Children of the reply element, names lowercased. Grandchildren are keyed
/// `parent_child`.
#[derive(Debug, Default, Serialize)]
pub struct BorgunResponse {
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl BorgunResponse {
    fn field(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    fn action_code(&self) -> Option<&str> {
        self.field("actioncode")
    }

    fn is_approved(&self) -> bool {
        self.action_code() == Some(APPROVED_ACTION_CODE)
    }

    fn failure_message(&self) -> String {
        self.field("message")
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "Error with ActionCode={}",
                    self.action_code().unwrap_or_default()
                )
            })
    }

    fn authorization(&self, request_currency: Option<Currency>) -> Option<AuthorizationReference> {
        let transaction = self.field("transaction").filter(|id| !id.is_empty())?;
        let currency = self
            .field("trcurrency")
            .and_then(Currency::from_code)
            .or(request_currency);
        Some(
            TOKEN_FIELDS
                .iter()
                .fold(AuthorizationReference::new(transaction, currency), |reference, name| {
                    reference.with_optional_extra(name, self.field(name))
                }),
        )
    }
}

impl SoapXmlResponse for BorgunResponse {
    fn from_soap_xml(body: &[u8]) -> CustomResult<Self, errors::ConnectorError> {
        let raw = std::str::from_utf8(body)
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        let unescaped = quick_xml::escape::unescape(raw)
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)
            .attach_printable("Failed to unescape SOAP reply")?;

        let fragment = [
            BorgunMode::GetAuthorization,
            BorgunMode::CancelAuthorization,
            BorgunMode::ThreeDsAuthentication,
        ]
        .into_iter()
        .find_map(|mode| reply_fragment(&unescaped, mode.reply_element()))
        .ok_or_else(|| {
            report!(errors::ConnectorError::ResponseDeserializationFailed)
                .attach_printable("No authorization reply element in SOAP body")
        })?;

        Ok(Self {
            params: flatten_reply(fragment)?,
        })
    }
}

/// Reads a non 2xx reply. Borgun answers either with a regular authorization reply or
/// with a SOAP fault; both keep every field in `params`.
pub(super) fn error_response(res: Response) -> CustomResult<ErrorResponse, errors::ConnectorError> {
    let status_code = res.status_code;
    if let Ok(reply) = BorgunResponse::from_soap_xml(&res.response) {
        return Ok(ErrorResponse {
            code: reply
                .action_code()
                .map(str::to_string)
                .unwrap_or_else(|| status_code.to_string()),
            message: reply.failure_message(),
            reason: None,
            status_code,
            attempt_status: None,
            connector_transaction_id: reply.field("transaction").map(str::to_string),
            params: reply.params,
        });
    }

    let raw = std::str::from_utf8(&res.response)
        .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
    let params = fault_params(raw)?.ok_or_else(|| {
        report!(errors::ConnectorError::ResponseDeserializationFailed)
            .attach_printable("Borgun error reply is neither a reply document nor a SOAP fault")
    })?;
    let fault = |name: &str| {
        params
            .get(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    let message = fault("faultstring").unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string());
    let code = fault("faultcode").unwrap_or_else(|| status_code.to_string());
    let attempt_status = message
        .contains(INVALID_CREDENTIALS_FAULT)
        .then_some(AttemptStatus::AuthenticationFailed);
    Ok(ErrorResponse {
        code,
        message,
        reason: None,
        status_code,
        attempt_status,
        connector_transaction_id: None,
        params,
    })
}

/// Children of the first `Fault` element, names lowercased. `None` when the document
/// holds no fault.
fn fault_params(document: &str) -> Result<Option<Map<String, Value>>, Error> {
    let mut reader = quick_xml::Reader::from_str(document);
    reader.trim_text(true);

    let mut params = Map::new();
    let mut fault_depth = None;
    let mut child = None;
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        match reader
            .read_event()
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?
        {
            Event::Start(element) => {
                depth += 1;
                let name =
                    String::from_utf8_lossy(element.local_name().as_ref()).to_lowercase();
                match fault_depth {
                    None if name == "fault" => fault_depth = Some(depth),
                    Some(root) if depth == root + 1 => child = Some(name),
                    _ => {}
                }
                text.clear();
            }
            Event::Text(content) => {
                let value = content
                    .unescape()
                    .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
                text.push_str(&value);
            }
            Event::End(_) => {
                if let Some(root) = fault_depth {
                    if depth == root {
                        return Ok(Some(params));
                    }
                    if depth == root + 1 {
                        if let Some(name) = child.take() {
                            params.insert(name, Value::String(text.clone()));
                        }
                    }
                }
                depth = depth.saturating_sub(1);
                text.clear();
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn reply_fragment<'a>(document: &'a str, element: &str) -> Option<&'a str> {
    let start = document.find(&format!("<{element}"))?;
    let closing = format!("</{element}>");
    let end = document[start..].find(&closing)? + start + closing.len();
    document.get(start..end)
}

fn flatten_reply(fragment: &str) -> Result<Map<String, Value>, Error> {
    let mut reader = quick_xml::Reader::from_str(fragment);
    reader.trim_text(true);

    let mut params = Map::new();
    // element names below the reply root, with whether each has element children
    let mut path: Vec<(String, bool)> = Vec::new();
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        match reader
            .read_event()
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?
        {
            Event::Start(element) => {
                depth += 1;
                if depth > 1 {
                    if let Some(parent) = path.last_mut() {
                        parent.1 = true;
                    }
                    let name = String::from_utf8_lossy(element.local_name().as_ref())
                        .to_lowercase();
                    path.push((name, false));
                }
                text.clear();
            }
            Event::Empty(element) => {
                let name =
                    String::from_utf8_lossy(element.local_name().as_ref()).to_lowercase();
                if let Some(parent) = path.last_mut() {
                    parent.1 = true;
                }
                let key = match path.first() {
                    Some((parent, _)) if path.len() == 1 => format!("{parent}_{name}"),
                    _ => name,
                };
                if path.len() <= 1 {
                    params.insert(key, Value::String(String::new()));
                }
            }
            Event::Text(content) => {
                let value = content
                    .unescape()
                    .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
                text.push_str(&value);
            }
            Event::CData(content) => {
                text.push_str(&String::from_utf8_lossy(&content.into_inner()));
            }
            Event::End(_) => {
                if depth > 1 {
                    if let Some((name, has_children)) = path.pop() {
                        match path.len() {
                            0 if !has_children => {
                                params.insert(name, Value::String(text.clone()));
                            }
                            1 => {
                                let parent = path.first().map(|(parent, _)| parent.as_str());
                                params.insert(
                                    format!("{}_{name}", parent.unwrap_or_default()),
                                    Value::String(text.clone()),
                                );
                            }
                            _ => {}
                        }
                    }
                }
                depth = depth.saturating_sub(1);
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(params)
}

impl<'a, F, Req> TryFrom<ResponseRouterData<'a, BorgunResponse, RouterDataV2<F, Req>>>
    for ProcessorReply
where
    F: FlowMarker,
    Req: RequestCurrency,
{
    type Error = Error;
    fn try_from(
        item: ResponseRouterData<'a, BorgunResponse, RouterDataV2<F, Req>>,
    ) -> Result<Self, Self::Error> {
        let response = item.response;
        if !response.is_approved() {
            return Ok(Self::rejected(
                ReplyVerdict::Declined,
                utils::refused_status(F::NAME),
                response.failure_message(),
                response.action_code().map(str::to_string),
                response.params,
            ));
        }

        let authorization = response.authorization(item.router_data.request.request_currency());
        Ok(Self::approved(
            utils::approved_status(F::NAME),
            authorization,
            response.params,
        ))
    }
}
