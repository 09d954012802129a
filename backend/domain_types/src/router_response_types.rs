use common_enums::AttemptStatus;
use serde::Serialize;

use crate::{authorization::AuthorizationReference, errors::ErrorKind, router_data::ErrorResponse};

/// Raw reply as the transport received it
#[derive(Clone, Debug)]
pub struct Response {
    /// headers
    pub headers: Option<http::HeaderMap>,
    /// response
    pub response: bytes::Bytes,
    /// status code
    pub status_code: u16,
}

/// How the processor judged a reply it returned with a 2xx status
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReplyVerdict {
    Approved,
    Declined,
    /// The processor reported an error object or code
    Error,
    /// The body says the credentials were refused
    CredentialsRejected,
}

/// An adapter's normalized reading of one processor reply
#[derive(Clone, Debug)]
pub struct ProcessorReply {
    pub verdict: ReplyVerdict,
    pub status: AttemptStatus,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub authorization: Option<AuthorizationReference>,
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl ProcessorReply {
    pub fn approved(
        status: AttemptStatus,
        authorization: Option<AuthorizationReference>,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            verdict: ReplyVerdict::Approved,
            status,
            message: None,
            error_code: None,
            authorization,
            params,
        }
    }

    pub fn rejected(
        verdict: ReplyVerdict,
        status: AttemptStatus,
        message: String,
        error_code: Option<String>,
        params: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            verdict,
            status,
            message: Some(message),
            error_code,
            authorization: None,
            params,
        }
    }
}

impl From<ErrorResponse> for ProcessorReply {
    fn from(error: ErrorResponse) -> Self {
        let verdict = match error.attempt_status {
            Some(AttemptStatus::AuthenticationFailed) => ReplyVerdict::CredentialsRejected,
            _ => ReplyVerdict::Error,
        };
        Self {
            verdict,
            status: error.attempt_status.unwrap_or(AttemptStatus::Failure),
            message: Some(error.reason.unwrap_or(error.message)),
            error_code: Some(error.code),
            authorization: None,
            params: error.params,
        }
    }
}

/// The canonical result of every gateway operation
#[derive(Clone, Debug, Serialize)]
pub struct GatewayResponse {
    pub success: bool,
    pub message: String,
    pub error_code: Option<String>,
    /// Token to hand back to capture, refund or void
    pub authorization: Option<String>,
    pub params: serde_json::Map<String, serde_json::Value>,
    pub test: bool,
    pub kind: ErrorKind,
    pub status_code: u16,
}

impl GatewayResponse {
    /// A failure produced locally, before anything was sent
    pub fn invalid_request(message: impl Into<String>, test: bool) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_code: None,
            authorization: None,
            params: serde_json::Map::new(),
            test,
            kind: ErrorKind::InvalidRequest,
            status_code: 0,
        }
    }

    pub fn malformed(status_code: u16, body: &[u8], test: bool) -> Self {
        let mut params = serde_json::Map::new();
        params.insert(
            "raw_body".to_string(),
            serde_json::Value::String(String::from_utf8_lossy(body).into_owned()),
        );
        Self {
            success: false,
            message: "Unable to read the processor response".to_string(),
            error_code: None,
            authorization: None,
            params,
            test,
            kind: ErrorKind::MalformedResponse,
            status_code,
        }
    }
}
