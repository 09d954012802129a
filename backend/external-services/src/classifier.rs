//! Sorts every way an exchange with a processor can end into an [`ErrorKind`], and
//! turns the adapter's reading of a reply into the canonical [`GatewayResponse`].

use common_enums::AttemptStatus;
use common_utils::{consts, errors::CustomResult};
use domain_types::{
    errors::{ErrorKind, GatewayError},
    router_data::ErrorResponse,
    router_response_types::{GatewayResponse, ProcessorReply, ReplyVerdict, Response},
};
use error_stack::{report, ResultExt};

/// What the transport managed to do with the request
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportOutcome {
    /// A reply with this status arrived
    Delivered { status_code: u16 },
    /// Timeout, reset or an unreadable reply
    Failed,
}

/// What the adapter made of the reply body
#[derive(Clone, Copy, Debug)]
pub enum ParsedBody<'a> {
    Reply(&'a ProcessorReply),
    ErrorObject(&'a ErrorResponse),
    Unreadable,
}

pub fn is_credential_status(status_code: u16) -> bool {
    matches!(status_code, 401 | 403)
}

pub fn classify(outcome: TransportOutcome, body: ParsedBody<'_>) -> ErrorKind {
    let status_code = match outcome {
        TransportOutcome::Failed => return ErrorKind::TransportError,
        TransportOutcome::Delivered { status_code } => status_code,
    };
    if is_credential_status(status_code) {
        return ErrorKind::AuthenticationError;
    }
    match body {
        ParsedBody::Unreadable => ErrorKind::MalformedResponse,
        ParsedBody::ErrorObject(error) => match error.attempt_status {
            Some(AttemptStatus::AuthenticationFailed) => ErrorKind::AuthenticationError,
            _ => ErrorKind::ProcessorError,
        },
        ParsedBody::Reply(reply) => match reply.verdict {
            ReplyVerdict::Approved => ErrorKind::Success,
            ReplyVerdict::Declined => ErrorKind::Declined,
            ReplyVerdict::Error => ErrorKind::ProcessorError,
            ReplyVerdict::CredentialsRejected => ErrorKind::AuthenticationError,
        },
    }
}

/// Raises the kinds that are raised and reports every other kind against the reply the
/// adapter read. Without a reply the body is reported as malformed.
pub fn conclude(
    kind: ErrorKind,
    reply: Option<ProcessorReply>,
    response: &Response,
    test: bool,
) -> CustomResult<GatewayResponse, GatewayError> {
    let status_code = response.status_code;
    if kind.is_raised() {
        if kind != ErrorKind::AuthenticationError {
            return Err(report!(GatewayError::Internal)
                .attach_printable(format!("{kind} raised for a delivered reply")));
        }
        return Err(report!(GatewayError::Authentication {
            status_code,
            body: String::from_utf8_lossy(&response.response).into_owned(),
        }));
    }
    match reply {
        Some(reply) if kind != ErrorKind::MalformedResponse => {
            into_gateway_response(kind, reply, status_code, test)
        }
        _ => Ok(GatewayResponse::malformed(status_code, &response.response, test)),
    }
}

/// Builds the canonical response for a kind that is reported rather than raised.
pub fn into_gateway_response(
    kind: ErrorKind,
    reply: ProcessorReply,
    status_code: u16,
    test: bool,
) -> CustomResult<GatewayResponse, GatewayError> {
    let authorization = reply
        .authorization
        .as_ref()
        .filter(|reference| !reference.is_empty())
        .map(|reference| reference.encode())
        .transpose()
        .change_context(GatewayError::Internal)
        .attach_printable("Failed to encode the authorization token")?;

    let success = kind == ErrorKind::Success;
    let message = if success {
        consts::SUCCESS_MESSAGE.to_string()
    } else {
        reply
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string())
    };

    Ok(GatewayResponse {
        success,
        message,
        error_code: if success { None } else { reply.error_code },
        authorization,
        params: reply.params,
        test,
        kind,
        status_code,
    })
}

#[cfg(test)]
mod tests {
    use common_enums::Currency;
    use domain_types::authorization::{AuthorizationReference, LegacyLayout};

    use super::*;

    fn approved() -> ProcessorReply {
        ProcessorReply::approved(
            AttemptStatus::Charged,
            Some(AuthorizationReference::new("txn-1", Some(Currency::USD))),
            serde_json::Map::new(),
        )
    }

    #[test]
    fn transport_failure_wins_over_any_body() {
        let reply = approved();
        assert_eq!(
            classify(TransportOutcome::Failed, ParsedBody::Reply(&reply)),
            ErrorKind::TransportError
        );
    }

    #[test]
    fn credential_statuses_are_authentication_errors() {
        for status_code in [401, 403] {
            assert_eq!(
                classify(
                    TransportOutcome::Delivered { status_code },
                    ParsedBody::Unreadable
                ),
                ErrorKind::AuthenticationError
            );
        }
    }

    #[test]
    fn verdicts_map_onto_kinds() {
        let delivered = TransportOutcome::Delivered { status_code: 200 };
        let declined = ProcessorReply::rejected(
            ReplyVerdict::Declined,
            AttemptStatus::AuthorizationFailed,
            "Error with ActionCode=121".to_string(),
            Some("121".to_string()),
            serde_json::Map::new(),
        );
        let refused = ProcessorReply {
            verdict: ReplyVerdict::CredentialsRejected,
            ..declined.clone()
        };
        assert_eq!(
            classify(delivered, ParsedBody::Reply(&approved())),
            ErrorKind::Success
        );
        assert_eq!(
            classify(delivered, ParsedBody::Reply(&declined)),
            ErrorKind::Declined
        );
        assert_eq!(
            classify(delivered, ParsedBody::Reply(&refused)),
            ErrorKind::AuthenticationError
        );
        assert_eq!(
            classify(delivered, ParsedBody::ErrorObject(&ErrorResponse::default())),
            ErrorKind::ProcessorError
        );
        assert_eq!(
            classify(delivered, ParsedBody::Unreadable),
            ErrorKind::MalformedResponse
        );
    }

    #[test]
    fn error_object_with_refused_credentials_is_an_authentication_error() {
        let refused = ErrorResponse {
            status_code: 500,
            attempt_status: Some(AttemptStatus::AuthenticationFailed),
            ..ErrorResponse::default()
        };
        assert_eq!(
            classify(
                TransportOutcome::Delivered { status_code: 500 },
                ParsedBody::ErrorObject(&refused)
            ),
            ErrorKind::AuthenticationError
        );
    }

    fn response(status_code: u16, body: &'static [u8]) -> Response {
        Response {
            headers: None,
            response: bytes::Bytes::from_static(body),
            status_code,
        }
    }

    #[test]
    fn conclude_raises_authentication_with_the_body() {
        let error = conclude(
            ErrorKind::AuthenticationError,
            None,
            &response(401, b"denied"),
            false,
        )
        .unwrap_err();
        match error.current_context() {
            GatewayError::Authentication { status_code, body } => {
                assert_eq!(*status_code, 401);
                assert_eq!(body, "denied");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn conclude_reports_a_missing_reply_as_malformed() {
        let concluded = conclude(
            ErrorKind::MalformedResponse,
            None,
            &response(200, b"<html>"),
            true,
        )
        .unwrap();
        assert!(!concluded.success);
        assert_eq!(concluded.kind, ErrorKind::MalformedResponse);
        assert_eq!(concluded.status_code, 200);
    }

    #[test]
    fn conclude_reports_a_decline() {
        let declined = ProcessorReply::rejected(
            ReplyVerdict::Declined,
            AttemptStatus::AuthorizationFailed,
            "Error with ActionCode=121".to_string(),
            Some("121".to_string()),
            serde_json::Map::new(),
        );
        let concluded = conclude(
            ErrorKind::Declined,
            Some(declined),
            &response(200, b""),
            false,
        )
        .unwrap();
        assert_eq!(concluded.kind, ErrorKind::Declined);
        assert_eq!(concluded.error_code.as_deref(), Some("121"));
    }

    #[test]
    fn success_carries_the_encoded_token() {
        let response =
            into_gateway_response(ErrorKind::Success, approved(), 200, true).unwrap();
        assert!(response.success);
        assert_eq!(response.message, "Succeeded");
        assert_eq!(response.error_code, None);
        let token = response.authorization.unwrap();
        let decoded = AuthorizationReference::decode(&token, LegacyLayout::single()).unwrap();
        assert_eq!(decoded.transaction_id, "txn-1");
    }

    #[test]
    fn failure_keeps_the_processor_message_and_code() {
        let reply = ProcessorReply::rejected(
            ReplyVerdict::Error,
            AttemptStatus::Failure,
            String::new(),
            Some("E42".to_string()),
            serde_json::Map::new(),
        );
        let response =
            into_gateway_response(ErrorKind::ProcessorError, reply, 200, false).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "No error message");
        assert_eq!(response.error_code.as_deref(), Some("E42"));
        assert_eq!(response.authorization, None);
    }
}
