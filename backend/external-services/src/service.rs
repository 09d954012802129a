use common_utils::{errors::CustomResult, request::RequestContent};
use domain_types::{
    connector_flow::FlowMarker,
    errors::{ConnectorError, GatewayError},
    router_data_v2::RouterDataV2,
    router_response_types::{GatewayResponse, ProcessorReply, Response},
    transcript::{ScrubRules, WireTranscript},
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ErasedMaskSerialize, Maskable};
use interfaces::{
    connector_integration_v2::BoxedConnectorIntegrationV2, transport::ConnectorTransport,
};
use serde_json::{json, Value};
use tracing::field::Empty;

use crate::classifier::{self, ParsedBody, TransportOutcome};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Runs one flow against its processor: builds the request, sends it, and turns
/// whatever came back into a [`GatewayResponse`] or a raised [`GatewayError`].
#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        connector = Empty,
        operation = Empty,
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.error_message = Empty,
        response.status_code = Empty,
        message_ = "Golden Log Line (outgoing)",
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<F, Req>(
    transport: &dyn ConnectorTransport,
    connector: BoxedConnectorIntegrationV2<'_, F, Req>,
    router_data: &RouterDataV2<F, Req>,
    scrub_rules: &ScrubRules,
) -> CustomResult<GatewayResponse, GatewayError>
where
    F: FlowMarker + 'static,
    Req: 'static,
{
    let start = tokio::time::Instant::now();
    let test = router_data.resource_common_data.test_mode;
    let span = tracing::Span::current();
    span.record("connector", connector.id());
    span.record("operation", tracing::field::display(F::NAME));

    let request = match connector.build_request_v2(router_data) {
        Ok(Some(request)) => request,
        Ok(None) => {
            return Err(report!(GatewayError::Internal).attach_printable(format!(
                "{} produced no request for {}",
                connector.id(),
                F::NAME
            )));
        }
        Err(error) if error.current_context().is_invalid_request() => {
            tracing::info!(?error, "request refused before sending");
            return Ok(GatewayResponse::invalid_request(
                error.current_context().to_string(),
                test,
            ));
        }
        Err(error) => return Err(error.change_context(GatewayError::Internal)),
    };

    let masked_headers = request
        .headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => Value::String("*** alloc::string::String ***".to_string()),
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    span.record(
        "request.headers",
        tracing::field::display(Value::Object(masked_headers)),
    );
    let masked_request = match request.body.as_ref() {
        Some(RequestContent::Json(i)) => (**i)
            .masked_serialize()
            .unwrap_or(json!({ "error": "failed to mask serialize connector request"})),
        Some(RequestContent::RawBytes(_)) => json!({"request_type": "RAW_BYTES"}),
        None => Value::Null,
    };
    span.record("request.body", tracing::field::display(&masked_request));
    span.record("request.url", tracing::field::display(&request.url));
    span.record("request.method", tracing::field::display(request.method));

    let mut transcript = WireTranscript::new();
    let sent = transport.send(request, &mut transcript).await;
    let transcript = scrub_rules.scrub(&transcript);
    debug_log("WIRE_TRANSCRIPT", &json!(transcript.to_text()));

    let result = match sent {
        Err(error) => {
            let kind = classifier::classify(TransportOutcome::Failed, ParsedBody::Unreadable);
            let reason = error.current_context().to_string();
            error_log(
                "NETWORK_ERROR",
                &json!(format!("Failed getting response from connector. Error: {reason}")),
            );
            span.record("response.error_message", tracing::field::display(&reason));
            Err(error
                .change_context(GatewayError::Transport { reason, transcript })
                .attach_printable(kind))
        }
        Ok(Ok(body)) => {
            let body = strip_bom(body);
            span.record("response.status_code", body.status_code);
            handle_success_reply(&connector, router_data, body, test)
        }
        Ok(Err(body)) => {
            let body = strip_bom(body);
            span.record("response.status_code", body.status_code);
            handle_error_reply(&connector, body, test)
        }
    };

    if let Ok(response) = &result {
        if !response.success {
            span.record(
                "response.error_message",
                tracing::field::display(&response.message),
            );
        }
    }
    span.record("latency", start.elapsed().as_millis());
    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

fn handle_success_reply<F, Req>(
    connector: &BoxedConnectorIntegrationV2<'_, F, Req>,
    router_data: &RouterDataV2<F, Req>,
    body: Response,
    test: bool,
) -> CustomResult<GatewayResponse, GatewayError>
where
    F: FlowMarker + 'static,
    Req: 'static,
{
    let outcome = TransportOutcome::Delivered {
        status_code: body.status_code,
    };
    let reply = match connector.handle_response_v2(router_data, body.clone()) {
        Ok(reply) => Some(reply),
        Err(error) if is_unreadable(error.current_context()) => {
            tracing::warn!(?error, "processor response could not be parsed");
            None
        }
        Err(error) => return Err(error.change_context(GatewayError::Internal)),
    };

    let kind = match &reply {
        Some(reply) => classifier::classify(outcome, ParsedBody::Reply(reply)),
        None => classifier::classify(outcome, ParsedBody::Unreadable),
    };
    classifier::conclude(kind, reply, &body, test)
}

fn handle_error_reply<F, Req>(
    connector: &BoxedConnectorIntegrationV2<'_, F, Req>,
    body: Response,
    test: bool,
) -> CustomResult<GatewayResponse, GatewayError>
where
    F: 'static,
    Req: 'static,
{
    let status_code = body.status_code;
    let outcome = TransportOutcome::Delivered { status_code };
    let parsed = match status_code {
        500..=511 => connector.get_5xx_error_response(body.clone()),
        _ => connector.get_error_response_v2(body.clone()),
    };
    let error = match parsed {
        Ok(error) => Some(error),
        Err(error)
            if is_unreadable(error.current_context())
                || classifier::is_credential_status(status_code) =>
        {
            tracing::warn!(?error, "processor error body could not be parsed");
            None
        }
        Err(error) => return Err(error.change_context(GatewayError::Internal)),
    };

    let kind = match &error {
        Some(error) => classifier::classify(outcome, ParsedBody::ErrorObject(error)),
        None => classifier::classify(outcome, ParsedBody::Unreadable),
    };
    classifier::conclude(kind, error.map(ProcessorReply::from), &body, test)
}

fn is_unreadable(error: &ConnectorError) -> bool {
    matches!(
        error,
        ConnectorError::ResponseDeserializationFailed | ConnectorError::ResponseHandlingFailed
    )
}

/// Drops a leading UTF-8 byte order mark so adapters can parse the body as is.
pub fn strip_bom(mut response: Response) -> Response {
    if response.response.starts_with(UTF8_BOM) {
        response.response = response.response.slice(UTF8_BOM.len()..);
    }
    response
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn debug_log(action: &str, message: &Value) {
    tracing::debug!(tags = %action, json_value= %message);
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}
