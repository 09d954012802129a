use common_utils::{errors::CustomResult, request::Request};
use domain_types::{
    errors::ApiClientError, router_response_types::Response, transcript::WireTranscript,
};

/// Sends one request and records the exchange into `transcript`.
///
/// 2xx replies come back as `Ok(Ok(_))`, other statuses as `Ok(Err(_))`. Faults that
/// leave no reply (timeouts, resets, undecodable bodies) are `Err`.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn send(
        &self,
        request: Request,
        transcript: &mut WireTranscript,
    ) -> CustomResult<Result<Response, Response>, ApiClientError>;
}
