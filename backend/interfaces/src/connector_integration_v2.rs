//! Per flow request building and response handling for a connector

use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    errors::ConnectorError,
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
    router_response_types::{ProcessorReply, Response},
};
use hyperswitch_masking::Maskable;

use crate::api::ConnectorCommon;

pub type BoxedConnectorIntegrationV2<'a, Flow, Req> =
    Box<&'a (dyn ConnectorIntegrationV2<Flow, Req> + Send + Sync)>;

pub trait ConnectorIntegrationAnyV2<Flow, Req>: Send + Sync + 'static {
    fn get_connector_integration_v2(&self) -> BoxedConnectorIntegrationV2<'_, Flow, Req>;
}

impl<S, Flow, Req> ConnectorIntegrationAnyV2<Flow, Req> for S
where
    S: ConnectorIntegrationV2<Flow, Req> + Send + Sync,
{
    fn get_connector_integration_v2(&self) -> BoxedConnectorIntegrationV2<'_, Flow, Req> {
        Box::new(self)
    }
}

pub trait ConnectorIntegrationV2<Flow, Req>:
    ConnectorIntegrationAnyV2<Flow, Req> + Sync + ConnectorCommon
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Flow, Req>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(vec![])
    }

    fn get_content_type(&self) -> &'static str {
        self.common_get_content_type()
    }

    fn get_http_method(&self) -> Method {
        Method::Post
    }

    fn get_url(&self, _req: &RouterDataV2<Flow, Req>) -> CustomResult<String, ConnectorError> {
        Err(ConnectorError::NotImplemented(format!("url for {}", self.id())).into())
    }

    fn get_request_body(
        &self,
        _req: &RouterDataV2<Flow, Req>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        Ok(None)
    }

    fn build_request_v2(
        &self,
        req: &RouterDataV2<Flow, Req>,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(self.get_http_method())
                .url(self.get_url(req)?.as_str())
                .attach_default_headers()
                .headers(self.get_headers(req)?)
                .set_optional_body(self.get_request_body(req)?)
                .build(),
        ))
    }

    fn handle_response_v2(
        &self,
        _data: &RouterDataV2<Flow, Req>,
        _res: Response,
    ) -> CustomResult<ProcessorReply, ConnectorError> {
        Err(ConnectorError::NotImplemented(format!("response handling for {}", self.id())).into())
    }

    fn get_error_response_v2(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        self.build_error_response(res)
    }

    fn get_5xx_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        let status_code = res.status_code;
        let reason = String::from_utf8_lossy(&res.response).into_owned();
        Ok(self.build_error_response(res).unwrap_or_else(|_| ErrorResponse {
            code: status_code.to_string(),
            message: "Processor returned a server error".to_string(),
            reason: Some(reason),
            status_code,
            ..ErrorResponse::default()
        }))
    }
}
