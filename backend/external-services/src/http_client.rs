use std::{str::FromStr, time::Duration};

use common_utils::{
    errors::CustomResult,
    request::{Headers, Method, Request},
};
use domain_types::{
    errors::ApiClientError,
    router_response_types::Response,
    transcript::{Direction, WireTranscript},
    types::{HttpOptions, Proxy},
};
use error_stack::{report, ResultExt};
use interfaces::transport::ConnectorTransport;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::json;

use crate::service::info_log;

/// [`ConnectorTransport`] over a pooled `reqwest` client.
///
/// Each instance owns its clients, so TLS strictness, timeouts and proxies set at
/// construction apply to that instance only.
#[derive(Debug)]
pub struct ReqwestTransport {
    proxy: Proxy,
    options: HttpOptions,
    non_proxied_client: OnceCell<Client>,
    proxied_client: OnceCell<Client>,
}

impl ReqwestTransport {
    pub fn new(proxy: Proxy, options: HttpOptions) -> Self {
        Self {
            proxy,
            options,
            non_proxied_client: OnceCell::new(),
            proxied_client: OnceCell::new(),
        }
    }

    fn get_client(&self, should_bypass_proxy: bool) -> CustomResult<Client, ApiClientError> {
        let cell = match self.proxy.cache_key(should_bypass_proxy) {
            Some(_) => &self.proxied_client,
            None => &self.non_proxied_client,
        };
        Ok(cell
            .get_or_try_init(|| {
                self.get_client_builder(should_bypass_proxy)?
                    .build()
                    .change_context(ApiClientError::ClientConstructionFailed)
                    .inspect_err(|err| {
                        info_log(
                            "ERROR",
                            &json!(format!("Failed to construct base client. Error: {:?}", err)),
                        );
                    })
            })?
            .clone())
    }

    fn get_client_builder(
        &self,
        should_bypass_proxy: bool,
    ) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
        let mut client_builder = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(!self.options.strict_tls)
            .connect_timeout(Duration::from_secs(self.options.connect_timeout_secs))
            .timeout(Duration::from_secs(self.options.request_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(
                self.proxy.idle_pool_connection_timeout.unwrap_or_default(),
            ));

        if should_bypass_proxy {
            return Ok(client_builder);
        }

        if let Some(url) = self.proxy.https_url.as_ref() {
            client_builder = client_builder.proxy(
                reqwest::Proxy::https(url)
                    .change_context(ApiClientError::InvalidProxyConfiguration)
                    .attach_printable("HTTPS proxy configuration error")?,
            );
        }

        if let Some(url) = self.proxy.http_url.as_ref() {
            client_builder = client_builder.proxy(
                reqwest::Proxy::http(url)
                    .change_context(ApiClientError::InvalidProxyConfiguration)
                    .attach_printable("HTTP proxy configuration error")?,
            );
        }

        Ok(client_builder)
    }

    async fn call_connector_api(
        &self,
        request: Request,
        transcript: &mut WireTranscript,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let url =
            reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;
        let client = self.get_client(self.proxy.should_bypass(url.as_str()))?;

        record_request(&request, transcript)?;

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        };
        let body = request
            .body
            .as_ref()
            .map(|body| body.get_body_bytes())
            .transpose()
            .change_context(ApiClientError::BodySerializationFailed)?;
        let headers = request.headers.construct_header_map()?;

        let mut builder = client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|error| {
            let api_error = match error {
                error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
                error => ApiClientError::RequestNotSent(error.to_string()),
            };
            info_log(
                "REQUEST_FAILURE",
                &json!("Unable to send request to connector."),
            );
            report!(api_error)
        })?;

        handle_response(response, transcript).await
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for ReqwestTransport {
    async fn send(
        &self,
        request: Request,
        transcript: &mut WireTranscript,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        self.call_connector_api(request, transcript).await
    }
}

/// Writes the request line, headers and body into the transcript, secrets exposed.
/// The transcript is scrubbed before anything reads it.
pub fn record_request(
    request: &Request,
    transcript: &mut WireTranscript,
) -> CustomResult<(), ApiClientError> {
    use hyperswitch_masking::ExposeInterface;

    let mut lines = vec![format!("{} {}", request.method, request.url)];
    let mut headers: Vec<_> = request.get_headers_map().into_iter().collect();
    headers.sort();
    lines.extend(
        headers
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}")),
    );
    if let Some(body) = request.body.as_ref() {
        lines.push(String::new());
        let body = body
            .get_inner_value()
            .change_context(ApiClientError::BodySerializationFailed)?;
        lines.push(body.expose());
    }
    transcript.record(Direction::Request, lines.join("\n"));
    Ok(())
}

pub fn record_response(response: &Response, transcript: &mut WireTranscript) {
    transcript.record(
        Direction::Response,
        format!(
            "HTTP {}\n\n{}",
            response.status_code,
            String::from_utf8_lossy(&response.response)
        ),
    );
}

async fn handle_response(
    resp: reqwest::Response,
    transcript: &mut WireTranscript,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = resp.status().as_u16();
    let headers = Some(resp.headers().to_owned());
    if !matches!(status_code, 200..=299 | 400..=599) {
        info_log(
            "UNEXPECTED_RESPONSE",
            &json!("Unexpected response from server."),
        );
        return Err(report!(ApiClientError::UnexpectedServerResponse(status_code)));
    }

    let response = resp.bytes().await.map_err(|error| {
        let api_error = if error.is_timeout() {
            ApiClientError::RequestTimeoutReceived
        } else {
            ApiClientError::ResponseDecodingFailed
        };
        report!(error).change_context(api_error)
    })?;
    let response = Response {
        headers,
        response,
        status_code,
    };
    record_response(&response, transcript);

    Ok(match status_code {
        200..=299 => Ok(response),
        _ => Err(response),
    })
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use common_utils::request::{RequestBuilder, RequestContent};
    use hyperswitch_masking::Mask;

    use super::*;

    #[test]
    fn request_record_lists_headers_and_body() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://gateway.test/payments/v1/charges")
            .headers(vec![
                ("Api-Key".to_string(), "key-1".to_string().into_masked()),
                ("Content-Type".to_string(), "application/json".to_string().into()),
            ])
            .set_body(RequestContent::RawBytes(b"{\"a\":1}".to_vec()))
            .build();
        let mut transcript = WireTranscript::new();
        record_request(&request, &mut transcript).unwrap();

        assert_eq!(
            transcript.entries()[0].text,
            "POST https://gateway.test/payments/v1/charges\n\
             Api-Key: key-1\n\
             Content-Type: application/json\n\n\
             {\"a\":1}"
        );
    }

    struct OutOfRange;

    impl serde::Serialize for OutOfRange {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("amount out of range"))
        }
    }

    #[test]
    fn body_that_cannot_be_serialized_is_not_recorded_or_sent() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://gateway.test/payments/v1/charges")
            .set_body(RequestContent::Json(Box::new(OutOfRange)))
            .build();
        let mut transcript = WireTranscript::new();
        let error = record_request(&request, &mut transcript).unwrap_err();

        assert_eq!(
            error.current_context(),
            &ApiClientError::BodySerializationFailed
        );
        assert!(transcript.entries().is_empty());
    }

    #[test]
    fn masked_headers_reach_the_wire_exposed() {
        let mut headers = Headers::new();
        headers.insert(("Authorization".to_string(), "Basic abc".to_string().into_masked()));
        let map = headers.construct_header_map().unwrap();
        assert_eq!(map.get("authorization").unwrap(), "Basic abc");
    }

    #[test]
    fn proxy_bypass_skips_proxy_builder() {
        let transport = ReqwestTransport::new(
            Proxy {
                https_url: Some("not a url".to_string()),
                bypass_proxy_urls: vec!["https://gateway.test".to_string()],
                ..Proxy::default()
            },
            HttpOptions::default(),
        );
        assert!(transport.get_client_builder(true).is_ok());
        assert!(transport.get_client_builder(false).is_err());
    }
}
