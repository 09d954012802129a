use error_stack::ResultExt;
use hyperswitch_masking::{Maskable, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError};

pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

fn default_request_headers() -> [(String, Maskable<String>); 1] {
    use http::header;

    [(header::VIA.to_string(), "PaymentsGateway".to_string().into())]
}

#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
            Self::RawBytes(_) => "RawBytesRequestBody",
        })
    }
}

#[derive(Serialize)]
pub enum RequestContent {
    Json(Box<dyn hyperswitch_masking::ErasedMaskSerialize + Send>),
    /// Pre-rendered payloads such as SOAP envelopes
    RawBytes(Vec<u8>),
}

impl RequestContent {
    /// The body as it goes on the wire, secrets included
    pub fn get_inner_value(&self) -> CustomResult<Secret<String>, ParsingError> {
        match self {
            Self::Json(i) => serde_json::to_string(&i)
                .map(Secret::new)
                .change_context(ParsingError::EncodeError("json")),
            Self::RawBytes(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned().into()),
        }
    }

    pub fn get_body_bytes(&self) -> CustomResult<Vec<u8>, ParsingError> {
        use hyperswitch_masking::ExposeInterface;
        match self {
            Self::RawBytes(bytes) => Ok(bytes.clone()),
            Self::Json(_) => Ok(self.get_inner_value()?.expose().into_bytes()),
        }
    }
}

impl Request {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    /// Header values with secrets exposed, for handing to the HTTP client only.
    pub fn get_headers_map(&self) -> std::collections::HashMap<String, String> {
        use hyperswitch_masking::PeekInterface;
        let mut map = std::collections::HashMap::new();
        for (k, v) in &self.headers {
            let val = match v {
                Maskable::Masked(s) => s.peek().to_string(),
                Maskable::Normal(s) => s.to_string(),
            };
            map.insert(k.clone(), val);
        }
        map
    }

}

#[derive(Debug)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn attach_default_headers(mut self) -> Self {
        self.headers.extend(default_request_headers());
        self
    }

    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.insert((header.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn set_optional_body<T: Into<RequestContent>>(mut self, body: Option<T>) -> Self {
        body.map(|body| self.body.replace(body.into()));
        self
    }

    pub fn set_body<T: Into<RequestContent>>(mut self, body: T) -> Self {
        self.body.replace(body.into());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
