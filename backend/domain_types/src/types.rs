use serde::{Deserialize, Serialize};

/// Processors with a shipped adapter
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorEnum {
    Commercehub,
    Borgun,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub commercehub: ConnectorParams,
    pub borgun: ConnectorParams,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    /// base url
    #[serde(default)]
    pub base_url: String,
}

impl ConnectorParams {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq, Hash)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    pub fn cache_key(&self, should_bypass_proxy: bool) -> Option<Self> {
        if should_bypass_proxy || (self.http_url.is_none() && self.https_url.is_none()) {
            None
        } else {
            Some(self.clone())
        }
    }

    pub fn should_bypass(&self, url: &str) -> bool {
        self.bypass_proxy_urls
            .iter()
            .any(|bypass| url.starts_with(bypass.as_str()))
    }
}

/// Per client HTTP behaviour, fixed when the client is built
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HttpOptions {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Verify the processor's TLS certificate chain
    pub strict_tls: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            strict_tls: true,
        }
    }
}

/// Data shared by every flow of one call
#[derive(Debug, Clone, Default)]
pub struct GatewayFlowData {
    pub connectors: Connectors,
    pub test_mode: bool,
    /// Order id when the caller supplied one, otherwise generated per call
    pub connector_request_reference_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_cache_key_requires_a_proxy_url() {
        assert_eq!(Proxy::default().cache_key(false), None);
        let proxy = Proxy {
            https_url: Some("http://proxy:3128".to_string()),
            bypass_proxy_urls: vec!["https://internal".to_string()],
            ..Proxy::default()
        };
        assert!(proxy.cache_key(false).is_some());
        assert!(proxy.cache_key(true).is_none());
        assert!(proxy.should_bypass("https://internal/api"));
    }

    #[test]
    fn connector_names_parse_in_snake_case() {
        assert_eq!("borgun".parse::<ConnectorEnum>().ok(), Some(ConnectorEnum::Borgun));
        assert_eq!(ConnectorEnum::Commercehub.to_string(), "commercehub");
        assert!("Borgun".parse::<ConnectorEnum>().is_err());
    }

    #[test]
    fn http_options_default_to_strict_tls() {
        let options: HttpOptions = serde_json::from_str("{}").unwrap();
        assert!(options.strict_tls);
        assert_eq!(options, HttpOptions::default());
    }
}
