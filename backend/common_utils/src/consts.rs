//! Commonly used constants

/// Default error code when a connector does not send one
pub const NO_ERROR_CODE: &str = "No error code";

/// Default error message when a connector does not send one
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Message carried by every successful canonical response
pub const SUCCESS_MESSAGE: &str = "Succeeded";

/// Replacement text for redacted transcript values
pub const REDACTION_MARKER: &str = "[FILTERED]";

/// Placeholder used when logging masked header values
pub const MASKED_HEADER_VALUE: &str = "*** alloc::string::String ***";

/// Prefix of environment variables overriding configuration
pub const ENV_PREFIX: &str = "GATEWAY";

/// Environment variable selecting the run environment
pub const RUN_ENV: &str = "GATEWAY_ENV";

/// General purpose base64 engine
pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Environments the client may run in
#[derive(
    Debug,
    Copy,
    Default,
    Clone,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Reads the environment from `GATEWAY_ENV`, falling back to development.
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// File name of the configuration for this environment.
    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
