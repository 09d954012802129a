use crate::transcript::WireTranscript;

/// Failures raised by an adapter while mapping a call to or from its processor's wire format
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("Missing connector transaction ID")]
    MissingConnectorTransactionID,
    #[error("Authorization token could not be decoded")]
    InvalidAuthorizationToken,
    #[error("Failed to convert amount to required type")]
    AmountConversionFailed,
    #[error("Requested amount {requested} exceeds the authorized amount {authorized}")]
    AmountExceedsAuthorized { requested: i64, authorized: i64 },
    #[error("Amount must not be negative")]
    NegativeAmount,
    #[error("{0} is not implemented")]
    NotImplemented(String),
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
}

impl ConnectorError {
    /// Errors the adapter raises because the caller's input cannot be sent, as opposed
    /// to faults in the adapter or its configuration.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. }
                | Self::MissingConnectorTransactionID
                | Self::InvalidAuthorizationToken
                | Self::AmountExceedsAuthorized { .. }
                | Self::NegativeAmount
                | Self::NotSupported { .. }
        )
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("Unable to parse the URL")]
    UrlEncodingFailed,
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Failed to encode the request body")]
    BodySerializationFailed,
    #[error("Failed to send request to the processor: {0}")]
    RequestNotSent(String),
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Received unexpected response status {0}")]
    UnexpectedServerResponse(u16),
}

impl ApiClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestTimeoutReceived)
    }
}

/// Outcome category of one gateway operation
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Success,
    Declined,
    ProcessorError,
    AuthenticationError,
    TransportError,
    MalformedResponse,
    InvalidRequest,
}

impl ErrorKind {
    /// Authentication and transport failures are raised to the caller, every other
    /// kind is reported inside a failed response.
    pub fn is_raised(self) -> bool {
        matches!(self, Self::AuthenticationError | Self::TransportError)
    }
}

/// Errors surfaced to callers of the gateway operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Processor rejected the credentials (HTTP {status_code})")]
    Authentication { status_code: u16, body: String },
    #[error("Transport failure: {reason}")]
    Transport {
        reason: String,
        transcript: WireTranscript,
    },
    #[error("{operation} is not supported by {connector}")]
    OperationNotSupported {
        operation: String,
        connector: &'static str,
    },
    #[error("Invalid gateway configuration: {0}")]
    Configuration(String),
    #[error("Internal gateway error")]
    Internal,
}

impl GatewayError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Authentication { .. } => Some(ErrorKind::AuthenticationError),
            Self::Transport { .. } => Some(ErrorKind::TransportError),
            Self::OperationNotSupported { .. } | Self::Configuration(_) | Self::Internal => None,
        }
    }
}
