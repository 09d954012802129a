pub mod configs;
pub mod gateway_client;

pub use configs::Config;
pub use gateway_client::GatewayClient;

// Re-export the types callers build requests from and read results out of.
pub use common_enums::{CaptureMethod, Currency};
pub use common_utils::{types::Money, MinorUnit};
pub use domain_types::{
    errors::{ErrorKind, GatewayError},
    payment_method_data::{Card, PaymentInstrument, StoredToken},
    router_data::ConnectorAuthType,
    router_request_types::{Address, OperationOptions},
    router_response_types::GatewayResponse,
    transcript::ScrubRules,
    types::ConnectorEnum,
};
pub use external_services::logger;
