pub mod classifier;
pub mod http_client;
pub mod logger;
pub mod service;

pub use service::*;
