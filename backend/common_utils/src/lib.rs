//! Utilities shared by the gateway adapter crates

pub mod consts;
pub mod crypto;
pub mod date_time;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;

pub use errors::{CustomResult, ParsingError, ValidationError};
pub use request::{Method, Request, RequestContent};
pub use types::{
    AmountConvertor, FloatMajorUnit, FloatMajorUnitForConnector, MinorUnit, Money,
    StringMinorUnit, StringMinorUnitForConnector,
};
