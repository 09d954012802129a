//! Errors and error specific types for universal use

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Parsing Errors
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
    #[error("Failed to serialize to {0} format")]
    EncodeError(&'static str),
    #[error("Failed to convert i64 to Decimal")]
    I64ToDecimalConversionFailure,
    #[error("Failed to convert Decimal to i64")]
    DecimalToI64ConversionFailure,
    #[error("Failed to convert Float to Decimal")]
    FloatToDecimalConversionFailure,
    #[error("Failed to convert String to Decimal: {error}")]
    StringToDecimalConversionFailure { error: String },
}

/// Validation errors.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ValidationError {
    /// An invalid input was provided.
    #[error("{message}")]
    InvalidValue { message: String },
}

/// Cryptographic algorithm errors
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The cryptographic algorithm was unable to sign the message
    #[error("Failed to sign message")]
    MessageSigningFailed,
}
