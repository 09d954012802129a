//! Message signing primitives used by connectors that authenticate requests with a MAC

use error_stack::ResultExt;
use ring::hmac;

use crate::errors::{self, CustomResult};

/// Trait for cryptographically signing messages
pub trait SignMessage {
    /// Takes in a secret and a message and returns the calculated signature as bytes
    fn sign_message(
        &self,
        secret: &[u8],
        msg: &[u8],
    ) -> CustomResult<Vec<u8>, errors::CryptoError>;
}

/// Represents the HMAC-SHA-256 algorithm
#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSha256;

impl SignMessage for HmacSha256 {
    fn sign_message(
        &self,
        secret: &[u8],
        msg: &[u8],
    ) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::sign(&key, msg).as_ref().to_vec())
    }
}

/// Signs `msg` and renders the digest with the standard base64 alphabet
pub fn sign_base64(
    algorithm: &impl SignMessage,
    secret: &[u8],
    msg: &[u8],
) -> CustomResult<String, errors::CryptoError> {
    use base64::Engine;

    algorithm
        .sign_message(secret, msg)
        .attach_printable("hmac signing failed")
        .map(|signature| crate::consts::BASE64_ENGINE.encode(signature))
}
