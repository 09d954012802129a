pub mod validate;

use std::{fmt, str::FromStr};

use common_utils::errors::ValidationError;
use error_stack::report;
use hyperswitch_masking::{PeekInterface, Secret, Strategy};
use serde::{Deserialize, Deserializer, Serialize};

pub use crate::validate::{CardExpiration, CardNumberValidationErr};

/// Masks a PAN down to its issuer prefix and last four digits
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        if val_str.len() < 15 || val_str.len() > 19 {
            return WithMaskedLength::fmt(val_str, f);
        }

        if let Some(value) = val_str.get(..6) {
            write!(f, "{}{}", value, "*".repeat(val_str.len() - 6))
        } else {
            WithMaskedLength::fmt(val_str, f)
        }
    }
}

struct WithMaskedLength;

impl WithMaskedLength {
    fn fmt(val: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*** {} chars ***", val.len())
    }
}

/// A primary account number that passed the Luhn check
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CardNumber(Secret<String, CardNumberStrategy>);

impl CardNumber {
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect()
    }

    pub fn get_last4(&self) -> String {
        let number = self.0.peek();
        number
            .chars()
            .skip(number.len().saturating_sub(4))
            .collect()
    }

    pub fn get_card_number(&self) -> &str {
        self.0.peek()
    }
}

impl PeekInterface<String> for CardNumber {
    fn peek(&self) -> &String {
        self.0.peek()
    }

    fn peek_mut(&mut self) -> &mut String {
        self.0.peek_mut()
    }
}

impl FromStr for CardNumber {
    type Err = error_stack::Report<ValidationError>;

    fn from_str(card_number: &str) -> Result<Self, Self::Err> {
        let sanitized = validate::sanitize_card_number(card_number).map_err(|err| {
            report!(ValidationError::InvalidValue {
                message: err.to_string()
            })
        })?;
        Ok(Self(Secret::new(sanitized)))
    }
}

impl TryFrom<String> for CardNumber {
    type Error = error_stack::Report<ValidationError>;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_card_number_is_accepted_with_separators() {
        let card = CardNumber::from_str("4111 1111-1111 1111").unwrap();
        assert_eq!(card.get_card_number(), "4111111111111111");
        assert_eq!(card.get_card_isin(), "411111");
        assert_eq!(card.get_last4(), "1111");
    }

    #[test]
    fn luhn_failure_is_rejected() {
        assert!(CardNumber::from_str("4111111111111112").is_err());
        assert!(CardNumber::from_str("41111111abcd1111").is_err());
        assert!(CardNumber::from_str("4111").is_err());
    }

    #[test]
    fn debug_output_is_masked() {
        let card = CardNumber::from_str("5555555555554444").unwrap();
        let printed = format!("{card:?}");
        assert!(!printed.contains("5555555555554444"));
        assert!(printed.contains("555555**********"));
    }

    #[test]
    fn deserializes_from_json_string() {
        let card: CardNumber = serde_json::from_str("\"378282246310005\"").unwrap();
        assert_eq!(card.get_last4(), "0005");
        assert!(serde_json::from_str::<CardNumber>("\"1234567890123456\"").is_err());
    }
}
