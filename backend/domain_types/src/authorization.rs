//! Authorization token codec.
//!
//! Purchase, authorize and store hand the caller an opaque token; capture, refund and void
//! hand it back. Tokens are written as `v1~` followed by url-encoded `key=value` pairs:
//! `id`, an optional `currency`, then processor specific `x.<name>` fields. Tokens issued
//! before the versioned format are `|` delimited and still decode, using the positional
//! layout the adapter declares in [`LegacyLayout`].

use common_enums::Currency;
use error_stack::{report, ResultExt};

use crate::errors::ConnectorError;

const VERSION_PREFIX: &str = "v1~";
const LEGACY_DELIMITER: char = '|';
const ID_KEY: &str = "id";
const CURRENCY_KEY: &str = "currency";
const EXTRA_KEY_PREFIX: &str = "x.";

/// Decoded form of an authorization token
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthorizationReference {
    pub transaction_id: String,
    pub currency: Option<Currency>,
    /// Auxiliary processor fields in insertion order
    pub extras: Vec<(String, String)>,
}

/// Positional layout of `|` delimited tokens for one adapter.
///
/// `slot_names` names every identifier slot that precedes the trailing currency slot;
/// `id_slot` is the slot carrying the processor transaction id. A layout without names
/// has a single identifier slot.
#[derive(Clone, Copy, Debug)]
pub struct LegacyLayout {
    pub slot_names: &'static [&'static str],
    pub id_slot: &'static str,
}

impl LegacyLayout {
    /// `identifier|currency`
    pub const fn single() -> Self {
        Self {
            slot_names: &[],
            id_slot: ID_KEY,
        }
    }

    pub const fn named(slot_names: &'static [&'static str], id_slot: &'static str) -> Self {
        Self {
            slot_names,
            id_slot,
        }
    }

    pub fn identifier_slots(&self) -> usize {
        self.slot_names.len().max(1)
    }
}

impl AuthorizationReference {
    pub fn new(transaction_id: impl Into<String>, currency: Option<Currency>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            currency,
            extras: Vec::new(),
        }
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.push((name.into(), value.into()));
        self
    }

    pub fn with_optional_extra(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_extra(name, value),
            None => self,
        }
    }

    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// An empty token decodes to a reference without a transaction id
    pub fn is_empty(&self) -> bool {
        self.transaction_id.is_empty()
    }

    pub fn encode(&self) -> Result<String, error_stack::Report<ConnectorError>> {
        let mut pairs: Vec<(String, &str)> = Vec::with_capacity(self.extras.len() + 2);
        pairs.push((ID_KEY.to_string(), self.transaction_id.as_str()));
        let currency = self.currency.map(|currency| currency.to_string());
        if let Some(currency) = currency.as_deref() {
            pairs.push((CURRENCY_KEY.to_string(), currency));
        }
        for (name, value) in &self.extras {
            pairs.push((format!("{EXTRA_KEY_PREFIX}{name}"), value.as_str()));
        }
        let encoded = serde_urlencoded::to_string(&pairs)
            .change_context(ConnectorError::RequestEncodingFailed)
            .attach_printable("failed to encode authorization token")?;
        Ok(format!("{VERSION_PREFIX}{encoded}"))
    }

    pub fn decode(
        token: &str,
        layout: LegacyLayout,
    ) -> Result<Self, error_stack::Report<ConnectorError>> {
        if token.is_empty() {
            return Ok(Self::default());
        }
        match token.strip_prefix(VERSION_PREFIX) {
            Some(encoded) => Self::decode_v1(encoded),
            None => Ok(Self::decode_legacy(token, layout)),
        }
    }

    fn decode_v1(encoded: &str) -> Result<Self, error_stack::Report<ConnectorError>> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(encoded)
            .change_context(ConnectorError::InvalidAuthorizationToken)
            .attach_printable("authorization token is not url-encoded")?;

        let mut transaction_id = None;
        let mut currency = None;
        let mut extras = Vec::new();
        for (key, value) in pairs {
            match key.as_str() {
                ID_KEY => transaction_id = Some(value),
                CURRENCY_KEY => {
                    currency = Some(Currency::from_code(&value).ok_or_else(|| {
                        report!(ConnectorError::InvalidAuthorizationToken)
                            .attach_printable(format!("unknown currency {value} in token"))
                    })?)
                }
                _ => {
                    if let Some(name) = key.strip_prefix(EXTRA_KEY_PREFIX) {
                        extras.push((name.to_string(), value));
                    }
                }
            }
        }

        let transaction_id = transaction_id.ok_or_else(|| {
            report!(ConnectorError::InvalidAuthorizationToken)
                .attach_printable("authorization token has no id")
        })?;
        Ok(Self {
            transaction_id,
            currency,
            extras,
        })
    }

    fn decode_legacy(token: &str, layout: LegacyLayout) -> Self {
        let slots: Vec<&str> = token.split(LEGACY_DELIMITER).collect();
        // the trailing slot is only split off when it names a currency; anything else
        // stays part of the identifier
        let trailing_currency = slots
            .split_last()
            .filter(|_| slots.len() > layout.identifier_slots())
            .and_then(|(last, identifier)| {
                Currency::from_code(last).map(|currency| (identifier, currency))
            });
        let (identifier, currency) = match trailing_currency {
            Some((identifier, currency)) => (identifier, Some(currency)),
            None => (slots.as_slice(), None),
        };

        if !layout.slot_names.is_empty() && identifier.len() == layout.slot_names.len() {
            let extras: Vec<(String, String)> = layout
                .slot_names
                .iter()
                .zip(identifier)
                .filter(|(name, _)| **name != layout.id_slot)
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect();
            let transaction_id = layout
                .slot_names
                .iter()
                .position(|name| *name == layout.id_slot)
                .and_then(|index| identifier.get(index))
                .map(|value| (*value).to_string())
                .unwrap_or_default();
            return Self {
                transaction_id,
                currency,
                extras,
            };
        }

        Self {
            transaction_id: identifier.join("|"),
            currency,
            extras: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const NAMED: LegacyLayout = LegacyLayout::named(
        &["date", "batch", "transaction", "rrn", "authcode", "transtype", "amount"],
        "transaction",
    );

    #[test]
    fn v1_round_trips_with_extras() {
        let reference = AuthorizationReference::new("txn|42 &=", Some(Currency::ISK))
            .with_extra("batch", "7")
            .with_extra("rrn", "AMRCNT000123");
        let token = reference.encode().unwrap();
        assert!(token.starts_with("v1~"));
        assert_eq!(
            AuthorizationReference::decode(&token, LegacyLayout::single()).unwrap(),
            reference
        );
    }

    #[test]
    fn v1_without_currency_decodes_to_none() {
        let token = AuthorizationReference::new("abc", None).encode().unwrap();
        let decoded = AuthorizationReference::decode(&token, LegacyLayout::single()).unwrap();
        assert_eq!(decoded.transaction_id, "abc");
        assert_eq!(decoded.currency, None);
    }

    #[test]
    fn v1_with_unknown_currency_is_rejected() {
        let err = AuthorizationReference::decode("v1~id=abc&currency=ZZZ", LegacyLayout::single())
            .unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConnectorError::InvalidAuthorizationToken
        );
    }

    #[test]
    fn v1_without_id_is_rejected() {
        assert!(
            AuthorizationReference::decode("v1~currency=USD", LegacyLayout::single()).is_err()
        );
    }

    #[test]
    fn bare_identifier_decodes_without_currency() {
        let decoded = AuthorizationReference::decode("84710001", LegacyLayout::single()).unwrap();
        assert_eq!(decoded, AuthorizationReference::new("84710001", None));
    }

    #[test]
    fn legacy_trailing_slot_is_currency() {
        let decoded = AuthorizationReference::decode("ab|cd|USD", LegacyLayout::single()).unwrap();
        assert_eq!(decoded.transaction_id, "ab|cd");
        assert_eq!(decoded.currency, Some(Currency::USD));
    }

    #[test]
    fn legacy_trailing_slot_that_is_not_a_currency_stays_in_the_identifier() {
        let decoded = AuthorizationReference::decode("ab|cd", LegacyLayout::single()).unwrap();
        assert_eq!(decoded.transaction_id, "ab|cd");
        assert_eq!(decoded.currency, None);
    }

    #[test]
    fn legacy_named_token_with_unknown_trailing_slot_keeps_every_slot() {
        let token = "140216103700|11|15|WMBAMRCNT15|123456|1|100|XYZW";
        let decoded = AuthorizationReference::decode(token, NAMED).unwrap();
        assert_eq!(decoded.transaction_id, token);
        assert_eq!(decoded.currency, None);
    }

    #[test]
    fn legacy_numeric_currency_is_accepted() {
        let decoded = AuthorizationReference::decode("abc|352", LegacyLayout::single()).unwrap();
        assert_eq!(decoded.currency, Some(Currency::ISK));
    }

    #[test]
    fn legacy_named_slots_map_to_extras() {
        let token = "140216103700|11|15|WMBAMRCNT15|123456|1|100|ISK";
        let decoded = AuthorizationReference::decode(token, NAMED).unwrap();
        assert_eq!(decoded.transaction_id, "15");
        assert_eq!(decoded.currency, Some(Currency::ISK));
        assert_eq!(decoded.extra("authcode"), Some("123456"));
        assert_eq!(decoded.extra("amount"), Some("100"));
        assert_eq!(decoded.extra("transaction"), None);
    }

    #[test]
    fn legacy_named_slots_without_currency() {
        let token = "140216103700|11|15|WMBAMRCNT15|123456|1|100";
        let decoded = AuthorizationReference::decode(token, NAMED).unwrap();
        assert_eq!(decoded.transaction_id, "15");
        assert_eq!(decoded.currency, None);
        assert_eq!(decoded.extra("batch"), Some("11"));
    }

    #[test]
    fn empty_token_is_empty_reference() {
        let decoded = AuthorizationReference::decode("", NAMED).unwrap();
        assert!(decoded.is_empty());
    }

    fn currency_strategy() -> impl Strategy<Value = Option<Currency>> {
        prop_oneof![
            Just(None),
            Just(Some(Currency::USD)),
            Just(Some(Currency::EUR)),
            Just(Some(Currency::ISK)),
            Just(Some(Currency::JPY)),
            Just(Some(Currency::KWD)),
        ]
    }

    proptest! {
        #[test]
        fn v1_decode_inverts_encode(id in "\\PC{1,40}", currency in currency_strategy()) {
            let reference = AuthorizationReference::new(id, currency);
            let token = reference.encode().unwrap();
            let decoded = AuthorizationReference::decode(&token, LegacyLayout::single()).unwrap();
            prop_assert_eq!(decoded, reference);
        }

        #[test]
        fn legacy_identifier_with_currency_round_trips(
            id in "[A-Za-z0-9|]{1,30}",
            currency in currency_strategy(),
        ) {
            let token = match currency {
                Some(currency) => format!("{id}|{currency}"),
                None => id.clone(),
            };
            // an identifier whose last slot spells a currency code is ambiguous on its own
            prop_assume!(
                currency.is_some()
                    || id.rsplit('|').next().and_then(Currency::from_code).is_none()
            );
            let decoded = AuthorizationReference::decode(&token, LegacyLayout::single()).unwrap();
            prop_assert_eq!(decoded.transaction_id, id);
            prop_assert_eq!(decoded.currency, currency);
        }
    }
}
