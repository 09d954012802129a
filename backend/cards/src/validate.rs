use hyperswitch_masking::{PeekInterface, Secret};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum and maximum PAN lengths accepted by the card networks
const MIN_CARD_NUMBER_LENGTH: usize = 12;
const MAX_CARD_NUMBER_LENGTH: usize = 19;

#[allow(clippy::expect_used)]
static CARD_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("card number regex is valid"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CardNumberValidationErr(&'static str);

pub(crate) fn sanitize_card_number(card_number: &str) -> Result<String, CardNumberValidationErr> {
    let sanitized: String = card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if !CARD_NUMBER_REGEX.is_match(&sanitized) {
        return Err(CardNumberValidationErr(
            "card number contains non numeric characters",
        ));
    }

    if !(MIN_CARD_NUMBER_LENGTH..=MAX_CARD_NUMBER_LENGTH).contains(&sanitized.len()) {
        return Err(CardNumberValidationErr("invalid card number length"));
    }

    if !luhn(&sanitized) {
        return Err(CardNumberValidationErr("card number failed the luhn check"));
    }

    Ok(sanitized)
}

pub fn luhn(number: &str) -> bool {
    let mut sum = 0;
    for (index, digit) in number.chars().rev().enumerate() {
        let Some(mut value) = digit.to_digit(10) else {
            return false;
        };
        if index % 2 == 1 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
    }
    sum % 10 == 0
}

/// Card expiry as the caller supplied it, month `1..=12`, year either two or four digits
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardExpiration {
    pub month: Secret<String>,
    pub year: Secret<String>,
}

impl CardExpiration {
    pub fn new(month: u8, year: u16) -> Result<Self, CardNumberValidationErr> {
        if !(1..=12).contains(&month) {
            return Err(CardNumberValidationErr("invalid card expiry month"));
        }
        Ok(Self {
            month: Secret::new(format!("{month:02}")),
            year: Secret::new(year.to_string()),
        })
    }

    pub fn get_expiry_year_4_digit(&self) -> Secret<String> {
        let year = self.year.peek();
        if year.len() == 2 {
            Secret::new(format!("20{year}"))
        } else {
            self.year.clone()
        }
    }

    pub fn get_expiry_year_2_digit(&self) -> Secret<String> {
        let year = self.year.peek();
        Secret::new(
            year.get(year.len().saturating_sub(2)..)
                .unwrap_or(year)
                .to_string(),
        )
    }

    pub fn get_expiry_month_2_digit(&self) -> Secret<String> {
        Secret::new(format!("{:0>2}", self.month.peek()))
    }

    /// True once the last day of the expiry month has passed in UTC
    pub fn is_expired(&self) -> Result<bool, CardNumberValidationErr> {
        let year = self
            .get_expiry_year_4_digit()
            .peek()
            .parse::<i32>()
            .map_err(|_| CardNumberValidationErr("invalid card expiry year"))?;
        let month = self
            .month
            .peek()
            .parse::<u8>()
            .map_err(|_| CardNumberValidationErr("invalid card expiry month"))?;
        let now = time::OffsetDateTime::now_utc();
        let current_month = u8::from(now.month());
        Ok((year, month) < (now.year(), current_month))
    }

    /// `YYMM`, the form most acquirer protocols carry
    pub fn get_expiry_date_as_yymm(&self) -> Secret<String> {
        Secret::new(format!(
            "{}{}",
            self.get_expiry_year_2_digit().peek(),
            self.get_expiry_month_2_digit().peek()
        ))
    }
}
