//! Amount types and the convertors connectors use to render them

use std::{fmt::Display, str::FromStr};

use common_enums::enums;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};
use serde::{Deserialize, Serialize};

use crate::errors::{ParsingError, ValidationError};

/// Amount convertor trait for connector
pub trait AmountConvertor: Send {
    /// Output type for the connector
    type Output;
    /// helps in conversion of connector required amount type
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>>;

    /// helps in converting back connector required amount type to core minor unit
    fn convert_back(
        &self,
        amount: Self::Output,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>>;
}

/// Connector required amount type
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct StringMinorUnitForConnector;

impl AmountConvertor for StringMinorUnitForConnector {
    type Output = StringMinorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        _currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount.to_minor_unit_as_string())
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        _currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64()
    }
}

/// Connector required amount type
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct FloatMajorUnitForConnector;

impl AmountConvertor for FloatMajorUnitForConnector {
    type Output = FloatMajorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        amount.to_major_unit_as_f64(currency)
    }
    fn convert_back(
        &self,
        amount: FloatMajorUnit,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64(currency)
    }
}

fn exponent_divisor(currency: enums::Currency) -> Decimal {
    Decimal::from(10_i64.pow(u32::from(
        currency.number_of_digits_after_decimal_point(),
    )))
}

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Convert the amount to its major denomination based on Currency and return f64
    fn to_major_unit_as_f64(
        self,
        currency: enums::Currency,
    ) -> Result<FloatMajorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal =
            Decimal::from_i64(self.0).ok_or(ParsingError::I64ToDecimalConversionFailure)?;
        let amount_f64 = (amount_decimal / exponent_divisor(currency))
            .to_f64()
            .ok_or(ParsingError::FloatToDecimalConversionFailure)?;
        Ok(FloatMajorUnit::new(amount_f64))
    }

    ///Convert minor unit to string minor unit
    fn to_minor_unit_as_string(self) -> StringMinorUnit {
        StringMinorUnit::new(self.0.to_string())
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector specific types to send
#[derive(Default, Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StringMinorUnit(String);

impl StringMinorUnit {
    /// forms a new minor unit in string from amount
    fn new(value: String) -> Self {
        Self(value)
    }

    /// converts to minor unit i64 from minor unit string value
    fn to_minor_unit_as_i64(&self) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal = Decimal::from_str(&self.0).map_err(|e| {
            ParsingError::StringToDecimalConversionFailure {
                error: e.to_string(),
            }
        })?;
        let amount_i64 = amount_decimal
            .to_i64()
            .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
        Ok(MinorUnit::new(amount_i64))
    }

    /// Get string amount from struct
    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }
}

impl Display for StringMinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector specific types to send
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(transparent)]
pub struct FloatMajorUnit(pub f64);

impl FloatMajorUnit {
    /// forms a new major unit from amount
    fn new(value: f64) -> Self {
        Self(value)
    }

    /// converts to minor unit as i64 from FloatMajorUnit
    fn to_minor_unit_as_i64(
        self,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal =
            Decimal::from_f64(self.0).ok_or(ParsingError::FloatToDecimalConversionFailure)?;
        let amount_i64 = (amount_decimal * exponent_divisor(currency))
            .round()
            .to_i64()
            .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
        Ok(MinorUnit::new(amount_i64))
    }
}

/// An amount in minor units together with the currency it is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the smallest unit of `currency`
    pub amount: MinorUnit,
    /// ISO 4217 currency
    pub currency: enums::Currency,
}

impl Money {
    /// forms a new amount
    pub fn new(amount: i64, currency: enums::Currency) -> Self {
        Self {
            amount: MinorUnit::new(amount),
            currency,
        }
    }

    /// Rejects negative amounts
    pub fn validate_non_negative(&self) -> Result<(), error_stack::Report<ValidationError>> {
        if self.amount.get_amount_as_i64() < 0 {
            return Err(ValidationError::InvalidValue {
                message: format!("amount must not be negative, got {}", self.amount),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_major_unit_honours_currency_exponent() {
        let convertor = FloatMajorUnitForConnector;
        let usd = convertor
            .convert(MinorUnit::new(1204), enums::Currency::USD)
            .unwrap();
        assert_eq!(usd, FloatMajorUnit(12.04));

        let jpy = convertor
            .convert(MinorUnit::new(1204), enums::Currency::JPY)
            .unwrap();
        assert_eq!(jpy, FloatMajorUnit(1204.0));

        let kwd = convertor
            .convert(MinorUnit::new(1204), enums::Currency::KWD)
            .unwrap();
        assert_eq!(kwd, FloatMajorUnit(1.204));
    }

    #[test]
    fn float_major_unit_converts_back_without_drift() {
        let convertor = FloatMajorUnitForConnector;
        let back = convertor
            .convert_back(FloatMajorUnit(12.04), enums::Currency::USD)
            .unwrap();
        assert_eq!(back, MinorUnit::new(1204));
    }

    #[test]
    fn string_minor_unit_is_plain_integer() {
        let convertor = StringMinorUnitForConnector;
        let rendered = convertor
            .convert(MinorUnit::new(99), enums::Currency::ISK)
            .unwrap();
        assert_eq!(rendered.to_string(), "99");
        assert_eq!(
            convertor
                .convert_back(rendered, enums::Currency::ISK)
                .unwrap(),
            MinorUnit::new(99)
        );
    }

    #[test]
    fn negative_money_is_rejected() {
        assert!(Money::new(-1, enums::Currency::USD)
            .validate_non_negative()
            .is_err());
        assert!(Money::new(0, enums::Currency::USD)
            .validate_non_negative()
            .is_ok());
    }
}
