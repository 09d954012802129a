use cards::{CardExpiration, CardNumber};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{errors, utils::Error};

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub card_number: CardNumber,
    pub card_exp_month: Secret<String>,
    pub card_exp_year: Secret<String>,
    pub card_cvc: Secret<String>,
    pub card_holder_name: Option<Secret<String>>,
}

impl Card {
    fn expiration(&self) -> Result<CardExpiration, Error> {
        let month = self
            .card_exp_month
            .peek()
            .parse::<u8>()
            .map_err(|_| errors::ConnectorError::RequestEncodingFailed)?;
        let year = self
            .card_exp_year
            .peek()
            .parse::<u16>()
            .map_err(|_| errors::ConnectorError::RequestEncodingFailed)?;
        CardExpiration::new(month, year).map_err(|err| {
            error_stack::report!(errors::ConnectorError::RequestEncodingFailed)
                .attach_printable(err.to_string())
        })
    }

    pub fn get_expiry_date_as_yymm(&self) -> Result<Secret<String>, Error> {
        Ok(self.expiration()?.get_expiry_date_as_yymm())
    }

    pub fn get_expiry_year_4_digit(&self) -> Result<Secret<String>, Error> {
        Ok(self.expiration()?.get_expiry_year_4_digit())
    }

    pub fn get_expiry_month_2_digit(&self) -> Result<Secret<String>, Error> {
        Ok(self.expiration()?.get_expiry_month_2_digit())
    }
}

/// A processor-issued reference to a previously stored instrument
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: Secret<String>,
    pub token_exp_month: Option<Secret<String>>,
    pub token_exp_year: Option<Secret<String>>,
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentInstrument {
    Card(Card),
    StoredToken(StoredToken),
}

impl PaymentInstrument {
    pub fn get_card(&self) -> Option<&Card> {
        match self {
            Self::Card(card) => Some(card),
            Self::StoredToken(_) => None,
        }
    }
}
