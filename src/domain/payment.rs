use crate::error::PaymentError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A strictly positive monetary amount.
///
/// Wraps `rust_decimal::Decimal` so that amounts never pass through binary
/// floating point while they live inside the service. On the wire the amount
/// is a plain JSON number: integral values are written as integers and
/// fractional values as floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value.normalize()))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Converts a JSON number into a `Decimal`.
///
/// The textual form is used so that `0.1` stays exactly `0.1`. Returns `None`
/// when the number is outside `Decimal`'s range or needs more than 28 decimal
/// places.
pub fn decimal_from_number(number: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = number.to_string();
    let decimal = text
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()?;
    // Rounding past the last decimal place can erase a non-zero value.
    if decimal.is_zero() && number.as_f64().is_some_and(|f| f != 0.0) {
        return None;
    }
    Some(decimal)
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.fract().is_zero()
            && let Some(whole) = self.0.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        // Parsing the decimal text gives the float closest to the exact value.
        match self.0.to_string().parse::<f64>() {
            Ok(value) => serializer.serialize_f64(value),
            Err(e) => Err(serde::ser::Error::custom(format!(
                "amount {} is not representable as a number: {}",
                self.0, e
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        let value = decimal_from_number(&number)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", number)))?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}

/// Supported settlement currencies.
///
/// Adding a currency means adding a variant here and to [`Currency::ALL`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Aud,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Aud, Currency::Usd];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Aud => "AUD",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == s)
            .ok_or_else(|| PaymentError::ValidationError(format!("Unsupported currency: {}", s)))
    }
}

/// The fields a client supplies when creating a payment.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct NewPayment {
    pub amount: Amount,
    pub currency: Currency,
}

impl NewPayment {
    /// Attaches a server-assigned identifier, producing the record to persist.
    pub fn into_payment(self, id: String) -> Payment {
        Payment {
            id,
            amount: self.amount,
            currency: self.currency,
        }
    }
}

/// A persisted payment. Records are written once and never updated.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    /// Unique identifier generated when the payment is created.
    pub id: String,
    pub amount: Amount,
    pub currency: Currency,
}
