use super::payment::{Currency, NewPayment};
use super::validation::{FieldRule, Schema, ValidationErrors};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

const INVALID_CURRENCY: &str = "Invalid currency";

fn currency_codes() -> Vec<&'static str> {
    Currency::ALL.iter().map(Currency::code).collect()
}

/// Shape of a payment creation request.
pub fn new_payment_schema(ceiling: Decimal) -> Schema {
    Schema::new()
        .field(
            FieldRule::required("amount")
                .number()
                .greater_than(Decimal::ZERO)
                .at_most(ceiling)
                .decimal(),
        )
        .field(
            FieldRule::required("currency")
                .string()
                .one_of(currency_codes(), INVALID_CURRENCY),
        )
}

/// Shape of the query accepted when listing payments.
pub fn list_filter_schema() -> Schema {
    Schema::new().field(FieldRule::optional("currency").one_of(currency_codes(), INVALID_CURRENCY))
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct ListFilter {
    pub currency: Option<Currency>,
}

/// The schemas used by the payment handlers, built once per process.
pub struct PaymentSchemas {
    ceiling: Decimal,
    new_payment: Schema,
    list_filter: Schema,
}

impl PaymentSchemas {
    pub fn new(ceiling: Decimal) -> Self {
        Self {
            ceiling,
            new_payment: new_payment_schema(ceiling),
            list_filter: list_filter_schema(),
        }
    }

    pub fn ceiling(&self) -> Decimal {
        self.ceiling
    }

    pub fn parse_new_payment(&self, input: &Value) -> Result<NewPayment, ValidationErrors> {
        self.new_payment.parse(input)
    }

    pub fn parse_list_filter(&self, input: &Value) -> Result<ListFilter, ValidationErrors> {
        self.list_filter.parse(input)
    }
}
