//! A small declarative validator for JSON input.
//!
//! A [`Schema`] is an ordered set of [`FieldRule`]s. Each rule names a field,
//! says whether it must be present, and carries a chain of checks. Every rule
//! is evaluated so that one response can report all offending fields; within
//! a field only the first failing check is reported.

use super::payment::decimal_from_number;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending field, or `None` when the input as a whole is rejected.
    pub path: Option<String>,
    pub message: String,
}

impl Violation {
    pub fn root(message: impl Into<String>) -> Self {
        Self {
            path: None,
            message: message.into(),
        }
    }

    pub fn at(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} at \"{}\"", self.message, path),
            None => f.write_str(&self.message),
        }
    }
}

/// All violations found in one input, rendered as a single readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation error: ")?;
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

type Check = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Orders a JSON number against a bound.
///
/// Numbers outside `Decimal`'s range or precision are compared as `f64`, so
/// `1e30` is still above any ceiling and `-1e-30` still below zero.
fn compare(value: &Value, bound: Decimal) -> Option<Ordering> {
    let Value::Number(number) = value else {
        return None;
    };
    match decimal_from_number(number) {
        Some(n) => Some(n.cmp(&bound)),
        None => number.as_f64()?.partial_cmp(&bound.to_f64()?),
    }
}

/// Rules for one named field.
pub struct FieldRule {
    name: &'static str,
    required: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            checks: Vec::new(),
        }
    }

    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            checks: Vec::new(),
        }
    }

    /// Appends a custom check. Checks run in the order they were added.
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    pub fn number(self) -> Self {
        self.check(|value| match value {
            Value::Number(_) => Ok(()),
            other => Err(format!("Expected number, received {}", kind(other))),
        })
    }

    pub fn string(self) -> Self {
        self.check(|value| match value {
            Value::String(_) => Ok(()),
            other => Err(format!("Expected string, received {}", kind(other))),
        })
    }

    /// Exclusive lower bound. Non-numeric values are left to [`FieldRule::number`].
    pub fn greater_than(self, min: Decimal) -> Self {
        self.check(move |value| match compare(value, min) {
            Some(Ordering::Less | Ordering::Equal) => {
                Err(format!("Number must be greater than {}", min))
            }
            _ => Ok(()),
        })
    }

    /// Inclusive upper bound.
    pub fn at_most(self, max: Decimal) -> Self {
        self.check(move |value| match compare(value, max) {
            Some(Ordering::Greater) => Err(format!("Number must be less than or equal to {}", max)),
            _ => Ok(()),
        })
    }

    /// The number must be exactly representable as a `Decimal`.
    pub fn decimal(self) -> Self {
        self.check(|value| match value {
            Value::Number(number) if decimal_from_number(number).is_none() => Err(format!(
                "Number must have at most {} decimal places",
                Decimal::MAX_SCALE
            )),
            _ => Ok(()),
        })
    }

    /// The value must be one of the given strings.
    pub fn one_of(self, allowed: Vec<&'static str>, message: &'static str) -> Self {
        self.check(move |value| match value {
            Value::String(s) if allowed.contains(&s.as_str()) => Ok(()),
            _ => Err(message.to_string()),
        })
    }

    fn evaluate(&self, input: &Map<String, Value>) -> Option<Violation> {
        let Some(value) = input.get(self.name) else {
            return self
                .required
                .then(|| Violation::at(self.name, "Required"));
        };

        self.checks
            .iter()
            .find_map(|check| check(value).err())
            .map(|message| Violation::at(self.name, message))
    }
}

/// An ordered collection of field rules applied to a JSON object.
#[derive(Default)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn validate(&self, input: &Value) -> Result<(), ValidationErrors> {
        let Value::Object(fields) = input else {
            return Err(ValidationErrors(vec![Violation::root(format!(
                "Expected object, received {}",
                kind(input)
            ))]));
        };

        let violations: Vec<Violation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(fields))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }

    /// Validates the input and decodes it into a typed value.
    ///
    /// Fields not named by any rule are ignored by the decode step.
    pub fn parse<T: DeserializeOwned>(&self, input: &Value) -> Result<T, ValidationErrors> {
        self.validate(input)?;
        T::deserialize(input).map_err(|e| ValidationErrors(vec![Violation::root(e.to_string())]))
    }
}
