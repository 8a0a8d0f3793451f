use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Default ceiling for a single payment amount.
pub const DEFAULT_MAX_AMOUNT: Decimal = dec!(1000000);

/// Runtime environment the service was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl FromStr for Environment {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(PaymentError::ConfigError(format!(
                "unknown environment '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        })
    }
}

/// Which storage adapter backs the payments table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    RocksDb(PathBuf),
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub bind: SocketAddr,
    pub db_path: Option<PathBuf>,
    pub max_amount: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: None,
            max_amount: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl Settings {
    pub fn validate(self) -> Result<Self> {
        if self.max_amount <= Decimal::ZERO {
            return Err(PaymentError::ConfigError(format!(
                "max amount must be positive, got {}",
                self.max_amount
            )));
        }
        Ok(self)
    }

    /// The test environment always runs against a local, throwaway store.
    pub fn store_backend(&self) -> StoreBackend {
        match (&self.environment, &self.db_path) {
            (Environment::Test, _) | (_, None) => StoreBackend::InMemory,
            (_, Some(path)) => StoreBackend::RocksDb(path.clone()),
        }
    }
}
