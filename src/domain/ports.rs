use super::payment::{Currency, Payment};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A single equality condition applied while scanning the payments table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFilter {
    Currency(Currency),
}

impl ScanFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        match self {
            ScanFilter::Currency(currency) => payment.currency == *currency,
        }
    }
}

/// Gateway to the key-value table holding payments.
///
/// Implementations report "not found" as `Ok(None)` and only return `Err`
/// for storage or transport failures.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Option<Payment>>;
    async fn scan(&self, filter: Option<ScanFilter>) -> Result<Vec<Payment>>;
    async fn insert(&self, payment: Payment) -> Result<()>;
}

#[async_trait]
impl<T: PaymentStore + ?Sized> PaymentStore for Arc<T> {
    async fn fetch(&self, id: &str) -> Result<Option<Payment>> {
        (**self).fetch(id).await
    }

    async fn scan(&self, filter: Option<ScanFilter>) -> Result<Vec<Payment>> {
        (**self).scan(filter).await
    }

    async fn insert(&self, payment: Payment) -> Result<()> {
        (**self).insert(payment).await
    }
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;

/// Produces identifiers for newly created payments.
pub type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;
