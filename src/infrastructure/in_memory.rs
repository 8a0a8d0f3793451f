use crate::domain::payment::Payment;
use crate::domain::ports::{PaymentStore, ScanFilter};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory payments table.
///
/// Uses `Arc<RwLock<HashMap<String, Payment>>>` keyed by payment id, so clones
/// share the same data. Backs local and test runs where persistence is not
/// required.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn fetch(&self, id: &str) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(id).cloned())
    }

    async fn scan(&self, filter: Option<ScanFilter>) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments
            .values()
            .filter(|payment| filter.is_none_or(|f| f.matches(payment)))
            .cloned()
            .collect())
    }

    async fn insert(&self, payment: Payment) -> Result<()> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id.clone(), payment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Amount, Currency};
    use rust_decimal_macros::dec;

    fn payment(id: &str, currency: Currency) -> Payment {
        Payment {
            id: id.to_string(),
            amount: Amount::new(dec!(100.0)).unwrap(),
            currency,
        }
    }

    #[tokio::test]
    async fn test_in_memory_fetch() {
        let store = InMemoryPaymentStore::new();
        let p = payment("1", Currency::Aud);

        store.insert(p.clone()).await.unwrap();
        let retrieved = store.fetch("1").await.unwrap().unwrap();
        assert_eq!(retrieved, p);

        assert!(store.fetch("2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_insert_overwrites() {
        let store = InMemoryPaymentStore::new();
        store.insert(payment("1", Currency::Aud)).await.unwrap();
        store.insert(payment("1", Currency::Usd)).await.unwrap();

        let all = store.scan(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].currency, Currency::Usd);
    }

    #[tokio::test]
    async fn test_in_memory_scan_filter() {
        let store = InMemoryPaymentStore::new();
        assert!(store.scan(None).await.unwrap().is_empty());

        store.insert(payment("1", Currency::Aud)).await.unwrap();
        store.insert(payment("2", Currency::Usd)).await.unwrap();
        store.insert(payment("3", Currency::Aud)).await.unwrap();

        assert_eq!(store.scan(None).await.unwrap().len(), 3);

        let mut aud: Vec<String> = store
            .scan(Some(ScanFilter::Currency(Currency::Aud)))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        aud.sort();
        assert_eq!(aud, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryPaymentStore::new();
        let clone = store.clone();
        clone.insert(payment("1", Currency::Aud)).await.unwrap();
        assert!(store.fetch("1").await.unwrap().is_some());
    }
}
