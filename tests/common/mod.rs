#![allow(dead_code)]

use async_trait::async_trait;
use payments_api::domain::payment::Payment;
use payments_api::domain::ports::{PaymentStore, ScanFilter};
use payments_api::error::{PaymentError, Result};
use payments_api::infrastructure::in_memory::InMemoryPaymentStore;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A store whose every call fails, standing in for an unreachable table.
pub struct FailingStore;

pub const FAILURE_TEXT: &str = "connection reset by peer: table Payments";

#[async_trait]
impl PaymentStore for FailingStore {
    async fn fetch(&self, _id: &str) -> Result<Option<Payment>> {
        Err(PaymentError::StorageError(FAILURE_TEXT.to_string()))
    }

    async fn scan(&self, _filter: Option<ScanFilter>) -> Result<Vec<Payment>> {
        Err(PaymentError::StorageError(FAILURE_TEXT.to_string()))
    }

    async fn insert(&self, _payment: Payment) -> Result<()> {
        Err(PaymentError::StorageError(FAILURE_TEXT.to_string()))
    }
}

/// Wraps an in-memory store and records how it was called.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryPaymentStore,
    pub fetches: AtomicUsize,
    pub scans: Mutex<Vec<Option<ScanFilter>>>,
    pub inserts: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn scan_calls(&self) -> Vec<Option<ScanFilter>> {
        self.scans.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentStore for RecordingStore {
    async fn fetch(&self, id: &str) -> Result<Option<Payment>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(id).await
    }

    async fn scan(&self, filter: Option<ScanFilter>) -> Result<Vec<Payment>> {
        self.scans.lock().unwrap().push(filter);
        self.inner.scan(filter).await
    }

    async fn insert(&self, payment: Payment) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(payment).await
    }
}

pub fn payment_body(amount: impl std::fmt::Display, currency: &str) -> String {
    format!(r#"{{"amount": {}, "currency": "{}"}}"#, amount, currency)
}
