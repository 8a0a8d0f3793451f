use crate::domain::payment::Payment;
use crate::domain::ports::{PaymentStore, ScanFilter};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding payment records.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent payments table backed by RocksDB.
///
/// Records live in the `payments` column family, keyed by the payment id and
/// stored as JSON. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `payments` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn payments_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_PAYMENTS).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Payments column family not found",
            )))
        })
    }
}

fn decode(key: &[u8], bytes: &[u8]) -> Result<Payment> {
    serde_json::from_slice(bytes).map_err(|e| {
        PaymentError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Deserialization error for payment {}: {}",
                String::from_utf8_lossy(key),
                e
            ),
        )))
    })
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn fetch(&self, id: &str) -> Result<Option<Payment>> {
        let cf = self.payments_cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => decode(id.as_bytes(), &bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn scan(&self, filter: Option<ScanFilter>) -> Result<Vec<Payment>> {
        let cf = self.payments_cf()?;

        let mut payments = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (key, value) = item?;
            let payment = decode(&key, &value)?;
            if filter.is_none_or(|f| f.matches(&payment)) {
                payments.push(payment);
            }
        }

        Ok(payments)
    }

    async fn insert(&self, payment: Payment) -> Result<()> {
        let cf = self.payments_cf()?;
        let value = serde_json::to_vec(&payment)?;
        self.db.put_cf(cf, payment.id.as_bytes(), value)?;
        Ok(())
    }
}
