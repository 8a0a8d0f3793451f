//! Storage adapters implementing [`PaymentStore`](crate::domain::ports::PaymentStore).

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

use crate::config::StoreBackend;
use crate::domain::ports::PaymentStoreBox;
use crate::error::Result;
use in_memory::InMemoryPaymentStore;

/// Opens the store selected by configuration.
///
/// Without the `storage-rocksdb` feature a persistent backend cannot be
/// opened; the request is logged and the in-memory store is used instead.
pub fn open_store(backend: &StoreBackend) -> Result<PaymentStoreBox> {
    match backend {
        StoreBackend::InMemory => {
            tracing::info!("using in-memory payment store");
            Ok(Box::new(InMemoryPaymentStore::new()))
        }
        #[cfg(feature = "storage-rocksdb")]
        StoreBackend::RocksDb(path) => {
            tracing::info!(db_path = %path.display(), "opening RocksDB payment store");
            Ok(Box::new(rocksdb::RocksDBStore::open(path)?))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        StoreBackend::RocksDb(path) => {
            tracing::warn!(
                db_path = %path.display(),
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryPaymentStore::new()))
        }
    }
}
