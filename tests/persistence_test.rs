#![cfg(feature = "storage-rocksdb")]

use payments_api::application::handlers::PaymentHandlers;
use payments_api::application::request::ApiRequest;
use payments_api::config::StoreBackend;
use payments_api::infrastructure::open_store;
use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let backend = StoreBackend::RocksDb(dir.path().join("test_db"));

    // 1. First run: create a payment
    let id = {
        let handlers = PaymentHandlers::new(open_store(&backend).unwrap(), dec!(10000));
        let response = handlers
            .create_payment(&ApiRequest::new().with_body(r#"{"amount": 2000, "currency": "AUD"}"#))
            .await;
        assert_eq!(response.status_code, 201);
        response.json().unwrap()["result"]
            .as_str()
            .unwrap()
            .to_string()
    };

    // 2. Second run: the payment is still there
    let handlers = PaymentHandlers::new(open_store(&backend).unwrap(), dec!(10000));
    let response = handlers
        .get_payment(&ApiRequest::new().with_path_parameter("id", id.clone()))
        .await;
    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.json().unwrap(),
        json!({"id": id, "amount": 2000, "currency": "AUD"})
    );

    let response = handlers
        .list_payments(&ApiRequest::new().with_query_parameter("currency", "USD"))
        .await;
    assert_eq!(response.json().unwrap(), json!({"data": []}));
}
