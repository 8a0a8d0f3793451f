use crate::application::handlers::PaymentHandlers;
use crate::application::request::ApiRequest;
use crate::application::response::ApiResponse;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedHandlers = Arc<PaymentHandlers>;

/// Routes:
///
/// * `POST /payments` creates a payment
/// * `GET /payments` lists payments, optionally `?currency=`
/// * `GET /payments/:id` fetches one payment
pub fn router(handlers: SharedHandlers) -> Router {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/", get(get_payment_without_id))
        .route("/payments/:id", get(get_payment))
        .with_state(handlers)
}

async fn create_payment(State(handlers): State<SharedHandlers>, body: Bytes) -> ApiResponse {
    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(error = %e, "request body is not valid UTF-8, treating it as empty");
            None
        }
    };
    let request = ApiRequest {
        body,
        ..ApiRequest::default()
    };
    handlers.create_payment(&request).await
}

async fn get_payment(State(handlers): State<SharedHandlers>, Path(id): Path<String>) -> ApiResponse {
    let request = ApiRequest::new().with_path_parameter("id", id);
    handlers.get_payment(&request).await
}

async fn get_payment_without_id(State(handlers): State<SharedHandlers>) -> ApiResponse {
    handlers.get_payment(&ApiRequest::new()).await
}

async fn list_payments(
    State(handlers): State<SharedHandlers>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResponse {
    let request = ApiRequest {
        query_string_parameters: query,
        ..ApiRequest::default()
    };
    handlers.list_payments(&request).await
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "dropping invalid response header"),
            }
        }

        response
    }
}
