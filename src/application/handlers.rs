use super::request::ApiRequest;
use super::response::{ApiResponse, ErrorBody, INTERNAL_SERVER_ERROR, MessageBody, build_response};
use crate::domain::payment::Payment;
use crate::domain::ports::{IdGenerator, PaymentStoreBox, ScanFilter};
use crate::domain::schemas::PaymentSchemas;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const MISSING_PAYMENT_ID: &str = "Missing payment ID";
pub const PAYMENT_NOT_FOUND: &str = "Payment not found";

#[derive(Serialize)]
struct CreatedBody<'a> {
    result: &'a str,
}

#[derive(Serialize)]
struct ListBody<'a> {
    data: &'a [Payment],
}

/// The create, get and list operations over the payments table.
///
/// Each operation validates its input, performs at most one store call and
/// always answers with an [`ApiResponse`]: failures are logged here and never
/// escape to the hosting layer.
pub struct PaymentHandlers {
    store: PaymentStoreBox,
    schemas: PaymentSchemas,
    id_generator: IdGenerator,
}

impl PaymentHandlers {
    /// Creates the handlers.
    ///
    /// # Arguments
    ///
    /// * `store` - The payments table.
    /// * `max_amount` - The largest amount a single payment may carry.
    pub fn new(store: PaymentStoreBox, max_amount: Decimal) -> Self {
        Self {
            store,
            schemas: PaymentSchemas::new(max_amount),
            id_generator: Box::new(|| Uuid::new_v4().to_string()),
        }
    }

    /// Replaces the random UUID generator, e.g. to get predictable ids in tests.
    pub fn with_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn max_amount(&self) -> Decimal {
        self.schemas.ceiling()
    }

    /// Validates the body and stores a new payment under a fresh id.
    pub async fn create_payment(&self, request: &ApiRequest) -> ApiResponse {
        let input = request.json_body();

        let new_payment = match self.schemas.parse_new_payment(&input) {
            Ok(new_payment) => new_payment,
            Err(errors) => {
                let message = errors.to_string();
                warn!(error = %message, "rejected payment creation");
                return build_response(422, &ErrorBody { error: &message });
            }
        };

        let payment = new_payment.into_payment((self.id_generator)());
        let payment_id = payment.id.clone();
        let currency = payment.currency;

        match self.store.insert(payment).await {
            Ok(()) => {
                info!(payment_id = %payment_id, %currency, "payment created");
                build_response(201, &CreatedBody { result: &payment_id })
            }
            Err(e) => {
                error!(error = %e, "unexpected error while creating payment");
                build_response(500, &ErrorBody { error: INTERNAL_SERVER_ERROR })
            }
        }
    }

    /// Looks up one payment by the `id` path parameter.
    pub async fn get_payment(&self, request: &ApiRequest) -> ApiResponse {
        let Some(payment_id) = request.path_parameter("id") else {
            return build_response(400, &MessageBody { message: MISSING_PAYMENT_ID });
        };

        match self.store.fetch(payment_id).await {
            Ok(Some(payment)) => build_response(200, &payment),
            Ok(None) => {
                debug!(payment_id, "payment not found");
                build_response(404, &MessageBody { message: PAYMENT_NOT_FOUND })
            }
            Err(e) => {
                error!(payment_id, error = %e, "unexpected error while fetching payment");
                build_response(500, &MessageBody { message: INTERNAL_SERVER_ERROR })
            }
        }
    }

    /// Lists payments, optionally restricted to one currency.
    pub async fn list_payments(&self, request: &ApiRequest) -> ApiResponse {
        let filter = match self.schemas.parse_list_filter(&request.query_as_json()) {
            Ok(filter) => filter,
            Err(errors) => {
                let message = errors.to_string();
                warn!(error = %message, "rejected payment listing");
                return build_response(422, &ErrorBody { error: &message });
            }
        };

        let scan_filter = filter.currency.map(ScanFilter::Currency);
        match self.store.scan(scan_filter).await {
            Ok(payments) => {
                debug!(count = payments.len(), ?scan_filter, "payments listed");
                build_response(200, &ListBody { data: &payments })
            }
            Err(e) => {
                error!(error = %e, "unexpected error while listing payments");
                build_response(500, &ErrorBody { error: INTERNAL_SERVER_ERROR })
            }
        }
    }
}
