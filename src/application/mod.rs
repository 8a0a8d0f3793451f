//! Application layer: the request handlers and the envelopes they speak.
//!
//! `PaymentHandlers` composes input parsing, schema validation, a single call
//! to the injected store and response building. The request and response types
//! mirror what the hosting layer passes in and expects back, so the handlers
//! can be driven by the HTTP adapter or directly from tests.

pub mod handlers;
pub mod request;
pub mod response;
