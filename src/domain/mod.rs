//! Domain layer: the payment record, the storage port and input schemas.
//!
//! Nothing in here knows about HTTP or about a particular storage engine.

pub mod payment;
pub mod ports;
pub mod schemas;
pub mod validation;
