//! Inbound adapters that translate a transport into handler calls.

pub mod http;
