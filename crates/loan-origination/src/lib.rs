//! Core library for the loan-origination service.
//!
//! The `lending` module carries the domain logic: customer intake, credit
//! scoring, the eligibility policy, installment math, and the back-book
//! portfolio import. Storage sits behind repository traits so the decision
//! logic can be exercised without a live database. The HTTP router for the
//! origination endpoints also lives here; the `services/api` crate wires it
//! to a runtime.

pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;
