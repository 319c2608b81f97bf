//! Customer intake, credit evaluation, and loan booking.
//!
//! The evaluation engine is deliberately free of storage concerns: it takes a
//! customer and their loan history and produces an auditable outcome. The
//! service composes the engine with the intake guard and the repository
//! traits, and the router exposes the whole workflow over HTTP.

pub mod domain;
pub(crate) mod evaluation;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Customer, CustomerId, CustomerSummaryView, CustomerView, EligibilityView, Loan,
    LoanBookingView, LoanDetailView, LoanId, LoanRequest, LoanSummaryView, NewCustomer, NewLoan,
    RegistrationRequest,
};
pub use evaluation::{
    monthly_installment, round_currency, EligibilityEngine, EligibilityOutcome, EvaluationConfig,
    LoanDecision, RejectionReason, ScoreComponent, ScoreFactor,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{CustomerStore, LoanStore, RepositoryError};
pub use router::origination_router;
pub use service::{OriginationService, OriginationServiceError};
