use super::domain::{Customer, CustomerId, Loan, LoanId, NewCustomer, NewLoan};

/// Customer storage abstraction so the decision logic can be exercised in
/// isolation from a live database.
pub trait CustomerStore: Send + Sync {
    /// Persist a new customer, assigning the next identifier.
    fn create(&self, customer: NewCustomer) -> Result<Customer, RepositoryError>;
    /// Insert or replace a customer with a known identifier (back-book ingest).
    fn upsert(&self, customer: Customer) -> Result<(), RepositoryError>;
    fn fetch(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;
    fn update(&self, customer: Customer) -> Result<(), RepositoryError>;
}

/// Loan storage abstraction; loans reference their customer by id only.
pub trait LoanStore: Send + Sync {
    /// Persist a new loan, assigning the next identifier.
    fn create(&self, loan: NewLoan) -> Result<Loan, RepositoryError>;
    /// Insert or replace a loan with a known identifier (back-book ingest).
    fn upsert(&self, loan: Loan) -> Result<(), RepositoryError>;
    fn fetch(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError>;
    fn for_customer(&self, customer: CustomerId) -> Result<Vec<Loan>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
