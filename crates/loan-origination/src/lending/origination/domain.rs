use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier for a registered customer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a booked loan.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct LoanId(pub u64);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration payload collected from the public API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub monthly_income: f64,
    pub phone_number: String,
}

/// A customer on the book, with the limit derived at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone_number: String,
    pub monthly_income: f64,
    pub approved_limit: f64,
    pub current_debt: f64,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customer fields before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone_number: String,
    pub monthly_income: f64,
    pub approved_limit: f64,
    pub current_debt: f64,
}

/// A booked loan. Immutable once created apart from payment tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub principal: f64,
    /// Annual rate in percent, after any tier correction.
    pub annual_rate: f64,
    /// Number of monthly installments.
    pub tenure: u32,
    /// Stored unrounded; rounded to two decimals only at reporting edges.
    pub monthly_installment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Loan {
    /// A loan counts against the customer until its end date has passed.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.end_date >= today
    }

    pub fn is_closed(&self, today: NaiveDate) -> bool {
        !self.is_active(today)
    }

    pub fn repayments_left(&self) -> u32 {
        self.tenure.saturating_sub(self.emis_paid_on_time)
    }

    pub fn fully_paid_on_time(&self) -> bool {
        self.emis_paid_on_time >= self.tenure
    }
}

/// Loan fields before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoan {
    pub customer_id: CustomerId,
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure: u32,
    pub monthly_installment: f64,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Terms a customer asks for, used by both the eligibility check and loan creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    /// Requested annual rate in percent.
    pub interest_rate: f64,
    pub tenure: u32,
}

/// Registration response exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub customer_id: CustomerId,
    pub name: String,
    pub age: u8,
    pub monthly_income: f64,
    pub approved_limit: f64,
    pub phone_number: String,
}

/// Outcome of an eligibility check, with the requested and corrected rates kept apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityView {
    pub customer_id: CustomerId,
    pub approval: bool,
    pub interest_rate: f64,
    pub corrected_interest_rate: Option<f64>,
    pub tenure: u32,
    pub monthly_installment: f64,
}

/// Result of a loan-creation request; `loan_id` is absent when rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanBookingView {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub loan_approved: bool,
    pub message: String,
    pub monthly_installment: f64,
}

/// Customer fields embedded in a loan detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummaryView {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u8,
}

/// Single-loan read model for `view-loan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailView {
    pub loan_id: LoanId,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub tenure: u32,
    pub customer: CustomerSummaryView,
}

/// Per-loan entry for `view-loans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub loan_id: LoanId,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub repayments_left: u32,
}
