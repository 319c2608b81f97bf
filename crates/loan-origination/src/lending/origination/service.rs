use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use super::domain::{
    Customer, CustomerId, CustomerSummaryView, CustomerView, EligibilityView, LoanBookingView,
    LoanDetailView, LoanId, LoanRequest, LoanSummaryView, NewCustomer, NewLoan,
    RegistrationRequest,
};
use super::evaluation::{
    round_currency, EligibilityEngine, EligibilityOutcome, EvaluationConfig, LoanDecision,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{CustomerStore, LoanStore, RepositoryError};

/// Days per installment period when deriving a loan's end date.
const DAYS_PER_PERIOD: i64 = 30;

/// Service composing the intake guard, the evaluation engine, and the stores.
pub struct OriginationService<C, L> {
    guard: IntakeGuard,
    customers: Arc<C>,
    loans: Arc<L>,
    engine: Arc<EligibilityEngine>,
}

impl<C, L> OriginationService<C, L>
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    pub fn new(customers: Arc<C>, loans: Arc<L>, config: EvaluationConfig) -> Self {
        Self {
            guard: IntakeGuard,
            customers,
            loans,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Register a customer, deriving the approved limit from income.
    pub fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<CustomerView, OriginationServiceError> {
        self.guard.check_registration(&request)?;

        let approved_limit = self
            .engine
            .config()
            .approved_limit_for(request.monthly_income);

        let customer = self.customers.create(NewCustomer {
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            phone_number: request.phone_number,
            monthly_income: request.monthly_income,
            approved_limit,
            current_debt: 0.0,
        })?;

        Ok(CustomerView {
            customer_id: customer.customer_id,
            name: customer.full_name(),
            age: customer.age,
            monthly_income: customer.monthly_income,
            approved_limit: customer.approved_limit,
            phone_number: customer.phone_number,
        })
    }

    /// Run the eligibility decision without persisting anything.
    pub fn check_eligibility(
        &self,
        request: LoanRequest,
        today: NaiveDate,
    ) -> Result<EligibilityView, OriginationServiceError> {
        self.guard.check_loan_request(&request)?;
        let (outcome, _customer) = self.evaluate(&request, today)?;

        Ok(EligibilityView {
            customer_id: request.customer_id,
            approval: outcome.decision.is_approved(),
            interest_rate: request.interest_rate,
            corrected_interest_rate: outcome.decision.corrected_rate(),
            tenure: request.tenure,
            monthly_installment: round_currency(outcome.monthly_installment),
        })
    }

    /// Book a loan when the decision approves it, bumping the customer's debt.
    pub fn create_loan(
        &self,
        request: LoanRequest,
        today: NaiveDate,
    ) -> Result<LoanBookingView, OriginationServiceError> {
        self.guard.check_loan_request(&request)?;
        let (outcome, mut customer) = self.evaluate(&request, today)?;

        match outcome.decision {
            LoanDecision::Approved { effective_rate, .. } => {
                let end_date = today + Duration::days(DAYS_PER_PERIOD * i64::from(request.tenure));
                let loan = self.loans.create(NewLoan {
                    customer_id: request.customer_id,
                    principal: request.loan_amount,
                    annual_rate: effective_rate,
                    tenure: request.tenure,
                    monthly_installment: outcome.monthly_installment,
                    emis_paid_on_time: 0,
                    start_date: today,
                    end_date,
                })?;

                customer.current_debt += request.loan_amount;
                self.customers.update(customer)?;

                Ok(LoanBookingView {
                    loan_id: Some(loan.loan_id),
                    customer_id: request.customer_id,
                    loan_approved: true,
                    message: "Loan approved successfully.".to_string(),
                    monthly_installment: round_currency(outcome.monthly_installment),
                })
            }
            LoanDecision::Rejected(reason) => Ok(LoanBookingView {
                loan_id: None,
                customer_id: request.customer_id,
                loan_approved: false,
                message: format!("Loan not approved: {}.", reason.summary()),
                monthly_installment: 0.0,
            }),
        }
    }

    /// Loan terms joined with a summary of the owning customer.
    pub fn loan_detail(&self, loan_id: LoanId) -> Result<LoanDetailView, OriginationServiceError> {
        let loan = self
            .loans
            .fetch(loan_id)?
            .ok_or(OriginationServiceError::LoanNotFound(loan_id))?;
        let customer = self
            .customers
            .fetch(loan.customer_id)?
            .ok_or(OriginationServiceError::CustomerNotFound(loan.customer_id))?;

        Ok(LoanDetailView {
            loan_id: loan.loan_id,
            loan_amount: loan.principal,
            interest_rate: loan.annual_rate,
            monthly_installment: round_currency(loan.monthly_installment),
            tenure: loan.tenure,
            customer: CustomerSummaryView {
                first_name: customer.first_name,
                last_name: customer.last_name,
                phone_number: customer.phone_number,
                age: customer.age,
            },
        })
    }

    /// Every loan on the book for a customer.
    pub fn customer_loans(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<LoanSummaryView>, OriginationServiceError> {
        self.customers
            .fetch(customer_id)?
            .ok_or(OriginationServiceError::CustomerNotFound(customer_id))?;

        let loans = self.loans.for_customer(customer_id)?;
        Ok(loans
            .into_iter()
            .map(|loan| LoanSummaryView {
                loan_id: loan.loan_id,
                loan_amount: loan.principal,
                interest_rate: loan.annual_rate,
                monthly_installment: round_currency(loan.monthly_installment),
                repayments_left: loan.repayments_left(),
            })
            .collect())
    }

    fn evaluate(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<(EligibilityOutcome, Customer), OriginationServiceError> {
        let customer = self
            .customers
            .fetch(request.customer_id)?
            .ok_or(OriginationServiceError::CustomerNotFound(request.customer_id))?;
        let history = self.loans.for_customer(request.customer_id)?;
        let outcome = self.engine.evaluate(&customer, &history, request, today);
        Ok((outcome, customer))
    }
}

/// Error raised by the origination service.
#[derive(Debug, thiserror::Error)]
pub enum OriginationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("customer {0} is not on the book")]
    CustomerNotFound(CustomerId),
    #[error("loan {0} is not on the book")]
    LoanNotFound(LoanId),
}
