use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::lending::origination::domain::{
    Customer, CustomerId, Loan, LoanId, LoanRequest, NewCustomer, NewLoan, RegistrationRequest,
};
use crate::lending::origination::repository::{CustomerStore, LoanStore, RepositoryError};
use crate::lending::origination::{
    origination_router, EligibilityEngine, EvaluationConfig, OriginationService,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig {
        baseline_score: 100,
        late_repayment_penalty: 25,
        active_loan_penalty: 10,
        settled_loan_bonus: 10,
        prime_score_floor: 50,
        near_prime_score_floor: 30,
        subprime_score_floor: 10,
        prime_rate_floor: 10.0,
        near_prime_rate_floor: 12.0,
        subprime_rate_floor: 16.0,
        installment_income_cap: 0.5,
        approved_limit_income_multiple: 36.0,
        approved_limit_rounding: 100_000.0,
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(evaluation_config())
}

pub(super) fn customer(id: u64) -> Customer {
    Customer {
        customer_id: CustomerId(id),
        first_name: "Aarav".to_string(),
        last_name: "Sharma".to_string(),
        age: 32,
        phone_number: "9876543210".to_string(),
        monthly_income: 50_000.0,
        approved_limit: 1_800_000.0,
        current_debt: 0.0,
    }
}

/// Closed loan that ran to completion with every installment on time.
pub(super) fn settled_loan(id: u64, customer_id: u64) -> Loan {
    Loan {
        loan_id: LoanId(id),
        customer_id: CustomerId(customer_id),
        principal: 200_000.0,
        annual_rate: 11.0,
        tenure: 24,
        monthly_installment: 9_300.0,
        emis_paid_on_time: 24,
        start_date: NaiveDate::from_ymd_opt(2021, 1, 10).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2023, 1, 10).expect("valid date"),
    }
}

/// Closed loan that missed at least one installment.
pub(super) fn late_loan(id: u64, customer_id: u64) -> Loan {
    Loan {
        emis_paid_on_time: 20,
        ..settled_loan(id, customer_id)
    }
}

/// Loan still running as of `today()`.
pub(super) fn active_loan(
    id: u64,
    customer_id: u64,
    principal: f64,
    monthly_installment: f64,
) -> Loan {
    Loan {
        loan_id: LoanId(id),
        customer_id: CustomerId(customer_id),
        principal,
        annual_rate: 12.0,
        tenure: 36,
        monthly_installment,
        emis_paid_on_time: 6,
        start_date: NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date"),
        end_date: NaiveDate::from_ymd_opt(2027, 12, 1).expect("valid date"),
    }
}

pub(super) fn registration() -> RegistrationRequest {
    RegistrationRequest {
        first_name: "Meera".to_string(),
        last_name: "Iyer".to_string(),
        age: 29,
        monthly_income: 61_500.0,
        phone_number: "9123456780".to_string(),
    }
}

pub(super) fn loan_request(customer_id: u64, amount: f64, rate: f64, tenure: u32) -> LoanRequest {
    LoanRequest {
        customer_id: CustomerId(customer_id),
        loan_amount: amount,
        interest_rate: rate,
        tenure,
    }
}

#[derive(Default)]
pub(super) struct MemoryCustomers {
    pub(super) records: Mutex<HashMap<CustomerId, Customer>>,
}

impl CustomerStore for MemoryCustomers {
    fn create(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        let next = guard.keys().map(|id| id.0).max().unwrap_or(0) + 1;
        let customer = Customer {
            customer_id: CustomerId(next),
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            phone_number: customer.phone_number,
            monthly_income: customer.monthly_income,
            approved_limit: customer.approved_limit,
            current_debt: customer.current_debt,
        };
        guard.insert(customer.customer_id, customer.clone());
        Ok(customer)
    }

    fn upsert(&self, customer: Customer) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("customer mutex poisoned")
            .insert(customer.customer_id, customer);
        Ok(())
    }

    fn fetch(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let guard = self.records.lock().expect("customer mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn update(&self, customer: Customer) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        if guard.contains_key(&customer.customer_id) {
            guard.insert(customer.customer_id, customer);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

#[derive(Default)]
pub(super) struct MemoryLoans {
    pub(super) records: Mutex<HashMap<LoanId, Loan>>,
}

impl LoanStore for MemoryLoans {
    fn create(&self, loan: NewLoan) -> Result<Loan, RepositoryError> {
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        let next = guard.keys().map(|id| id.0).max().unwrap_or(0) + 1;
        let loan = Loan {
            loan_id: LoanId(next),
            customer_id: loan.customer_id,
            principal: loan.principal,
            annual_rate: loan.annual_rate,
            tenure: loan.tenure,
            monthly_installment: loan.monthly_installment,
            emis_paid_on_time: loan.emis_paid_on_time,
            start_date: loan.start_date,
            end_date: loan.end_date,
        };
        guard.insert(loan.loan_id, loan.clone());
        Ok(loan)
    }

    fn upsert(&self, loan: Loan) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("loan mutex poisoned")
            .insert(loan.loan_id, loan);
        Ok(())
    }

    fn fetch(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn for_customer(&self, customer: CustomerId) -> Result<Vec<Loan>, RepositoryError> {
        let guard = self.records.lock().expect("loan mutex poisoned");
        Ok(guard
            .values()
            .filter(|loan| loan.customer_id == customer)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableCustomers;

impl CustomerStore for UnavailableCustomers {
    fn create(&self, _customer: NewCustomer) -> Result<Customer, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _customer: Customer) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _customer: Customer) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    OriginationService<MemoryCustomers, MemoryLoans>,
    Arc<MemoryCustomers>,
    Arc<MemoryLoans>,
) {
    let customers = Arc::new(MemoryCustomers::default());
    let loans = Arc::new(MemoryLoans::default());
    let service = OriginationService::new(customers.clone(), loans.clone(), evaluation_config());
    (service, customers, loans)
}

pub(super) fn router_with_service(
    service: OriginationService<MemoryCustomers, MemoryLoans>,
) -> axum::Router {
    origination_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
