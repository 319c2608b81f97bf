use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use loan_origination::lending::origination::{
    Customer, CustomerId, CustomerStore, EvaluationConfig, Loan, LoanId, LoanStore, NewCustomer,
    NewLoan, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCustomerStore {
    records: Arc<Mutex<HashMap<CustomerId, Customer>>>,
}

impl CustomerStore for InMemoryCustomerStore {
    fn create(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        // Ingested identifiers may be sparse; always allocate past the highest.
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
        let mut guard = self.records.lock().expect("customer mutex poisoned");
        guard.insert(customer.customer_id, customer);
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanStore {
    records: Arc<Mutex<HashMap<LoanId, Loan>>>,
}

impl LoanStore for InMemoryLoanStore {
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
        let mut guard = self.records.lock().expect("loan mutex poisoned");
        guard.insert(loan.loan_id, loan);
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

pub(crate) fn default_evaluation_config() -> EvaluationConfig {
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

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
