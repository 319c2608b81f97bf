//! Back-book import from spreadsheet exports of the customer and loan books.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::lending::origination::domain::{Customer, Loan};
use crate::lending::origination::repository::{CustomerStore, LoanStore, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum PortfolioImportError {
    #[error("failed to read portfolio export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid portfolio CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unparsable date '{value}' in column '{column}'")]
    Date { column: &'static str, value: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Counts reported after an ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub customers_loaded: usize,
    pub loans_loaded: usize,
    pub loans_skipped: usize,
}

pub struct PortfolioImporter;

impl PortfolioImporter {
    pub fn customers_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Customer>, PortfolioImportError> {
        let file = std::fs::File::open(path)?;
        Self::customers_from_reader(file)
    }

    pub fn customers_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<Customer>, PortfolioImportError> {
        parser::parse_customers(reader)
    }

    pub fn loans_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Loan>, PortfolioImportError> {
        let file = std::fs::File::open(path)?;
        Self::loans_from_reader(file)
    }

    pub fn loans_from_reader<R: Read>(reader: R) -> Result<Vec<Loan>, PortfolioImportError> {
        parser::parse_loans(reader)
    }

    /// Upsert both books, skipping loans whose customer is absent.
    /// Re-running with the same exports leaves the stores unchanged.
    pub fn ingest_into<C, L>(
        customers: Vec<Customer>,
        loans: Vec<Loan>,
        customer_store: &C,
        loan_store: &L,
    ) -> Result<IngestSummary, PortfolioImportError>
    where
        C: CustomerStore,
        L: LoanStore,
    {
        let mut summary = IngestSummary::default();
        let mut known = HashSet::new();

        for customer in customers {
            known.insert(customer.customer_id);
            customer_store.upsert(customer)?;
            summary.customers_loaded += 1;
        }

        for loan in loans {
            let customer_exists = known.contains(&loan.customer_id)
                || customer_store.fetch(loan.customer_id)?.is_some();
            if customer_exists {
                loan_store.upsert(loan)?;
                summary.loans_loaded += 1;
            } else {
                summary.loans_skipped += 1;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lending::origination::domain::{CustomerId, LoanId};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    const CUSTOMER_CSV: &str = "\
Customer ID,First Name,Last Name,Phone Number,Monthly Salary,Approved Limit,Current Debt
1,Aarav,Sharma,9876543210,50000,1800000,0
2,Meera,Iyer,9123456780,65000,2300000,
";

    const LOAN_CSV: &str = "\
Customer ID,Loan ID,Loan Amount,Tenure,Interest Rate,Monthly payment,EMIs paid on Time,Date of Approval,End Date
1,501,200000,24,11.5,9366.11,24,2021-03-01,2023-03-01
9,502,100000,12,12.0,8884.88,3,2022-01-15,2023-01-15
";

    #[derive(Default)]
    struct MapCustomers {
        records: Mutex<HashMap<CustomerId, Customer>>,
    }

    impl CustomerStore for MapCustomers {
        fn create(
            &self,
            _customer: crate::lending::origination::domain::NewCustomer,
        ) -> Result<Customer, RepositoryError> {
            Err(RepositoryError::Unavailable("not used".to_string()))
        }

        fn upsert(&self, customer: Customer) -> Result<(), RepositoryError> {
            self.records
                .lock()
                .expect("customer mutex poisoned")
                .insert(customer.customer_id, customer);
            Ok(())
        }

        fn fetch(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("customer mutex poisoned")
                .get(&id)
                .cloned())
        }

        fn update(&self, customer: Customer) -> Result<(), RepositoryError> {
            self.upsert(customer)
        }
    }

    #[derive(Default)]
    struct MapLoans {
        records: Mutex<HashMap<LoanId, Loan>>,
    }

    impl LoanStore for MapLoans {
        fn create(
            &self,
            _loan: crate::lending::origination::domain::NewLoan,
        ) -> Result<Loan, RepositoryError> {
            Err(RepositoryError::Unavailable("not used".to_string()))
        }

        fn upsert(&self, loan: Loan) -> Result<(), RepositoryError> {
            self.records
                .lock()
                .expect("loan mutex poisoned")
                .insert(loan.loan_id, loan);
            Ok(())
        }

        fn fetch(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("loan mutex poisoned")
                .get(&id)
                .cloned())
        }

        fn for_customer(&self, customer: CustomerId) -> Result<Vec<Loan>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("loan mutex poisoned")
                .values()
                .filter(|loan| loan.customer_id == customer)
                .cloned()
                .collect())
        }
    }

    #[test]
    fn parse_date_accepts_common_export_formats() {
        let iso = parser::parse_date_for_tests("2023-03-01").expect("iso date");
        assert_eq!(iso, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());

        let us = parser::parse_date_for_tests("3/1/2023").expect("us date");
        assert_eq!(us, iso);

        assert!(parser::parse_date_for_tests("  ").is_none());
        assert!(parser::parse_date_for_tests("not-a-date").is_none());
    }

    #[test]
    fn customers_parse_with_blank_debt() {
        let customers =
            PortfolioImporter::customers_from_reader(Cursor::new(CUSTOMER_CSV)).expect("parses");
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].customer_id, CustomerId(1));
        assert_eq!(customers[1].current_debt, 0.0);
        assert_eq!(customers[1].monthly_income, 65000.0);
    }

    #[test]
    fn loans_reject_unparsable_dates() {
        let csv = "\
Customer ID,Loan ID,Loan Amount,Tenure,Interest Rate,Monthly payment,EMIs paid on Time,Date of Approval,End Date
1,501,200000,24,11.5,9366.11,24,whenever,2023-03-01
";
        let error =
            PortfolioImporter::loans_from_reader(Cursor::new(csv)).expect_err("date should fail");
        match error {
            PortfolioImportError::Date { column, value } => {
                assert_eq!(column, "Date of Approval");
                assert_eq!(value, "whenever");
            }
            other => panic!("expected date error, got {other:?}"),
        }
    }

    #[test]
    fn ingest_skips_loans_without_a_customer() {
        let customers =
            PortfolioImporter::customers_from_reader(Cursor::new(CUSTOMER_CSV)).expect("parses");
        let loans = PortfolioImporter::loans_from_reader(Cursor::new(LOAN_CSV)).expect("parses");

        let customer_store = MapCustomers::default();
        let loan_store = MapLoans::default();
        let summary =
            PortfolioImporter::ingest_into(customers, loans, &customer_store, &loan_store)
                .expect("ingest succeeds");

        assert_eq!(summary.customers_loaded, 2);
        assert_eq!(summary.loans_loaded, 1);
        assert_eq!(summary.loans_skipped, 1);
        assert!(loan_store.fetch(LoanId(501)).expect("fetch").is_some());
        assert!(loan_store.fetch(LoanId(502)).expect("fetch").is_none());
    }

    #[test]
    fn reingesting_the_same_exports_is_idempotent() {
        let customer_store = MapCustomers::default();
        let loan_store = MapLoans::default();

        for _ in 0..2 {
            let customers = PortfolioImporter::customers_from_reader(Cursor::new(CUSTOMER_CSV))
                .expect("parses");
            let loans =
                PortfolioImporter::loans_from_reader(Cursor::new(LOAN_CSV)).expect("parses");
            PortfolioImporter::ingest_into(customers, loans, &customer_store, &loan_store)
                .expect("ingest succeeds");
        }

        assert_eq!(
            customer_store.records.lock().expect("customer mutex").len(),
            2
        );
        assert_eq!(loan_store.records.lock().expect("loan mutex").len(), 1);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = PortfolioImporter::customers_from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        match error {
            PortfolioImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
