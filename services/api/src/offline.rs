use crate::infra::{default_evaluation_config, InMemoryCustomerStore, InMemoryLoanStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use loan_origination::error::AppError;
use loan_origination::lending::origination::{CustomerId, LoanRequest, OriginationService};
use loan_origination::lending::portfolio::PortfolioImporter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct IngestArgs {
    /// Customer book CSV export
    #[arg(long)]
    pub(crate) customers: PathBuf,
    /// Loan book CSV export
    #[arg(long)]
    pub(crate) loans: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Customer book CSV export
    #[arg(long)]
    pub(crate) customers: PathBuf,
    /// Loan book CSV export
    #[arg(long)]
    pub(crate) loans: PathBuf,
    /// Customer asking for credit
    #[arg(long)]
    pub(crate) customer_id: u64,
    /// Requested principal
    #[arg(long)]
    pub(crate) amount: f64,
    /// Requested annual rate in percent
    #[arg(long)]
    pub(crate) rate: f64,
    /// Requested tenure in months
    #[arg(long)]
    pub(crate) tenure: u32,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_ingest(args: IngestArgs) -> Result<(), AppError> {
    let (_, _, summary) = load_book(&args.customers, &args.loans)?;

    println!("Back-book ingest");
    println!("  customers loaded: {}", summary.customers_loaded);
    println!("  loans loaded:     {}", summary.loans_loaded);
    println!("  loans skipped:    {}", summary.loans_skipped);

    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let (customers, loans, _) = load_book(&args.customers, &args.loans)?;

    let service = Arc::new(OriginationService::new(
        customers,
        loans,
        default_evaluation_config(),
    ));

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let request = LoanRequest {
        customer_id: CustomerId(args.customer_id),
        loan_amount: args.amount,
        interest_rate: args.rate,
        tenure: args.tenure,
    };

    let view = service.check_eligibility(request, today)?;

    println!("Eligibility decision for customer {}", args.customer_id);
    println!("  approval:            {}", view.approval);
    println!("  requested rate:      {}%", view.interest_rate);
    match view.corrected_interest_rate {
        Some(rate) => println!("  corrected rate:      {rate}%"),
        None => println!("  corrected rate:      -"),
    }
    println!("  tenure:              {} months", view.tenure);
    println!("  monthly installment: {}", view.monthly_installment);

    Ok(())
}

fn load_book(
    customer_csv: &PathBuf,
    loan_csv: &PathBuf,
) -> Result<
    (
        Arc<InMemoryCustomerStore>,
        Arc<InMemoryLoanStore>,
        loan_origination::lending::portfolio::IngestSummary,
    ),
    AppError,
> {
    let book_customers =
        PortfolioImporter::customers_from_path(customer_csv).map_err(AppError::from)?;
    let book_loans = PortfolioImporter::loans_from_path(loan_csv).map_err(AppError::from)?;

    let customers = Arc::new(InMemoryCustomerStore::default());
    let loans = Arc::new(InMemoryLoanStore::default());
    let summary =
        PortfolioImporter::ingest_into(book_customers, book_loans, customers.as_ref(), loans.as_ref())
            .map_err(AppError::from)?;

    Ok((customers, loans, summary))
}
