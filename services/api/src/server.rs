use crate::cli::ServeArgs;
use crate::infra::{default_evaluation_config, AppState, InMemoryCustomerStore, InMemoryLoanStore};
use crate::routes::with_origination_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_origination::config::{AppConfig, SeedConfig};
use loan_origination::error::AppError;
use loan_origination::lending::origination::OriginationService;
use loan_origination::lending::portfolio::{IngestSummary, PortfolioImporter};
use loan_origination::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let customers = Arc::new(InMemoryCustomerStore::default());
    let loans = Arc::new(InMemoryLoanStore::default());

    if config.seed.is_configured() {
        let summary = seed_stores(&config.seed, customers.as_ref(), loans.as_ref())?;
        info!(
            customers = summary.customers_loaded,
            loans = summary.loans_loaded,
            skipped = summary.loans_skipped,
            "back-book seeded from CSV exports"
        );
    }

    let service = Arc::new(OriginationService::new(
        customers,
        loans,
        default_evaluation_config(),
    ));

    let app = with_origination_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan origination service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn seed_stores(
    seed: &SeedConfig,
    customers: &InMemoryCustomerStore,
    loans: &InMemoryLoanStore,
) -> Result<IngestSummary, AppError> {
    let book_customers = match &seed.customer_csv {
        Some(path) => PortfolioImporter::customers_from_path(path).map_err(AppError::from)?,
        None => Vec::new(),
    };
    let book_loans = match &seed.loan_csv {
        Some(path) => PortfolioImporter::loans_from_path(path).map_err(AppError::from)?,
        None => Vec::new(),
    };

    PortfolioImporter::ingest_into(book_customers, book_loans, customers, loans)
        .map_err(AppError::from)
}
