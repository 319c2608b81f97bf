use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{CustomerId, LoanId, LoanRequest, RegistrationRequest};
use super::repository::{CustomerStore, LoanStore, RepositoryError};
use super::service::{OriginationService, OriginationServiceError};

/// Router builder exposing the origination endpoints.
pub fn origination_router<C, L>(service: Arc<OriginationService<C, L>>) -> Router
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    Router::new()
        .route("/api/v1/register", post(register_handler::<C, L>))
        .route(
            "/api/v1/check-eligibility",
            post(check_eligibility_handler::<C, L>),
        )
        .route("/api/v1/create-loan", post(create_loan_handler::<C, L>))
        .route("/api/v1/view-loan/:loan_id", get(view_loan_handler::<C, L>))
        .route(
            "/api/v1/view-loans/:customer_id",
            get(view_loans_handler::<C, L>),
        )
        .with_state(service)
}

pub(crate) async fn register_handler<C, L>(
    State(service): State<Arc<OriginationService<C, L>>>,
    axum::Json(request): axum::Json<RegistrationRequest>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    match service.register(request) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_eligibility_handler<C, L>(
    State(service): State<Arc<OriginationService<C, L>>>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    let today = Local::now().date_naive();
    match service.check_eligibility(request, today) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_loan_handler<C, L>(
    State(service): State<Arc<OriginationService<C, L>>>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    let today = Local::now().date_naive();
    match service.create_loan(request, today) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_loan_handler<C, L>(
    State(service): State<Arc<OriginationService<C, L>>>,
    Path(loan_id): Path<u64>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    match service.loan_detail(LoanId(loan_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_loans_handler<C, L>(
    State(service): State<Arc<OriginationService<C, L>>>,
    Path(customer_id): Path<u64>,
) -> Response
where
    C: CustomerStore + 'static,
    L: LoanStore + 'static,
{
    match service.customer_loans(CustomerId(customer_id)) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: OriginationServiceError) -> Response {
    let status = match &error {
        OriginationServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        OriginationServiceError::CustomerNotFound(_) | OriginationServiceError::LoanNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        OriginationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        OriginationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        OriginationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
