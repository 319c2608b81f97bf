mod config;
mod installment;
mod policy;
mod scoring;

pub use config::EvaluationConfig;
pub use installment::{monthly_installment, round_currency};
pub use policy::{LoanDecision, RejectionReason};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Customer, CustomerId, Loan, LoanRequest};

/// Stateless engine applying the scoring heuristic and the tier policy.
pub struct EligibilityEngine {
    config: EvaluationConfig,
}

impl EligibilityEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Credit score for a customer's loan history; a customer with no record
    /// scores zero and lands in the worst tier.
    pub fn credit_score(
        &self,
        customer: Option<&Customer>,
        loans: &[Loan],
        today: NaiveDate,
    ) -> u8 {
        match customer {
            Some(customer) => scoring::score_history(customer, loans, today, &self.config).1,
            None => 0,
        }
    }

    /// Evaluate requested terms against the customer's history.
    pub fn evaluate(
        &self,
        customer: &Customer,
        loans: &[Loan],
        request: &LoanRequest,
        today: NaiveDate,
    ) -> EligibilityOutcome {
        let (components, score, signals) =
            scoring::score_history(customer, loans, today, &self.config);
        let decision = policy::decide(customer, request, score, &signals, &self.config);

        let installment = match &decision {
            LoanDecision::Approved { effective_rate, .. } => {
                monthly_installment(request.loan_amount, *effective_rate, request.tenure)
            }
            LoanDecision::Rejected(_) => 0.0,
        };

        EligibilityOutcome {
            customer_id: customer.customer_id,
            score,
            decision,
            monthly_installment: installment,
            components,
        }
    }
}

/// Discrete contribution to a credit score, kept for decision audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub delta: i32,
    pub notes: String,
}

/// Factors permitted in the scoring heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactor {
    ActiveExposure,
    RepaymentHistory,
    ActiveLoanLoad,
    SettledLoans,
}

/// Evaluation result for one requested loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub customer_id: CustomerId,
    pub score: u8,
    pub decision: LoanDecision,
    /// Unrounded; zero when the decision rejects the request.
    pub monthly_installment: f64,
    pub components: Vec<ScoreComponent>,
}
