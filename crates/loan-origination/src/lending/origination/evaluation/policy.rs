use serde::{Deserialize, Serialize};

use super::super::domain::{Customer, LoanRequest};
use super::config::EvaluationConfig;
use super::scoring::ScoreSignals;

/// Verdict for a requested loan, with any rate correction applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved {
        /// Rate the installment is computed with (the tier floor when corrected).
        effective_rate: f64,
        /// Set only when the requested rate sat below the tier floor.
        corrected_rate: Option<f64>,
    },
    Rejected(RejectionReason),
}

impl LoanDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, LoanDecision::Approved { .. })
    }

    pub fn corrected_rate(&self) -> Option<f64> {
        match self {
            LoanDecision::Approved { corrected_rate, .. } => *corrected_rate,
            LoanDecision::Rejected(_) => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            LoanDecision::Approved {
                corrected_rate: None,
                ..
            } => "approved at the requested rate".to_string(),
            LoanDecision::Approved {
                corrected_rate: Some(rate),
                ..
            } => format!("approved at the corrected rate of {rate}%"),
            LoanDecision::Rejected(reason) => reason.summary(),
        }
    }
}

/// Why a request was declined, kept for adverse-action messaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    ScoreBelowCutoff { score: u8 },
    ExposureOverLimit,
    InstallmentBurden { current_burden: f64, cap: f64 },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::ScoreBelowCutoff { score } => {
                format!("credit score {score} is below the lending cutoff")
            }
            RejectionReason::ExposureOverLimit => {
                "active loan principal exceeds the approved limit".to_string()
            }
            RejectionReason::InstallmentBurden { current_burden, cap } => format!(
                "current installments {current_burden:.2} exceed the income cap {cap:.2}"
            ),
        }
    }
}

pub(crate) fn decide(
    customer: &Customer,
    request: &LoanRequest,
    score: u8,
    signals: &ScoreSignals,
    config: &EvaluationConfig,
) -> LoanDecision {
    // The installment-burden rule overrides every tier outcome, and any rate
    // correction is discarded with it.
    let cap = customer.monthly_income * config.installment_income_cap;
    if signals.active_installment_total > cap {
        return LoanDecision::Rejected(RejectionReason::InstallmentBurden {
            current_burden: signals.active_installment_total,
            cap,
        });
    }

    if signals.over_limit {
        return LoanDecision::Rejected(RejectionReason::ExposureOverLimit);
    }

    let Some(floor) = config.tier_rate_floor(score) else {
        return LoanDecision::Rejected(RejectionReason::ScoreBelowCutoff { score });
    };

    if request.interest_rate >= floor {
        LoanDecision::Approved {
            effective_rate: request.interest_rate,
            corrected_rate: None,
        }
    } else {
        LoanDecision::Approved {
            effective_rate: floor,
            corrected_rate: Some(floor),
        }
    }
}
