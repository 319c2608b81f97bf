use serde::{Deserialize, Serialize};

/// Scoring weights and policy dials for the origination rubric.
///
/// Tier boundaries are exclusive lower bounds: a score must exceed
/// `prime_score_floor` to borrow at `prime_rate_floor`, and a score at or
/// below `subprime_score_floor` is ineligible outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub baseline_score: i32,
    pub late_repayment_penalty: i32,
    pub active_loan_penalty: i32,
    pub settled_loan_bonus: i32,
    pub prime_score_floor: u8,
    pub near_prime_score_floor: u8,
    pub subprime_score_floor: u8,
    /// Minimum annual rates (percent) per tier.
    pub prime_rate_floor: f64,
    pub near_prime_rate_floor: f64,
    pub subprime_rate_floor: f64,
    /// Share of monthly income that active installments may consume.
    pub installment_income_cap: f64,
    /// Approved limit is this multiple of monthly income...
    pub approved_limit_income_multiple: f64,
    /// ...rounded to the nearest multiple of this amount.
    pub approved_limit_rounding: f64,
}

impl EvaluationConfig {
    /// Minimum rate the customer's tier allows, or `None` below every tier.
    pub fn tier_rate_floor(&self, score: u8) -> Option<f64> {
        if score > self.prime_score_floor {
            Some(self.prime_rate_floor)
        } else if score > self.near_prime_score_floor {
            Some(self.near_prime_rate_floor)
        } else if score > self.subprime_score_floor {
            Some(self.subprime_rate_floor)
        } else {
            None
        }
    }

    /// Credit limit derived from income at registration time.
    pub fn approved_limit_for(&self, monthly_income: f64) -> f64 {
        let raw = self.approved_limit_income_multiple * monthly_income;
        (raw / self.approved_limit_rounding).round() * self.approved_limit_rounding
    }
}
