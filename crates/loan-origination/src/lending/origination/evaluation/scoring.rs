use chrono::NaiveDate;

use super::super::domain::{Customer, Loan};
use super::config::EvaluationConfig;
use super::{ScoreComponent, ScoreFactor};

pub(crate) struct ScoreSignals {
    pub(crate) active_principal: f64,
    pub(crate) active_installment_total: f64,
    pub(crate) over_limit: bool,
}

pub(crate) fn score_history(
    customer: &Customer,
    loans: &[Loan],
    today: NaiveDate,
    config: &EvaluationConfig,
) -> (Vec<ScoreComponent>, u8, ScoreSignals) {
    let (active, closed): (Vec<&Loan>, Vec<&Loan>) =
        loans.iter().partition(|loan| loan.is_active(today));

    let active_principal: f64 = active.iter().map(|loan| loan.principal).sum();
    let active_installment_total: f64 = active.iter().map(|loan| loan.monthly_installment).sum();

    let mut components = Vec::new();

    // Exposure beyond the approved limit disqualifies before any weighting.
    if active_principal > customer.approved_limit {
        components.push(ScoreComponent {
            factor: ScoreFactor::ActiveExposure,
            delta: -config.baseline_score,
            notes: format!(
                "active principal {:.2} exceeds approved limit {:.2}",
                active_principal, customer.approved_limit
            ),
        });
        let signals = ScoreSignals {
            active_principal,
            active_installment_total,
            over_limit: true,
        };
        return (components, 0, signals);
    }

    let mut total = config.baseline_score;

    let late_closed = closed
        .iter()
        .filter(|loan| !loan.fully_paid_on_time())
        .count() as i32;
    if late_closed > 0 {
        let delta = -config.late_repayment_penalty * late_closed;
        components.push(ScoreComponent {
            factor: ScoreFactor::RepaymentHistory,
            delta,
            notes: format!("{late_closed} settled loan(s) missed installments"),
        });
        total += delta;
    }

    if !active.is_empty() {
        let delta = -config.active_loan_penalty * active.len() as i32;
        components.push(ScoreComponent {
            factor: ScoreFactor::ActiveLoanLoad,
            delta,
            notes: format!("{} loan(s) currently running", active.len()),
        });
        total += delta;
    }

    if !closed.is_empty() {
        let delta = config.settled_loan_bonus * closed.len() as i32;
        components.push(ScoreComponent {
            factor: ScoreFactor::SettledLoans,
            delta,
            notes: format!("{} loan(s) ran to completion", closed.len()),
        });
        total += delta;
    }

    let score = total.clamp(0, 100) as u8;
    let signals = ScoreSignals {
        active_principal,
        active_installment_total,
        over_limit: false,
    };

    (components, score, signals)
}
