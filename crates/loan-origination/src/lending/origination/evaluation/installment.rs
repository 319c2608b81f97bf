/// Equal-installment amortization payment for the given terms.
///
/// `annual_rate` is in percent. A zero rate degenerates to straight-line
/// repayment. Tenure is validated upstream; zero is guarded to avoid a
/// division by zero.
pub fn monthly_installment(principal: f64, annual_rate: f64, tenure: u32) -> f64 {
    if tenure == 0 {
        return 0.0;
    }

    let periodic = (annual_rate / 12.0) / 100.0;
    if periodic > 0.0 {
        let growth = (1.0 + periodic).powi(tenure as i32);
        principal * periodic * growth / (growth - 1.0)
    } else {
        principal / f64::from(tenure)
    }
}

/// Round a currency amount to two decimals for external reporting.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
