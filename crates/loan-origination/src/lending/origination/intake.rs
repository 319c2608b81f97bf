use super::domain::{LoanRequest, RegistrationRequest};

/// Validation errors raised before any scoring or persistence happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("first and last name are required")]
    BlankName,
    #[error("applicant age {0} is outside the serviceable range")]
    AgeOutOfRange(u8),
    #[error("monthly income must be positive, got {0}")]
    NonPositiveIncome(f64),
    #[error("phone number must carry 7 to 15 digits, got '{0}'")]
    MalformedPhoneNumber(String),
    #[error("loan amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    #[error("interest rate {0} is outside the 0-100 percent range")]
    RateOutOfRange(f64),
    #[error("tenure must be between {min} and {max} months, got {found}")]
    TenureOutOfRange { min: u32, max: u32, found: u32 },
}

const MIN_APPLICANT_AGE: u8 = 18;
const MAX_APPLICANT_AGE: u8 = 100;
const MIN_TENURE_MONTHS: u32 = 1;
const MAX_TENURE_MONTHS: u32 = 360;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Guard rejecting malformed payloads before they reach the decision engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn check_registration(&self, request: &RegistrationRequest) -> Result<(), IntakeViolation> {
        if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
            return Err(IntakeViolation::BlankName);
        }

        if !(MIN_APPLICANT_AGE..=MAX_APPLICANT_AGE).contains(&request.age) {
            return Err(IntakeViolation::AgeOutOfRange(request.age));
        }

        if !request.monthly_income.is_finite() || request.monthly_income <= 0.0 {
            return Err(IntakeViolation::NonPositiveIncome(request.monthly_income));
        }

        let digits = request
            .phone_number
            .chars()
            .filter(char::is_ascii_digit)
            .count();
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
            return Err(IntakeViolation::MalformedPhoneNumber(
                request.phone_number.clone(),
            ));
        }

        Ok(())
    }

    pub fn check_loan_request(&self, request: &LoanRequest) -> Result<(), IntakeViolation> {
        if !request.loan_amount.is_finite() || request.loan_amount <= 0.0 {
            return Err(IntakeViolation::NonPositiveAmount(request.loan_amount));
        }

        if !request.interest_rate.is_finite()
            || !(0.0..=100.0).contains(&request.interest_rate)
        {
            return Err(IntakeViolation::RateOutOfRange(request.interest_rate));
        }

        if !(MIN_TENURE_MONTHS..=MAX_TENURE_MONTHS).contains(&request.tenure) {
            return Err(IntakeViolation::TenureOutOfRange {
                min: MIN_TENURE_MONTHS,
                max: MAX_TENURE_MONTHS,
                found: request.tenure,
            });
        }

        Ok(())
    }
}
