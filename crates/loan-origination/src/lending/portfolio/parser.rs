use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::PortfolioImportError;
use crate::lending::origination::domain::{Customer, CustomerId, Loan, LoanId};

pub(crate) fn parse_customers<R: Read>(reader: R) -> Result<Vec<Customer>, PortfolioImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut customers = Vec::new();

    for record in csv_reader.deserialize::<CustomerRow>() {
        let row = record?;
        customers.push(Customer {
            customer_id: CustomerId(row.customer_id),
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age.unwrap_or(0),
            phone_number: row.phone_number,
            monthly_income: row.monthly_salary,
            approved_limit: row.approved_limit,
            current_debt: row.current_debt.unwrap_or(0.0),
        });
    }

    Ok(customers)
}

pub(crate) fn parse_loans<R: Read>(reader: R) -> Result<Vec<Loan>, PortfolioImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut loans = Vec::new();

    for record in csv_reader.deserialize::<LoanRow>() {
        let row = record?;
        let start_date = parse_date(&row.start_date).ok_or_else(|| PortfolioImportError::Date {
            column: "Date of Approval",
            value: row.start_date.clone(),
        })?;
        let end_date = parse_date(&row.end_date).ok_or_else(|| PortfolioImportError::Date {
            column: "End Date",
            value: row.end_date.clone(),
        })?;

        loans.push(Loan {
            loan_id: LoanId(row.loan_id),
            customer_id: CustomerId(row.customer_id),
            principal: row.loan_amount,
            annual_rate: row.interest_rate,
            tenure: row.tenure,
            monthly_installment: row.monthly_payment,
            emis_paid_on_time: row.emis_paid_on_time,
            start_date,
            end_date,
        });
    }

    Ok(loans)
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(rename = "Customer ID")]
    customer_id: u64,
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Last Name")]
    last_name: String,
    #[serde(rename = "Age", default)]
    age: Option<u8>,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Monthly Salary")]
    monthly_salary: f64,
    #[serde(rename = "Approved Limit")]
    approved_limit: f64,
    #[serde(rename = "Current Debt", default, deserialize_with = "empty_as_none")]
    current_debt: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    #[serde(rename = "Customer ID")]
    customer_id: u64,
    #[serde(rename = "Loan ID")]
    loan_id: u64,
    #[serde(rename = "Loan Amount")]
    loan_amount: f64,
    #[serde(rename = "Tenure")]
    tenure: u32,
    #[serde(rename = "Interest Rate")]
    interest_rate: f64,
    #[serde(rename = "Monthly payment")]
    monthly_payment: f64,
    #[serde(rename = "EMIs paid on Time")]
    emis_paid_on_time: u32,
    #[serde(rename = "Date of Approval")]
    start_date: String,
    #[serde(rename = "End Date")]
    end_date: String,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Spreadsheet exports are inconsistent about date formats; accept the common ones.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
