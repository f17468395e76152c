use std::sync::OnceLock;

use regex::Regex;

use crate::models::BillingInfo;
use crate::utils::error::AppError;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// Checks the billing record the checkout form submitted: every field is a
/// required non-empty string and the email must look like an address.
pub fn validate_billing_info(info: &BillingInfo) -> Result<(), AppError> {
    let required = [
        ("fullName", &info.full_name),
        ("email", &info.email),
        ("address", &info.address),
        ("city", &info.city),
        ("country", &info.country),
        ("zipCode", &info.zip_code),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Missing required billing field: {field}"
            )));
        }
    }

    if !email_regex().is_match(info.email.trim()) {
        return Err(AppError::ValidationError(format!(
            "Invalid email address: {}",
            info.email
        )));
    }

    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::ValidationError(
            "Quantity must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
