//! # Customer Login Contract
//!
//! Customers look up their return by order number and the phone number
//! on the order. Both fields are checked and both violations are
//! reported together when both are wrong.

use serde::{Deserialize, Serialize};

use rma_core::ValidationError;

use crate::limits::ORDER_NUMBER_MAX;
use crate::violations::Violations;

/// Raw login form fields as they arrive from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerLoginInput {
    /// The order number printed on the order confirmation.
    pub order_number: String,
    /// The phone number on the order.
    pub phone: String,
}

/// A normalized, validated login lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerLogin {
    /// Trimmed order number, non-empty, at most 100 characters.
    pub order_number: String,
    /// Phone in the national mobile format: `09` followed by 8 digits.
    pub phone: String,
}

/// Validate a customer login lookup.
pub fn validate_customer_login(
    input: CustomerLoginInput,
) -> Result<CustomerLogin, ValidationError> {
    let mut violations = Violations::new();

    let order_number = input.order_number.trim().to_string();
    if order_number.is_empty() {
        violations.add("order_number", "must not be empty");
    } else if order_number.chars().count() > ORDER_NUMBER_MAX {
        violations.add(
            "order_number",
            format!("must be at most {ORDER_NUMBER_MAX} characters"),
        );
    }

    let phone = input.phone.trim().to_string();
    if !is_mobile_number(&phone) {
        violations.add("phone", "must be 09 followed by 8 digits");
    }

    violations.finish(CustomerLogin {
        order_number,
        phone,
    })
}

fn is_mobile_number(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 10 && phone.starts_with("09") && bytes.iter().all(|b| b.is_ascii_digit())
}
