//! # Refund Contract
//!
//! Shape checks for a staff refund submission: a resolvable request
//! reference, a refund type enabled by policy, and a non-negative
//! amount in minor units. Whether the request is actually in refund
//! processing is the lifecycle machine's check at finalization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rma_core::{Amount, RefundType, RequestId, ReturnPolicy, ValidationError};
use rma_refund::RefundDraft;

use crate::violations::Violations;

/// A raw refund submission as it arrives from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefundInput {
    /// The return request, as a UUID string.
    pub request_id: String,
    /// Refund type wire name.
    pub refund_type: String,
    /// Amount in integer minor units.
    pub amount_minor_units: i64,
}

/// A normalized, validated refund submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundSubmission {
    /// The return request being refunded.
    pub request_id: RequestId,
    /// The draft to finalize once the lifecycle permits it.
    pub draft: RefundDraft,
}

/// Validate a refund submission against policy.
pub fn validate_refund(
    input: RefundInput,
    policy: &ReturnPolicy,
) -> Result<RefundSubmission, ValidationError> {
    let mut violations = Violations::new();

    let request_id = match Uuid::parse_str(input.request_id.trim()) {
        Ok(id) => Some(RequestId::from_uuid(id)),
        Err(_) => {
            violations.add("request_id", "must be a valid return request reference");
            None
        }
    };

    let refund_type = match RefundType::from_name(input.refund_type.trim()) {
        Some(rt) if policy.refund_type_enabled(rt) => Some(rt),
        Some(rt) => {
            violations.add(
                "refund_type",
                format!("refund type {rt} is not enabled by policy"),
            );
            None
        }
        None => {
            violations.add(
                "refund_type",
                "must be one of original_payment, store_credit, bank_transfer",
            );
            None
        }
    };

    let amount = match Amount::from_minor_units(input.amount_minor_units) {
        Ok(a) => Some(a),
        Err(e) => {
            violations.add("amount_minor_units", e.to_string());
            None
        }
    };

    violations.finish_with(|| RefundSubmission {
        request_id: request_id.expect("violations empty implies request id parsed"),
        draft: RefundDraft {
            refund_type: refund_type.expect("violations empty implies type parsed"),
            amount: amount.expect("violations empty implies amount parsed"),
        },
    })
}
