//! # Error Hierarchy
//!
//! Structured error types for the entire Returns Stack, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Each subsystem defines specific error variants that carry diagnostic
//! context: the operation that failed, the state at the time of failure,
//! and actionable information for operators. Every failure is scoped to a
//! single operation — nothing in this hierarchy is fatal to the process.
//!
//! State names appear here as plain strings so that this crate stays free
//! of internal dependencies; the state layer supplies its canonical names
//! when constructing these errors.

use thiserror::Error;

use crate::amount::AmountError;

/// Top-level error type for the Returns Stack.
#[derive(Error, Debug)]
pub enum RmaError {
    /// Malformed input; recoverable by the caller correcting it.
    /// Never mutates state.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Status transition violation.
    #[error("state transition error: {0}")]
    Transition(#[from] TransitionError),

    /// Operation invoked while the aggregate is in a state that does not
    /// permit it.
    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    /// Return application or approval attempted outside the return window.
    #[error("deadline error: {0}")]
    Deadline(#[from] DeadlineError),

    /// A transition lost a race against another writer. The caller should
    /// re-read the current state and retry if still applicable.
    #[error("concurrency conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// Identifier newtype validation failure.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Monetary amount validation failure.
    #[error("amount error: {0}")]
    Amount(#[from] AmountError),

    /// No return request exists under the given identifier.
    #[error("unknown return request: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single violated field reported by a validation contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// The input field that failed validation.
    pub field: String,
    /// Why it was rejected.
    pub reason: String,
}

impl FieldViolation {
    /// Construct a violation for `field` with the given reason.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Malformed input rejected by a validation contract.
///
/// Carries **every** violated field, not just the first — contracts never
/// short-circuit, so a caller can correct all problems in one pass.
#[derive(Error, Debug)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    /// All violated fields with their reasons, in input order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Construct from a non-empty list of violations.
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Construct from a single violation.
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, reason)],
        }
    }

    /// Whether a particular field is among the violations.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    let parts: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
    format!("{} field violation(s): {}", violations.len(), parts.join("; "))
}

/// Errors raised by the lifecycle status machine.
#[derive(Error, Debug)]
pub enum TransitionError {
    /// The `(current, target)` pair is not in the adjacency table.
    /// There is no "any to any" escape hatch.
    #[error("illegal transition from {from} to {to}")]
    Illegal {
        /// The current status name.
        from: String,
        /// The attempted target status name.
        to: String,
    },

    /// The edge exists but its entry condition is not met.
    #[error("transition from {from} to {to} requires {requirement}")]
    PreconditionFailed {
        /// The current status name.
        from: String,
        /// The target status name.
        to: String,
        /// The unmet entry condition.
        requirement: String,
    },

    /// A staff-override edge was requested without an override reason.
    #[error("override transition from {from} to {to} requires an explicit staff reason")]
    MissingOverrideReason {
        /// The current status name.
        from: String,
        /// The target status name.
        to: String,
    },
}

/// An operation was invoked while the aggregate is in a state that does
/// not permit it (e.g. refund finalization outside `refund_processing`).
#[derive(Error, Debug)]
#[error("cannot {operation} while in {actual}: requires {required}")]
pub struct InvalidStateError {
    /// The operation that was attempted.
    pub operation: String,
    /// The status the operation requires.
    pub required: String,
    /// The status the aggregate was actually in.
    pub actual: String,
}

/// The return window gate rejected an application or approval.
///
/// Recoverable only by policy override, not by retry.
#[derive(Error, Debug)]
pub enum DeadlineError {
    /// The window has elapsed.
    #[error("return window of {window_days} day(s) has expired for delivery at {delivered_at}")]
    WindowExpired {
        /// When the order was delivered (ISO 8601).
        delivered_at: String,
        /// The policy window in days.
        window_days: u32,
    },

    /// No delivery timestamp is on record, so no window can be computed.
    #[error("no delivery timestamp on record; return window cannot be established")]
    NotDelivered,
}

/// A compare-and-set status update observed a different current status
/// than the caller expected.
#[derive(Error, Debug)]
#[error("request {request} changed concurrently: expected status {expected}, found {actual}")]
pub struct ConflictError {
    /// The contested request id.
    pub request: String,
    /// The status the caller based its update on.
    pub expected: String,
    /// The status actually stored.
    pub actual: String,
}

/// Validation errors for identifier newtypes.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Request number does not match `RMA-YYYYMMDD-XXXXXX`.
    #[error("invalid request number: \"{0}\" (expected RMA-YYYYMMDD-XXXXXX)")]
    InvalidRequestNumber(String),

    /// Actor identity is empty or exceeds the length cap.
    #[error("invalid actor identity: \"{0}\" (expected 1-64 non-blank characters)")]
    InvalidActor(String),
}
