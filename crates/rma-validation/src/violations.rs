//! # Violation Collector
//!
//! Accumulates field violations across a whole contract before deciding
//! the outcome. Contracts call [`Violations::add`] for every problem they
//! find and convert to a result exactly once at the end, so the caller
//! always sees the full list.

use rma_core::{FieldViolation, ValidationError};

/// Accumulator for field violations within one contract invocation.
#[derive(Debug, Default)]
pub struct Violations {
    list: Vec<FieldViolation>,
}

impl Violations {
    /// Start with no violations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`.
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.list.push(FieldViolation::new(field, reason));
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Fold another collector's findings into this one.
    pub fn merge(&mut self, other: Violations) {
        self.list.extend(other.list);
    }

    /// Conclude the contract: the normalized value if clean, otherwise a
    /// [`ValidationError`] carrying everything recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.list.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.list))
        }
    }

    /// Conclude a contract whose normalized value is built lazily, so a
    /// failed contract never constructs it.
    pub fn finish_with<T>(self, build: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.list.is_empty() {
            Ok(build())
        } else {
            Err(ValidationError::new(self.list))
        }
    }
}
