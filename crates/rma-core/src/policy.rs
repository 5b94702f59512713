//! # Operator Policy
//!
//! Every operator-tunable constant in one serde-loadable struct. The
//! engine receives a [`ReturnPolicy`] at construction and never hardcodes
//! any of these values, so policy can be retuned without code changes.

use serde::{Deserialize, Serialize};

use crate::domain::{ImageContentType, RefundType};
use crate::error::{FieldViolation, ValidationError};

/// Operator-supplied policy for the returns workflow.
///
/// The `Default` carries the production constants; deployments override
/// individual fields via their configuration source (every field has a
/// serde default, so partial overrides deserialize cleanly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnPolicy {
    /// Days after delivery during which a return may be applied for.
    #[serde(default = "defaults::deadline_days")]
    pub deadline_days: u32,

    /// Minimum number of evidence images per application batch.
    #[serde(default = "defaults::min_images")]
    pub min_images: usize,

    /// Maximum number of evidence images per application batch.
    #[serde(default = "defaults::max_images")]
    pub max_images: usize,

    /// Per-file size cap in bytes.
    #[serde(default = "defaults::max_image_bytes")]
    pub max_image_bytes: u64,

    /// Content types accepted for evidence uploads.
    #[serde(default = "defaults::accepted_image_types")]
    pub accepted_image_types: Vec<ImageContentType>,

    /// Refund types this deployment offers.
    #[serde(default = "defaults::enabled_refund_types")]
    pub enabled_refund_types: Vec<RefundType>,
}

mod defaults {
    use super::*;

    pub(super) fn deadline_days() -> u32 {
        7
    }
    pub(super) fn min_images() -> usize {
        3
    }
    pub(super) fn max_images() -> usize {
        5
    }
    pub(super) fn max_image_bytes() -> u64 {
        10 * 1024 * 1024
    }
    pub(super) fn accepted_image_types() -> Vec<ImageContentType> {
        ImageContentType::all().to_vec()
    }
    pub(super) fn enabled_refund_types() -> Vec<RefundType> {
        RefundType::all().to_vec()
    }
}

impl Default for ReturnPolicy {
    fn default() -> Self {
        Self {
            deadline_days: defaults::deadline_days(),
            min_images: defaults::min_images(),
            max_images: defaults::max_images(),
            max_image_bytes: defaults::max_image_bytes(),
            accepted_image_types: defaults::accepted_image_types(),
            enabled_refund_types: defaults::enabled_refund_types(),
        }
    }
}

impl ReturnPolicy {
    /// Whether uploads of this content type are accepted.
    pub fn accepts_content_type(&self, content_type: ImageContentType) -> bool {
        self.accepted_image_types.contains(&content_type)
    }

    /// Whether this deployment offers the given refund type.
    pub fn refund_type_enabled(&self, refund_type: RefundType) -> bool {
        self.enabled_refund_types.contains(&refund_type)
    }

    /// Check the policy itself for operator misconfiguration, collecting
    /// every problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if self.min_images > self.max_images {
            violations.push(FieldViolation::new(
                "min_images",
                format!(
                    "minimum image count {} exceeds maximum {}",
                    self.min_images, self.max_images
                ),
            ));
        }
        if self.max_image_bytes == 0 {
            violations.push(FieldViolation::new(
                "max_image_bytes",
                "per-file size cap must be positive",
            ));
        }
        if self.accepted_image_types.is_empty() {
            violations.push(FieldViolation::new(
                "accepted_image_types",
                "at least one content type must be accepted",
            ));
        }
        if self.enabled_refund_types.is_empty() {
            violations.push(FieldViolation::new(
                "enabled_refund_types",
                "at least one refund type must be enabled",
            ));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}
