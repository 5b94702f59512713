//! # Refund Drafts and Records
//!
//! A draft is what staff submit while a request sits in refund
//! processing; finalizing it against policy produces the immutable
//! [`RefundRecord`]. Whether the aggregate is actually in a state that
//! permits finalization is the lifecycle layer's check — this module owns
//! the monetary and policy constraints only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rma_core::{ActorId, Amount, RefundType, ReturnPolicy, ValidationError};

/// A staff-submitted refund choice awaiting finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundDraft {
    /// How the refund is to be paid out.
    pub refund_type: RefundType,
    /// The amount to refund, in minor units.
    pub amount: Amount,
}

impl RefundDraft {
    /// Finalize the draft into an immutable [`RefundRecord`].
    ///
    /// Fails when the chosen refund type is not enabled by the operator's
    /// policy. The amount needs no check here — [`Amount`] cannot hold a
    /// negative value.
    pub fn finalize(
        &self,
        policy: &ReturnPolicy,
        processed_by: ActorId,
        finalized_at: DateTime<Utc>,
    ) -> Result<RefundRecord, ValidationError> {
        if !policy.refund_type_enabled(self.refund_type) {
            return Err(ValidationError::single(
                "refund_type",
                format!(
                    "refund type {} is not enabled by policy",
                    self.refund_type
                ),
            ));
        }
        Ok(RefundRecord {
            refund_type: self.refund_type,
            amount: self.amount,
            processed_by,
            finalized_at,
        })
    }
}

/// The finalized refund for a return request.
///
/// Created only while the request is in refund processing; its presence
/// (with the amount copied onto the aggregate) is what unlocks the
/// transition to completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRecord {
    /// How the refund is paid out.
    pub refund_type: RefundType,
    /// The refunded amount, in minor units. Never negative.
    pub amount: Amount,
    /// The staff member who processed the refund.
    pub processed_by: ActorId,
    /// When the refund was finalized.
    pub finalized_at: DateTime<Utc>,
}
