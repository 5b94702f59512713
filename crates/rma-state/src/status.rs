//! # Return Status Machine
//!
//! The seven lifecycle statuses and the fixed adjacency table of legal
//! transitions:
//!
//! ```text
//! pending_review ──▶ approved_waiting_shipping ──▶ shipping_in_transit
//!       │                      │                          │
//!       │                      │                          ▼
//!       │                      │                  received_inspecting
//!       │                      │                     │           │
//!       │                      │                 (passed)    (failed)
//!       │                      │                     ▼           ▼
//!       │                      │            refund_processing ◀─ abnormal_disputed
//!       │                      │                     │       ─▶      ▲
//!       │                      │                     ▼               │
//!       │                      │                 completed           │
//!       └──────────────────────┴───── staff override ────────────────┘
//! ```
//!
//! `abnormal_disputed` is a sink: it is reached by a failed inspection or
//! by staff override from any non-terminal status, and only a manual
//! staff action routes it back to `refund_processing`. It never
//! auto-advances. `completed` is terminal.
//!
//! Every legal edge appears in [`ReturnStatus::valid_transitions`]; a pair
//! absent from that table is illegal, full stop. Entry *conditions* on
//! edges (deadline, inspection verdict, finalized refund) are enforced by
//! the aggregate in [`crate::request`].

use serde::{Deserialize, Serialize};

/// The lifecycle status of a return request.
///
/// The single source of truth for where a request sits in the workflow.
/// Wire names are the canonical snake_case strings; nothing else
/// deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnStatus {
    /// Application submitted, awaiting staff review.
    #[serde(rename = "pending_review")]
    PendingReview,
    /// Approved; waiting for the customer to ship the item back.
    #[serde(rename = "approved_waiting_shipping")]
    ApprovedWaitingShipping,
    /// Return parcel is on its way back.
    #[serde(rename = "shipping_in_transit")]
    ShippingInTransit,
    /// Parcel received; staff inspection in progress.
    #[serde(rename = "received_inspecting")]
    ReceivedInspecting,
    /// Inspection passed; refund being processed.
    #[serde(rename = "refund_processing")]
    RefundProcessing,
    /// Flagged abnormal — failed inspection or staff override. Manual
    /// resolution only.
    #[serde(rename = "abnormal_disputed")]
    AbnormalDisputed,
    /// Refund finalized and the case closed. Terminal.
    #[serde(rename = "completed")]
    Completed,
}

impl ReturnStatus {
    /// Return all statuses as a slice, in workflow order.
    pub fn all() -> &'static [ReturnStatus] {
        &[
            Self::PendingReview,
            Self::ApprovedWaitingShipping,
            Self::ShippingInTransit,
            Self::ReceivedInspecting,
            Self::RefundProcessing,
            Self::AbnormalDisputed,
            Self::Completed,
        ]
    }

    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::ApprovedWaitingShipping => "approved_waiting_shipping",
            Self::ShippingInTransit => "shipping_in_transit",
            Self::ReceivedInspecting => "received_inspecting",
            Self::RefundProcessing => "refund_processing",
            Self::AbnormalDisputed => "abnormal_disputed",
            Self::Completed => "completed",
        }
    }

    /// Convert a canonical wire name back to a status.
    ///
    /// Returns `None` for any other input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pending_review" => Some(Self::PendingReview),
            "approved_waiting_shipping" => Some(Self::ApprovedWaitingShipping),
            "shipping_in_transit" => Some(Self::ShippingInTransit),
            "received_inspecting" => Some(Self::ReceivedInspecting),
            "refund_processing" => Some(Self::RefundProcessing),
            "abnormal_disputed" => Some(Self::AbnormalDisputed),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// The set of legal target statuses from this status.
    ///
    /// This table is the complete adjacency relation. Staff-initiated
    /// exceptional edges (forcing `abnormal_disputed` before completion)
    /// are enumerated here like any other edge; their extra entry
    /// conditions live on the aggregate.
    pub fn valid_transitions(&self) -> &'static [ReturnStatus] {
        match self {
            Self::PendingReview => &[Self::ApprovedWaitingShipping, Self::AbnormalDisputed],
            Self::ApprovedWaitingShipping => &[Self::ShippingInTransit, Self::AbnormalDisputed],
            Self::ShippingInTransit => &[Self::ReceivedInspecting, Self::AbnormalDisputed],
            Self::ReceivedInspecting => &[Self::RefundProcessing, Self::AbnormalDisputed],
            Self::RefundProcessing => &[Self::Completed, Self::AbnormalDisputed],
            Self::AbnormalDisputed => &[Self::RefundProcessing],
            Self::Completed => &[],
        }
    }

    /// Whether the pair `(self, target)` is in the adjacency table.
    pub fn can_transition_to(&self, target: ReturnStatus) -> bool {
        self.valid_transitions().contains(&target)
    }

    /// Whether this is a terminal status (no outgoing edges).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The three-step customer-facing projection.
    ///
    /// A pure function of status, computed on demand and never stored,
    /// so the detailed machine remains the single source of truth.
    pub fn customer_step(&self) -> CustomerStep {
        match self {
            Self::PendingReview
            | Self::ApprovedWaitingShipping
            | Self::ShippingInTransit
            | Self::ReceivedInspecting
            | Self::RefundProcessing => CustomerStep::PendingInspection,
            Self::AbnormalDisputed => CustomerStep::Abnormal,
            Self::Completed => CustomerStep::Completed,
        }
    }
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The simplified three-step view shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStep {
    /// Everything before a terminal outcome.
    PendingInspection,
    /// The case closed with a refund.
    Completed,
    /// The case is flagged abnormal.
    Abnormal,
}

impl CustomerStep {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingInspection => "pending_inspection",
            Self::Completed => "completed",
            Self::Abnormal => "abnormal",
        }
    }
}

impl std::fmt::Display for CustomerStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
