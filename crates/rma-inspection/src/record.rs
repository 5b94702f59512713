//! # Inspection Records
//!
//! The authoritative record of a staff inspection and the outcome rule
//! the lifecycle machine consumes. Exactly one record is authoritative
//! per return request at any time; re-submission replaces the decision
//! (history retention belongs to the storage collaborator).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rma_core::{ActorId, RefundType};

use crate::checklist::Checklist;

/// The staff verdict on a returned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionResult {
    /// The return is acceptable; refund processing may begin.
    Passed,
    /// The return is not acceptable; the case is flagged abnormal.
    Failed,
}

impl InspectionResult {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }

    /// Convert a canonical wire name back to a result.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for InspectionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Condition grade assigned to a passed item.
///
/// Advisory metadata for refund-type guidance; it never alters the
/// lifecycle transition itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionGrade {
    /// Like new.
    A,
    /// Minor wear, fully functional.
    B,
    /// Visible wear or incomplete packaging.
    C,
    /// Significant wear or missing accessories.
    D,
    /// Not resellable in current condition.
    F,
}

impl ConditionGrade {
    /// Return all grades as a slice, best first.
    pub fn all() -> &'static [ConditionGrade] {
        &[Self::A, Self::B, Self::C, Self::D, Self::F]
    }

    /// The canonical single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Convert a single-letter name back to a grade.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "F" => Some(Self::F),
            _ => None,
        }
    }

    /// The refund type this grade biases toward.
    ///
    /// High grades suggest reversing the original payment; lower grades
    /// bias toward store credit. Guidance only — staff pick the actual
    /// refund type when processing.
    pub fn suggested_refund_type(&self) -> RefundType {
        match self {
            Self::A | Self::B => RefundType::OriginalPayment,
            Self::C | Self::D | Self::F => RefundType::StoreCredit,
        }
    }
}

impl std::fmt::Display for ConditionGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle outcome an inspection dictates.
///
/// Consumed by the state layer to pick the next status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectionOutcome {
    /// Proceed to refund processing.
    ProceedToRefund,
    /// Flag the case abnormal for manual handling.
    FlagAbnormal,
}

/// The authoritative record of one staff inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// The staff verdict.
    pub result: InspectionResult,
    /// Optional condition grade (advisory, see [`ConditionGrade`]).
    pub condition_grade: Option<ConditionGrade>,
    /// What was actually checked.
    pub checklist: Checklist,
    /// Free-text findings.
    pub notes: Option<String>,
    /// Inspector's comment for the customer-visible record.
    pub inspector_comment: Option<String>,
    /// Who performed the inspection.
    pub inspected_by: ActorId,
    /// When the inspection was recorded.
    pub inspected_at: DateTime<Utc>,
}

impl InspectionRecord {
    /// The lifecycle outcome this record dictates.
    ///
    /// A failed result always flags the case abnormal — staff judgment
    /// overrides checklist detail, so individual point values are not
    /// consulted here. A passed result always proceeds to refund; the
    /// grade never changes the outcome.
    pub fn outcome(&self) -> InspectionOutcome {
        match self.result {
            InspectionResult::Failed => InspectionOutcome::FlagAbnormal,
            InspectionResult::Passed => InspectionOutcome::ProceedToRefund,
        }
    }

    /// Whether refund processing may begin on the strength of this record.
    pub fn permits_refund(&self) -> bool {
        self.result == InspectionResult::Passed
    }
}
