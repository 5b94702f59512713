#![deny(missing_docs)]

//! # rma-inspection — Inspection & Grading
//!
//! Converts a staff-submitted checklist and pass/fail result into the
//! authoritative [`InspectionRecord`] for a return request, and derives
//! the outcome the lifecycle machine consumes.
//!
//! - **Checklist** ([`checklist`]): the fixed five-point condition
//!   checklist, each point tri-state (pass / fail / not assessed).
//!
//! - **Record** ([`record`]): inspection results, condition grades with
//!   advisory refund-type guidance, and the outcome rule — a failed
//!   result always flags the case abnormal, regardless of checklist
//!   detail.

pub mod checklist;
pub mod record;

// Re-export primary types.
pub use checklist::Checklist;
pub use record::{ConditionGrade, InspectionOutcome, InspectionRecord, InspectionResult};
