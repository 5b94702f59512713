//! # Inspection Submission Contract
//!
//! What staff submit after examining a returned parcel. The result is
//! mandatory; grade, checklist, and free text are optional — an
//! inspector may pass or fail on holistic judgment alone — but the free
//! text is size-bounded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rma_core::{ActorId, RequestId, ValidationError};
use rma_inspection::{Checklist, ConditionGrade, InspectionRecord, InspectionResult};

use crate::limits::FREE_TEXT_MAX;
use crate::violations::Violations;

/// A raw inspection submission as it arrives from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectionInput {
    /// The return request, as a UUID string.
    pub request_id: String,
    /// Result wire name: `passed` or `failed`.
    pub result: String,
    /// Optional grade letter.
    pub condition_grade: Option<String>,
    /// The checklist as assessed; omitted points stay unassessed.
    #[serde(default)]
    pub checklist: Checklist,
    /// Free-text findings.
    pub notes: Option<String>,
    /// Inspector's customer-visible comment.
    pub inspector_comment: Option<String>,
}

/// A normalized, validated inspection submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionSubmission {
    /// The return request being inspected.
    pub request_id: RequestId,
    /// The staff verdict.
    pub result: InspectionResult,
    /// Optional advisory grade.
    pub condition_grade: Option<ConditionGrade>,
    /// The checklist as assessed.
    pub checklist: Checklist,
    /// Free-text findings.
    pub notes: Option<String>,
    /// Inspector's customer-visible comment.
    pub inspector_comment: Option<String>,
}

impl InspectionSubmission {
    /// Stamp the submission into the authoritative record.
    pub fn into_record(self, inspected_by: ActorId, inspected_at: DateTime<Utc>) -> InspectionRecord {
        InspectionRecord {
            result: self.result,
            condition_grade: self.condition_grade,
            checklist: self.checklist,
            notes: self.notes,
            inspector_comment: self.inspector_comment,
            inspected_by,
            inspected_at,
        }
    }
}

/// Validate an inspection submission.
pub fn validate_inspection(input: InspectionInput) -> Result<InspectionSubmission, ValidationError> {
    let mut violations = Violations::new();

    let request_id = match Uuid::parse_str(input.request_id.trim()) {
        Ok(id) => Some(RequestId::from_uuid(id)),
        Err(_) => {
            violations.add("request_id", "must be a valid return request reference");
            None
        }
    };

    let result = InspectionResult::from_name(input.result.trim());
    if result.is_none() {
        violations.add("result", "must be passed or failed");
    }

    let condition_grade = match input.condition_grade.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(letter) => {
            let grade = ConditionGrade::from_name(letter);
            if grade.is_none() {
                violations.add(
                    "condition_grade",
                    format!("\"{letter}\" is not one of A, B, C, D, F"),
                );
            }
            grade
        }
    };

    let notes = bounded_text("notes", input.notes, &mut violations);
    let inspector_comment =
        bounded_text("inspector_comment", input.inspector_comment, &mut violations);

    violations.finish_with(|| InspectionSubmission {
        request_id: request_id.expect("violations empty implies request id parsed"),
        result: result.expect("violations empty implies result parsed"),
        condition_grade,
        checklist: input.checklist,
        notes,
        inspector_comment,
    })
}

/// Trim optional free text, dropping blanks and flagging oversize.
pub(crate) fn bounded_text(
    field: &str,
    value: Option<String>,
    violations: &mut Violations,
) -> Option<String> {
    let text = value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
    if text.chars().count() > FREE_TEXT_MAX {
        violations.add(
            field,
            format!("must be at most {FREE_TEXT_MAX} characters"),
        );
    }
    Some(text)
}
