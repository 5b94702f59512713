//! # Status Update Contract
//!
//! Shape checks for a requested status transition: the reference must
//! resolve and the target must be drawn from the status enum. Whether
//! the pair `(current, target)` is actually legal is decided by the
//! lifecycle machine, not here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rma_core::{ActorId, RequestId, ValidationError};
use rma_state::{ReturnStatus, StatusChange};

use crate::inspection::bounded_text;
use crate::violations::Violations;

/// A raw status update as it arrives from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusUpdateInput {
    /// The return request, as a UUID string.
    pub request_id: String,
    /// Target status wire name.
    pub target_status: String,
    /// Optional staff remarks.
    pub notes: Option<String>,
    /// Justification for override edges.
    pub override_reason: Option<String>,
    /// Tracking number, if the update carries shipment details.
    pub tracking_number: Option<String>,
    /// Logistics company, if the update carries shipment details.
    pub logistics_company: Option<String>,
}

/// A normalized, validated status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    /// The return request to move.
    pub request_id: RequestId,
    /// The requested target status.
    pub target: ReturnStatus,
    /// Optional staff remarks.
    pub notes: Option<String>,
    /// Justification for override edges.
    pub override_reason: Option<String>,
    /// Tracking number to store with the transition.
    pub tracking_number: Option<String>,
    /// Logistics company to store with the transition.
    pub logistics_company: Option<String>,
}

impl StatusUpdate {
    /// Bind the update to an actor and instant, producing the change the
    /// aggregate applies.
    pub fn into_change(self, actor: ActorId, at: chrono::DateTime<chrono::Utc>) -> StatusChange {
        StatusChange {
            target: self.target,
            actor,
            at,
            notes: self.notes,
            override_reason: self.override_reason,
            tracking_number: self.tracking_number,
            logistics_company: self.logistics_company,
        }
    }
}

/// Validate a status update's shape.
pub fn validate_status_update(input: StatusUpdateInput) -> Result<StatusUpdate, ValidationError> {
    let mut violations = Violations::new();

    let request_id = match Uuid::parse_str(input.request_id.trim()) {
        Ok(id) => Some(RequestId::from_uuid(id)),
        Err(_) => {
            violations.add("request_id", "must be a valid return request reference");
            None
        }
    };

    let target = ReturnStatus::from_name(input.target_status.trim());
    if target.is_none() {
        violations.add(
            "target_status",
            "must be one of the lifecycle statuses",
        );
    }

    let notes = bounded_text("notes", input.notes, &mut violations);
    let override_reason = bounded_text("override_reason", input.override_reason, &mut violations);
    let tracking_number = input
        .tracking_number
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let logistics_company = input
        .logistics_company
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    violations.finish_with(|| StatusUpdate {
        request_id: request_id.expect("violations empty implies request id parsed"),
        target: target.expect("violations empty implies target parsed"),
        notes,
        override_reason,
        tracking_number,
        logistics_company,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_input() -> StatusUpdateInput {
        StatusUpdateInput {
            request_id: Uuid::new_v4().to_string(),
            target_status: "shipping_in_transit".to_string(),
            notes: None,
            override_reason: None,
            tracking_number: Some("TW9400110200".to_string()),
            logistics_company: Some("HCT".to_string()),
        }
    }

    #[test]
    fn accepts_any_status_from_the_enum() {
        for status in ReturnStatus::all() {
            let mut input = good_input();
            input.target_status = status.as_str().to_string();
            let update = validate_status_update(input).unwrap();
            assert_eq!(update.target, *status);
        }
    }

    #[test]
    fn shape_check_does_not_judge_legality() {
        // completed straight from anywhere is a legal *shape*; the
        // lifecycle machine will reject the pair if it is not an edge.
        let mut input = good_input();
        input.target_status = "completed".to_string();
        assert!(validate_status_update(input).is_ok());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut input = good_input();
        input.target_status = "on_hold".to_string();
        let err = validate_status_update(input).unwrap_err();
        assert!(err.names_field("target_status"));
    }

    #[test]
    fn bad_reference_is_rejected() {
        let mut input = good_input();
        input.request_id = "not-a-uuid".to_string();
        let err = validate_status_update(input).unwrap_err();
        assert!(err.names_field("request_id"));
    }

    #[test]
    fn blank_tracking_fields_normalize_to_none() {
        let mut input = good_input();
        input.tracking_number = Some("  ".to_string());
        input.logistics_company = None;
        let update = validate_status_update(input).unwrap();
        assert_eq!(update.tracking_number, None);
        assert_eq!(update.logistics_company, None);
    }

    #[test]
    fn into_change_carries_everything() {
        let update = validate_status_update(good_input()).unwrap();
        let at = chrono::Utc::now();
        let change = update.into_change(ActorId::new("staff:ops-9").unwrap(), at);
        assert_eq!(change.target, ReturnStatus::ShippingInTransit);
        assert_eq!(change.tracking_number.as_deref(), Some("TW9400110200"));
        assert_eq!(change.at, at);
    }
}
