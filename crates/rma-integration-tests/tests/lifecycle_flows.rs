//! # Cross-Crate Lifecycle Flows
//!
//! End-to-end scenarios through the engine: application → approval →
//! shipment → inspection → refund → completion, the abnormal path and
//! its manual resolution, and the audit-trail guarantees along the way.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use rma_core::{ActorId, FixedClock, RefundType, RequestId, ReturnPolicy, RmaError};
use rma_engine::{InMemoryReturnStore, ReturnStore, ReturnsEngine};
use rma_state::{CustomerStep, ReturnStatus};
use rma_validation::{
    validate_status_update, InspectionInput, RefundInput, ReturnApplicationInput, StatusUpdate,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()
}

fn staff() -> ActorId {
    ActorId::new("staff:flow").unwrap()
}

fn engine() -> (ReturnsEngine<InMemoryReturnStore>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(t0()));
    (
        ReturnsEngine::new(
            InMemoryReturnStore::new(),
            ReturnPolicy::default(),
            clock.clone(),
        ),
        clock,
    )
}

fn application() -> ReturnApplicationInput {
    serde_json::from_value(serde_json::json!({
        "order_id": Uuid::new_v4().to_string(),
        "channel_source": "marketplace",
        "reason_category": "defective",
        "reason_detail": "left earbud produces no sound at all",
        "shipping_method": "company_pickup",
        "items": [
            {"order_line_id": Uuid::new_v4().to_string(), "quantity": 1, "reason": "defective"},
            {"order_line_id": Uuid::new_v4().to_string(), "quantity": 2, "reason": "bought as a set"}
        ]
    }))
    .unwrap()
}

fn update(id: RequestId, target: &str) -> StatusUpdate {
    validate_status_update(
        serde_json::from_value(serde_json::json!({
            "request_id": id.to_string(),
            "target_status": target
        }))
        .unwrap(),
    )
    .unwrap()
}

fn inspection(id: RequestId, result: &str, grade: Option<&str>) -> InspectionInput {
    serde_json::from_value(serde_json::json!({
        "request_id": id.to_string(),
        "result": result,
        "condition_grade": grade,
        "checklist": {"packaging_intact": true, "product_intact": true},
        "notes": null,
        "inspector_comment": null
    }))
    .unwrap()
}

/// Drive a fresh request to `received_inspecting`.
fn request_ready_for_inspection(
    engine: &ReturnsEngine<InMemoryReturnStore>,
    clock: &FixedClock,
) -> RequestId {
    let request = engine
        .submit_application(application(), Some(t0() - Duration::days(2)))
        .unwrap();
    let id = request.id;
    for (target, expected) in [
        ("approved_waiting_shipping", ReturnStatus::PendingReview),
        ("shipping_in_transit", ReturnStatus::ApprovedWaitingShipping),
        ("received_inspecting", ReturnStatus::ShippingInTransit),
    ] {
        clock.advance(Duration::hours(6));
        engine
            .update_status(update(id, target), expected, staff())
            .unwrap();
    }
    id
}

#[test]
fn passed_inspection_with_grade_then_refund_then_completed() {
    let (engine, clock) = engine();
    let id = request_ready_for_inspection(&engine, &clock);

    let inspected = engine
        .submit_inspection(inspection(id, "passed", Some("B")), staff())
        .unwrap();
    assert_eq!(inspected.status(), ReturnStatus::RefundProcessing);
    let record = inspected.inspection().unwrap();
    assert_eq!(
        record.condition_grade.unwrap().suggested_refund_type(),
        RefundType::OriginalPayment
    );

    let completed = engine
        .finalize_refund(
            RefundInput {
                request_id: id.to_string(),
                refund_type: "original_payment".to_string(),
                amount_minor_units: 500,
            },
            staff(),
        )
        .unwrap();
    assert_eq!(completed.status(), ReturnStatus::Completed);
    assert_eq!(completed.refund_amount().unwrap().minor_units(), 500);
    assert_eq!(completed.refund().unwrap().refund_type, RefundType::OriginalPayment);
}

#[test]
fn failed_inspection_flags_abnormal_and_blocks_completion() {
    let (engine, clock) = engine();
    let id = request_ready_for_inspection(&engine, &clock);

    let flagged = engine
        .submit_inspection(inspection(id, "failed", None), staff())
        .unwrap();
    assert_eq!(flagged.status(), ReturnStatus::AbnormalDisputed);

    // Direct completion from the sink is not an edge.
    let err = engine
        .update_status(
            update(id, "completed"),
            ReturnStatus::AbnormalDisputed,
            staff(),
        )
        .unwrap_err();
    assert!(matches!(err, RmaError::Transition(_)));

    // Routed back through refund processing, completion works.
    engine
        .resolve_abnormal(id, "approved as goodwill".to_string(), staff())
        .unwrap();
    let completed = engine
        .finalize_refund(
            RefundInput {
                request_id: id.to_string(),
                refund_type: "store_credit".to_string(),
                amount_minor_units: 0,
            },
            staff(),
        )
        .unwrap();
    assert_eq!(completed.status(), ReturnStatus::Completed);
}

#[test]
fn audit_trail_records_every_accepted_transition_in_order() {
    let (engine, clock) = engine();
    let id = request_ready_for_inspection(&engine, &clock);
    engine
        .submit_inspection(inspection(id, "passed", None), staff())
        .unwrap();
    let completed = engine
        .finalize_refund(
            RefundInput {
                request_id: id.to_string(),
                refund_type: "bank_transfer".to_string(),
                amount_minor_units: 2150,
            },
            staff(),
        )
        .unwrap();

    let log = completed.activity_log();
    let path: Vec<(ReturnStatus, ReturnStatus)> = log
        .iter()
        .map(|entry| (entry.from_status, entry.to_status))
        .collect();
    assert_eq!(
        path,
        vec![
            (ReturnStatus::PendingReview, ReturnStatus::ApprovedWaitingShipping),
            (ReturnStatus::ApprovedWaitingShipping, ReturnStatus::ShippingInTransit),
            (ReturnStatus::ShippingInTransit, ReturnStatus::ReceivedInspecting),
            (ReturnStatus::ReceivedInspecting, ReturnStatus::RefundProcessing),
            (ReturnStatus::RefundProcessing, ReturnStatus::Completed),
        ]
    );
    for window in log.windows(2) {
        assert!(window[0].at <= window[1].at, "log must be chronological");
    }
}

#[test]
fn customer_projection_tracks_the_detailed_machine() {
    let (engine, clock) = engine();
    let request = engine
        .submit_application(application(), Some(t0() - Duration::days(2)))
        .unwrap();
    let id = request.id;
    assert_eq!(
        engine.customer_view(&id).unwrap().step,
        CustomerStep::PendingInspection
    );

    for (target, expected) in [
        ("approved_waiting_shipping", ReturnStatus::PendingReview),
        ("shipping_in_transit", ReturnStatus::ApprovedWaitingShipping),
        ("received_inspecting", ReturnStatus::ShippingInTransit),
    ] {
        clock.advance(Duration::hours(1));
        engine
            .update_status(update(id, target), expected, staff())
            .unwrap();
        // Everything before a terminal outcome folds onto one step.
        assert_eq!(
            engine.customer_view(&id).unwrap().step,
            CustomerStep::PendingInspection
        );
    }

    engine
        .submit_inspection(inspection(id, "failed", None), staff())
        .unwrap();
    assert_eq!(
        engine.customer_view(&id).unwrap().step,
        CustomerStep::Abnormal
    );
}

#[test]
fn window_expiry_between_submission_and_approval() {
    let (engine, clock) = engine();
    // Delivered 6 days ago, 7-day window: submission squeaks in.
    let request = engine
        .submit_application(application(), Some(t0() - Duration::days(6)))
        .unwrap();
    assert_eq!(engine.customer_view(&request.id).unwrap().remaining_days, 1);

    // Two days later the window is gone; approval must re-check.
    clock.advance(Duration::days(2));
    let err = engine
        .update_status(
            update(request.id, "approved_waiting_shipping"),
            ReturnStatus::PendingReview,
            staff(),
        )
        .unwrap_err();
    assert!(matches!(err, RmaError::Deadline(_)));
    assert_eq!(engine.customer_view(&request.id).unwrap().remaining_days, 0);

    // The failed approval left no log entry.
    let stored = engine.store().get(&request.id).unwrap();
    assert!(stored.activity_log().is_empty());
}

#[test]
fn lost_parcel_override_from_transit() {
    let (engine, clock) = engine();
    let request = engine
        .submit_application(application(), Some(t0() - Duration::days(1)))
        .unwrap();
    let id = request.id;
    for (target, expected) in [
        ("approved_waiting_shipping", ReturnStatus::PendingReview),
        ("shipping_in_transit", ReturnStatus::ApprovedWaitingShipping),
    ] {
        clock.advance(Duration::hours(2));
        engine
            .update_status(update(id, target), expected, staff())
            .unwrap();
    }

    // Without a reason the override is rejected.
    let err = engine
        .update_status(
            update(id, "abnormal_disputed"),
            ReturnStatus::ShippingInTransit,
            staff(),
        )
        .unwrap_err();
    assert!(matches!(err, RmaError::Transition(_)));

    let mut forced = update(id, "abnormal_disputed");
    forced.override_reason = Some("carrier confirmed the parcel is lost".to_string());
    let flagged = engine
        .update_status(forced, ReturnStatus::ShippingInTransit, staff())
        .unwrap();
    assert_eq!(flagged.status(), ReturnStatus::AbnormalDisputed);
    assert_eq!(
        flagged.activity_log().last().unwrap().notes.as_deref(),
        Some("carrier confirmed the parcel is lost")
    );
}

#[test]
fn review_stage_rejection_is_an_override_into_abnormal() {
    let (engine, _) = engine();
    let request = engine
        .submit_application(application(), Some(t0() - Duration::days(1)))
        .unwrap();

    let mut rejection = update(request.id, "abnormal_disputed");
    rejection.override_reason = Some("outside return policy: hygiene-sealed item opened".to_string());
    let rejected = engine
        .update_status(rejection, ReturnStatus::PendingReview, staff())
        .unwrap();
    assert_eq!(rejected.status(), ReturnStatus::AbnormalDisputed);
    assert_eq!(
        engine.customer_view(&request.id).unwrap().step,
        CustomerStep::Abnormal
    );
}
