//! # The Returns Engine
//!
//! The operations callers (API layer, staff tools) invoke. Each one runs
//! validation first, then applies its mutation atomically through the
//! store, and returns the updated aggregate snapshot or a typed failure.
//!
//! Status updates are optimistic: the caller supplies the status it last
//! observed, and the write is rejected with a conflict if the stored
//! status has moved — two staff members racing on the same request
//! cannot both win.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use rma_core::{
    deadline::{is_within_deadline, remaining_days},
    ActorId, Clock, ConflictError, DeadlineError, RequestId, RequestNumber, ReturnPolicy,
    RmaError, ValidationError,
};
use rma_state::{CustomerStep, ReturnRequest, ReturnStatus, RequestNote, StatusChange};
use rma_validation::{
    limits::FREE_TEXT_MAX, validate_image_batch, validate_inspection, validate_refund,
    validate_return_application, ImageFileInput, InspectionInput, RefundInput,
    ReturnApplicationInput, StatusUpdate,
};

use crate::store::ReturnStore;

/// What a customer sees when checking on their return: the three-step
/// projection plus the window and shipment details, all derived — never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    /// The human-readable request number.
    pub request_number: RequestNumber,
    /// The three-step progress view.
    pub step: CustomerStep,
    /// Whole days left in the return window, clamped at zero.
    pub remaining_days: u32,
    /// Tracking number, once shipment began.
    pub tracking_number: Option<String>,
    /// Logistics company, once shipment began.
    pub logistics_company: Option<String>,
}

/// The lifecycle engine: validation in front, guarded aggregate in the
/// middle, storage behind, policy and clock injected.
pub struct ReturnsEngine<S: ReturnStore> {
    store: S,
    policy: ReturnPolicy,
    clock: Arc<dyn Clock>,
}

impl<S: ReturnStore> ReturnsEngine<S> {
    /// Build an engine over the given store, policy, and clock.
    pub fn new(store: S, policy: ReturnPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            policy,
            clock,
        }
    }

    /// The policy this engine enforces.
    pub fn policy(&self) -> &ReturnPolicy {
        &self.policy
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a return request from a customer application.
    ///
    /// `delivered_at` is the delivery timestamp from the order record
    /// (the order collaborator owns it). The return window is checked
    /// here at submission; approval re-checks it later.
    pub fn submit_application(
        &self,
        input: ReturnApplicationInput,
        delivered_at: Option<DateTime<Utc>>,
    ) -> Result<ReturnRequest, RmaError> {
        let application = validate_return_application(input)?;
        let now = self.clock.now();

        if !is_within_deadline(delivered_at, now, self.policy.deadline_days) {
            return Err(match delivered_at {
                None => DeadlineError::NotDelivered,
                Some(delivered) => DeadlineError::WindowExpired {
                    delivered_at: delivered.to_rfc3339(),
                    window_days: self.policy.deadline_days,
                },
            }
            .into());
        }

        let request = ReturnRequest::create(application.into_new_request(delivered_at), now);
        self.store.insert(request.clone());
        tracing::info!(
            request = %request.id,
            number = %request.request_number,
            order = %request.order_id,
            "return application accepted"
        );
        Ok(request)
    }

    /// Apply a validated status update with compare-and-set semantics.
    ///
    /// `expected_current` is the status the caller last observed. If the
    /// stored status differs, the update fails with a conflict and
    /// nothing is written; the caller should re-read and re-evaluate.
    pub fn update_status(
        &self,
        update: StatusUpdate,
        expected_current: ReturnStatus,
        actor: ActorId,
    ) -> Result<ReturnRequest, RmaError> {
        let id = update.request_id;
        let target = update.target;
        let now = self.clock.now();
        let change = update.into_change(actor, now);

        let result = self.store.mutate(&id, &mut |request| {
            let current = request.status();
            if current != expected_current {
                return Err(ConflictError {
                    request: id.to_string(),
                    expected: expected_current.as_str().to_string(),
                    actual: current.as_str().to_string(),
                }
                .into());
            }
            request.apply_transition(&self.policy, change.clone())
        });

        match &result {
            Ok(_) => tracing::info!(
                request = %id,
                from = %expected_current,
                to = %target,
                "status transition applied"
            ),
            Err(RmaError::Conflict(conflict)) => tracing::warn!(
                request = %id,
                expected = %conflict.expected,
                actual = %conflict.actual,
                "status update lost a concurrent race"
            ),
            Err(_) => {}
        }
        result
    }

    /// Approve a pending application.
    ///
    /// Convenience over [`ReturnsEngine::update_status`]: the expected
    /// current status is `pending_review` and the target is
    /// `approved_waiting_shipping`, so the return window is re-checked
    /// here no matter how long the request sat in review.
    pub fn approve(
        &self,
        id: RequestId,
        notes: Option<String>,
        actor: ActorId,
    ) -> Result<ReturnRequest, RmaError> {
        let update = StatusUpdate {
            request_id: id,
            target: ReturnStatus::ApprovedWaitingShipping,
            notes,
            override_reason: None,
            tracking_number: None,
            logistics_company: None,
        };
        self.update_status(update, ReturnStatus::PendingReview, actor)
    }

    /// Record an inspection and apply the transition its verdict
    /// dictates, as one atomic operation.
    ///
    /// A passed result moves the request to refund processing; a failed
    /// one flags it abnormal. Re-submission while still inspecting
    /// overwrites the previous decision.
    pub fn submit_inspection(
        &self,
        input: InspectionInput,
        actor: ActorId,
    ) -> Result<ReturnRequest, RmaError> {
        let submission = validate_inspection(input)?;
        let id = submission.request_id;
        let now = self.clock.now();
        let record = submission.into_record(actor.clone(), now);
        let outcome = record.outcome();
        let target = match outcome {
            rma_inspection::InspectionOutcome::ProceedToRefund => ReturnStatus::RefundProcessing,
            rma_inspection::InspectionOutcome::FlagAbnormal => ReturnStatus::AbnormalDisputed,
        };

        let updated = self.store.mutate(&id, &mut |request| {
            request.record_inspection(record.clone())?;
            request.apply_transition(
                &self.policy,
                StatusChange::new(target, actor.clone(), now),
            )
        })?;

        tracing::info!(
            request = %id,
            result = %record.result,
            to = %target,
            "inspection recorded"
        );
        Ok(updated)
    }

    /// Finalize the refund and complete the request as one atomic unit.
    ///
    /// Fails with an invalid-state error when the request is not in
    /// refund processing. On success the refund record, the copied
    /// amount, the completed status, and the log entry commit together —
    /// no observer sees one without the others.
    pub fn finalize_refund(
        &self,
        input: RefundInput,
        actor: ActorId,
    ) -> Result<ReturnRequest, RmaError> {
        let submission = validate_refund(input, &self.policy)?;
        let id = submission.request_id;
        let now = self.clock.now();

        let updated = self.store.mutate(&id, &mut |request| {
            let record = submission
                .draft
                .finalize(&self.policy, actor.clone(), now)?;
            request.set_refund(record)?;
            request.apply_transition(
                &self.policy,
                StatusChange::new(ReturnStatus::Completed, actor.clone(), now),
            )
        })?;

        tracing::info!(
            request = %id,
            refund_type = %submission.draft.refund_type,
            amount = %submission.draft.amount,
            "refund finalized, request completed"
        );
        Ok(updated)
    }

    /// Route an abnormal case back into refund processing by staff
    /// decision. The reason is mandatory and lands on the audit trail.
    pub fn resolve_abnormal(
        &self,
        id: RequestId,
        reason: String,
        actor: ActorId,
    ) -> Result<ReturnRequest, RmaError> {
        let now = self.clock.now();
        let updated = self.store.mutate(&id, &mut |request| {
            let mut change =
                StatusChange::new(ReturnStatus::RefundProcessing, actor.clone(), now);
            change.override_reason = Some(reason.clone());
            request.apply_transition(&self.policy, change)
        })?;
        tracing::info!(request = %id, "abnormal case resolved to refund processing");
        Ok(updated)
    }

    /// Attach a validated image batch to a request.
    pub fn attach_images(
        &self,
        id: RequestId,
        files: Vec<ImageFileInput>,
    ) -> Result<ReturnRequest, RmaError> {
        let batch = validate_image_batch(files, &self.policy)?;
        let now = self.clock.now();
        let count = batch.len();
        let updated = self.store.mutate(&id, &mut |request| {
            request.attach_images(batch.clone(), now)?;
            Ok(())
        })?;
        tracing::debug!(request = %id, count, "evidence images attached");
        Ok(updated)
    }

    /// Append a free-text note to a request.
    ///
    /// Notes are the amendment mechanism: reason fields never mutate
    /// after creation.
    pub fn add_note(
        &self,
        id: RequestId,
        actor: ActorId,
        text: String,
    ) -> Result<ReturnRequest, RmaError> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ValidationError::single("text", "must not be empty").into());
        }
        if text.chars().count() > FREE_TEXT_MAX {
            return Err(ValidationError::single(
                "text",
                format!("must be at most {FREE_TEXT_MAX} characters"),
            )
            .into());
        }
        let now = self.clock.now();
        let updated = self.store.mutate(&id, &mut |request| {
            request.add_note(RequestNote {
                author: actor.clone(),
                at: now,
                text: text.clone(),
            });
            Ok(())
        })?;
        Ok(updated)
    }

    /// The customer-facing view: three-step progress, remaining window
    /// days, and shipment details.
    pub fn customer_view(&self, id: &RequestId) -> Result<CustomerView, RmaError> {
        let request = self
            .store
            .get(id)
            .ok_or_else(|| RmaError::NotFound(id.to_string()))?;
        let now = self.clock.now();
        Ok(CustomerView {
            request_number: request.request_number.clone(),
            step: request.customer_step(),
            remaining_days: remaining_days(
                request.delivered_at,
                now,
                self.policy.deadline_days,
            ),
            tracking_number: request.tracking_number().map(str::to_string),
            logistics_company: request.logistics_company().map(str::to_string),
        })
    }
}
