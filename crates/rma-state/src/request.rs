//! # The Return-Request Aggregate
//!
//! [`ReturnRequest`] is the aggregate root: it owns its items, image
//! metadata, inspection record, refund record, notes, and activity log,
//! and they share its lifetime. Everything fixed at creation is a public
//! field; everything the lifecycle manages is private and changes only
//! through the guarded methods here, so entry conditions cannot be
//! bypassed by direct field writes.
//!
//! A transition and its activity-log entry are applied together in
//! [`ReturnRequest::apply_transition`] — the log entry is never written
//! without the status change, and vice versa. Tracking details carried on
//! an update land in the same operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rma_core::{
    deadline::is_within_deadline, ActorId, Amount, DeadlineError, ImageContentType, ImageKind,
    InvalidStateError, OrderId, OrderLineId, RequestId, RequestNumber, ReturnPolicy,
    ReturnShippingMethod, RmaError, TransitionError,
};
use rma_inspection::InspectionRecord;
use rma_refund::RefundRecord;

use crate::activity::ActivityEntry;
use crate::status::{CustomerStep, ReturnStatus};

/// One returned order line.
///
/// Created atomically with its request and immutable thereafter. The
/// quantity floor (at least 1) is enforced by the validation contract
/// before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnItem {
    /// The order line being returned.
    pub order_line_id: OrderLineId,
    /// How many units of that line are coming back.
    pub quantity: u32,
    /// Why this item is being returned.
    pub reason: String,
}

/// Metadata of one uploaded evidence image.
///
/// The bytes live with the object-storage collaborator; this core only
/// enforces the metadata contract (count, size, and type bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// What the image documents.
    pub kind: ImageKind,
    /// Original file name as uploaded.
    pub file_name: String,
    /// Content type from the accepted set.
    pub content_type: ImageContentType,
    /// File size in bytes.
    pub size_bytes: u64,
}

/// An append-only free-text amendment to a request.
///
/// Reason fields are immutable after creation; corrections and additions
/// arrive as notes instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestNote {
    /// Who wrote the note.
    pub author: ActorId,
    /// When it was written.
    pub at: DateTime<Utc>,
    /// The note text.
    pub text: String,
}

/// Everything needed to open a new return request.
///
/// Produced by the validation layer; consumed once by
/// [`ReturnRequest::create`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReturnRequest {
    /// The originating order.
    pub order_id: OrderId,
    /// Optional sales-channel tag.
    pub channel_source: Option<String>,
    /// Customer-chosen reason category.
    pub reason_category: String,
    /// Customer-written reason detail.
    pub reason_detail: String,
    /// How the item comes back.
    pub shipping_method: ReturnShippingMethod,
    /// When the order was delivered, if known.
    pub delivered_at: Option<DateTime<Utc>>,
    /// The lines being returned. Never empty past validation.
    pub items: Vec<ReturnItem>,
}

/// A requested status transition with everything it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    /// The target status.
    pub target: ReturnStatus,
    /// Who is performing the transition.
    pub actor: ActorId,
    /// When the transition is taking place.
    pub at: DateTime<Utc>,
    /// Optional staff remarks for the activity log.
    pub notes: Option<String>,
    /// Mandatory justification for override edges (forcing
    /// `abnormal_disputed`, or resolving it back to refund processing).
    pub override_reason: Option<String>,
    /// Tracking number, stored with the transition when present.
    pub tracking_number: Option<String>,
    /// Logistics company, stored with the transition when present.
    pub logistics_company: Option<String>,
}

impl StatusChange {
    /// A plain transition with no notes, override, or tracking payload.
    pub fn new(target: ReturnStatus, actor: ActorId, at: DateTime<Utc>) -> Self {
        Self {
            target,
            actor,
            at,
            notes: None,
            override_reason: None,
            tracking_number: None,
            logistics_company: None,
        }
    }
}

/// The aggregate representing one customer's return case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    /// Opaque identifier. Immutable.
    pub id: RequestId,
    /// Human-readable number, unique, assigned at creation. Immutable.
    pub request_number: RequestNumber,
    /// The originating order. Immutable.
    pub order_id: OrderId,
    /// Sales-channel tag. Immutable.
    pub channel_source: Option<String>,
    /// Customer-chosen reason category. Immutable; amend via notes.
    pub reason_category: String,
    /// Customer-written reason detail. Immutable; amend via notes.
    pub reason_detail: String,
    /// Return shipping method, fixed at creation.
    pub shipping_method: ReturnShippingMethod,
    /// Delivery timestamp driving the return window.
    pub delivered_at: Option<DateTime<Utc>>,
    /// The returned lines, created atomically with the request. Immutable.
    pub items: Vec<ReturnItem>,
    /// When the request was created. Immutable.
    pub created_at: DateTime<Utc>,

    status: ReturnStatus,
    refund_amount: Option<Amount>,
    tracking_number: Option<String>,
    logistics_company: Option<String>,
    images: Vec<ImageMetadata>,
    inspection: Option<InspectionRecord>,
    refund: Option<RefundRecord>,
    notes: Vec<RequestNote>,
    activity_log: Vec<ActivityEntry>,
    updated_at: DateTime<Utc>,
}

impl ReturnRequest {
    /// Open a new request in `pending_review` — the only legal initial
    /// status. The request number is derived from the creation time and
    /// the fresh id.
    pub fn create(new: NewReturnRequest, created_at: DateTime<Utc>) -> Self {
        let id = RequestId::new();
        let request_number = RequestNumber::generate(created_at, &id);
        Self {
            id,
            request_number,
            order_id: new.order_id,
            channel_source: new.channel_source,
            reason_category: new.reason_category,
            reason_detail: new.reason_detail,
            shipping_method: new.shipping_method,
            delivered_at: new.delivered_at,
            items: new.items,
            created_at,
            status: ReturnStatus::PendingReview,
            refund_amount: None,
            tracking_number: None,
            logistics_company: None,
            images: Vec::new(),
            inspection: None,
            refund: None,
            notes: Vec::new(),
            activity_log: Vec::new(),
            updated_at: created_at,
        }
    }

    /// The current lifecycle status.
    pub fn status(&self) -> ReturnStatus {
        self.status
    }

    /// The customer-facing three-step view of the current status.
    pub fn customer_step(&self) -> CustomerStep {
        self.status.customer_step()
    }

    /// The refund amount, present once refund eligibility is established.
    pub fn refund_amount(&self) -> Option<Amount> {
        self.refund_amount
    }

    /// The return-shipment tracking number, once shipment begins.
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    /// The logistics company carrying the return shipment.
    pub fn logistics_company(&self) -> Option<&str> {
        self.logistics_company.as_deref()
    }

    /// Metadata of the uploaded evidence images.
    pub fn images(&self) -> &[ImageMetadata] {
        &self.images
    }

    /// The authoritative inspection record, if one has been submitted.
    pub fn inspection(&self) -> Option<&InspectionRecord> {
        self.inspection.as_ref()
    }

    /// The finalized refund record, if any.
    pub fn refund(&self) -> Option<&RefundRecord> {
        self.refund.as_ref()
    }

    /// The append-only notes.
    pub fn notes(&self) -> &[RequestNote] {
        &self.notes
    }

    /// The activity log, one entry per accepted transition.
    pub fn activity_log(&self) -> &[ActivityEntry] {
        &self.activity_log
    }

    /// When the aggregate last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a status transition if it is legal and its entry conditions
    /// hold.
    ///
    /// On success the status, any tracking details on the change, the
    /// activity-log entry, and `updated_at` are all written together.
    /// On failure nothing changes.
    ///
    /// Entry conditions enforced here:
    /// - `approved_waiting_shipping` requires the request to still be
    ///   within the return window at approval time (re-checked, not only
    ///   at submission).
    /// - `refund_processing` requires a passed inspection when entered
    ///   from inspection, or a staff resolution reason when entered from
    ///   the abnormal sink.
    /// - `abnormal_disputed` requires a failed inspection or an explicit
    ///   override reason.
    /// - `completed` requires a finalized refund record.
    pub fn apply_transition(
        &mut self,
        policy: &ReturnPolicy,
        change: StatusChange,
    ) -> Result<(), RmaError> {
        let current = self.status;
        let target = change.target;

        if !current.can_transition_to(target) {
            return Err(TransitionError::Illegal {
                from: current.as_str().to_string(),
                to: target.as_str().to_string(),
            }
            .into());
        }

        match target {
            ReturnStatus::ApprovedWaitingShipping => {
                if !is_within_deadline(self.delivered_at, change.at, policy.deadline_days) {
                    return Err(match self.delivered_at {
                        None => DeadlineError::NotDelivered,
                        Some(delivered) => DeadlineError::WindowExpired {
                            delivered_at: delivered.to_rfc3339(),
                            window_days: policy.deadline_days,
                        },
                    }
                    .into());
                }
            }
            ReturnStatus::RefundProcessing => match current {
                ReturnStatus::ReceivedInspecting => {
                    let passed = self
                        .inspection
                        .as_ref()
                        .is_some_and(InspectionRecord::permits_refund);
                    if !passed {
                        return Err(TransitionError::PreconditionFailed {
                            from: current.as_str().to_string(),
                            to: target.as_str().to_string(),
                            requirement: "an authoritative inspection with result passed"
                                .to_string(),
                        }
                        .into());
                    }
                }
                // Resolving the abnormal sink is a staff action and must
                // carry its justification.
                ReturnStatus::AbnormalDisputed => {
                    if change.override_reason.is_none() {
                        return Err(TransitionError::MissingOverrideReason {
                            from: current.as_str().to_string(),
                            to: target.as_str().to_string(),
                        }
                        .into());
                    }
                }
                _ => {}
            },
            ReturnStatus::AbnormalDisputed => {
                let failed_inspection = current == ReturnStatus::ReceivedInspecting
                    && self
                        .inspection
                        .as_ref()
                        .is_some_and(|record| !record.permits_refund());
                if !failed_inspection && change.override_reason.is_none() {
                    return Err(TransitionError::MissingOverrideReason {
                        from: current.as_str().to_string(),
                        to: target.as_str().to_string(),
                    }
                    .into());
                }
            }
            ReturnStatus::Completed => {
                if self.refund.is_none() {
                    return Err(TransitionError::PreconditionFailed {
                        from: current.as_str().to_string(),
                        to: target.as_str().to_string(),
                        requirement: "a finalized refund record".to_string(),
                    }
                    .into());
                }
            }
            _ => {}
        }

        self.status = target;
        if let Some(tracking) = change.tracking_number {
            self.tracking_number = Some(tracking);
        }
        if let Some(company) = change.logistics_company {
            self.logistics_company = Some(company);
        }
        self.activity_log.push(ActivityEntry {
            actor: change.actor,
            from_status: current,
            to_status: target,
            at: change.at,
            notes: change.notes.or(change.override_reason),
        });
        self.updated_at = change.at;
        Ok(())
    }

    /// Record (or re-record) the authoritative inspection.
    ///
    /// Legal only while the request sits in `received_inspecting`.
    /// Re-submission overwrites the decision; retaining prior records is
    /// the storage collaborator's concern.
    pub fn record_inspection(
        &mut self,
        record: InspectionRecord,
    ) -> Result<(), InvalidStateError> {
        if self.status != ReturnStatus::ReceivedInspecting {
            return Err(InvalidStateError {
                operation: "record inspection".to_string(),
                required: ReturnStatus::ReceivedInspecting.as_str().to_string(),
                actual: self.status.as_str().to_string(),
            });
        }
        self.updated_at = record.inspected_at;
        self.inspection = Some(record);
        Ok(())
    }

    /// Store the finalized refund and copy its amount onto the aggregate.
    ///
    /// Legal only while the request sits in `refund_processing`. The
    /// stored record is what unlocks the `completed` transition.
    pub fn set_refund(&mut self, record: RefundRecord) -> Result<(), InvalidStateError> {
        if self.status != ReturnStatus::RefundProcessing {
            return Err(InvalidStateError {
                operation: "finalize refund".to_string(),
                required: ReturnStatus::RefundProcessing.as_str().to_string(),
                actual: self.status.as_str().to_string(),
            });
        }
        self.refund_amount = Some(record.amount);
        self.updated_at = record.finalized_at;
        self.refund = Some(record);
        Ok(())
    }

    /// Append validated evidence-image metadata.
    ///
    /// Rejected once the case is completed; an immutable closed case
    /// accepts no further evidence.
    pub fn attach_images(
        &mut self,
        batch: Vec<ImageMetadata>,
        at: DateTime<Utc>,
    ) -> Result<(), InvalidStateError> {
        if self.status.is_terminal() {
            return Err(InvalidStateError {
                operation: "attach images".to_string(),
                required: "any status before completed".to_string(),
                actual: self.status.as_str().to_string(),
            });
        }
        self.images.extend(batch);
        self.updated_at = at;
        Ok(())
    }

    /// Append a free-text note. Notes are the amendment mechanism for the
    /// immutable reason fields and are allowed in every status.
    pub fn add_note(&mut self, note: RequestNote) {
        self.updated_at = note.at;
        self.notes.push(note);
    }
}
