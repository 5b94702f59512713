#![deny(missing_docs)]

//! # rma-state — Return-Request Lifecycle
//!
//! The authoritative status set and legal transitions for a return
//! request, and the aggregate those transitions act on.
//!
//! - **Status** ([`status`]): the seven lifecycle statuses, the fixed
//!   adjacency table (every legal edge enumerated, no "any to any"
//!   escape hatch), and the pure three-step customer projection.
//!
//! - **Activity** ([`activity`]): the append-only audit entry recorded
//!   with every accepted transition.
//!
//! - **Request** ([`request`]): the [`ReturnRequest`] aggregate root with
//!   its owned items, images, inspection, refund, and log; all mutation
//!   flows through guarded methods so the entry conditions cannot be
//!   bypassed.

pub mod activity;
pub mod request;
pub mod status;

// Re-export primary types.
pub use activity::ActivityEntry;
pub use request::{
    ImageMetadata, NewReturnRequest, RequestNote, ReturnItem, ReturnRequest, StatusChange,
};
pub use status::{CustomerStep, ReturnStatus};
