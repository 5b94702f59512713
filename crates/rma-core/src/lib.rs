#![deny(missing_docs)]

//! # rma-core — Foundational Types for the Returns Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a distinct
//!    type. You cannot pass an [`OrderId`] where a [`RequestId`] is expected.
//!
//! 2. **No hidden wall-clock reads.** All time-dependent logic takes `now`
//!    explicitly or through the [`Clock`] trait. The return-window arithmetic
//!    in [`deadline`] is deterministic under test by construction.
//!
//! 3. **Policy is data, not code.** Every operator-tunable constant — window
//!    days, image bounds, accepted content types, enabled refund types — lives
//!    in [`ReturnPolicy`] and is supplied from outside the engine.
//!
//! 4. **[`RmaError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod amount;
pub mod deadline;
pub mod domain;
pub mod error;
pub mod identity;
pub mod policy;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use amount::{Amount, AmountError};
pub use deadline::{is_within_deadline, remaining_days};
pub use domain::{ImageContentType, ImageKind, RefundType, ReturnShippingMethod};
pub use error::{
    ConflictError, DeadlineError, FieldViolation, IdentityError, InvalidStateError, RmaError,
    TransitionError, ValidationError,
};
pub use identity::{ActorId, OrderId, OrderLineId, RequestId, RequestNumber};
pub use policy::ReturnPolicy;
pub use temporal::{Clock, FixedClock, SystemClock};
