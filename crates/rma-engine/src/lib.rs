#![deny(missing_docs)]

//! # rma-engine — Lifecycle Orchestration
//!
//! Wires the pure pieces together: validation contracts in front, the
//! guarded aggregate in the middle, storage behind. Every operation is
//! request/response — nothing here blocks on human input or runs in the
//! background.
//!
//! - **Store** ([`store`]): the [`ReturnStore`] contract (latest-committed
//!   reads, atomic per-aggregate writes) and the in-memory reference
//!   implementation backed by `parking_lot`.
//!
//! - **Engine** ([`engine`]): the operations callers invoke — apply,
//!   update status with compare-and-set, inspect, refund, resolve — each
//!   returning a success snapshot or a typed failure, with structured
//!   tracing on every accepted transition.
//!
//! ## Concurrency
//!
//! At most one in-flight transition per aggregate: status updates carry
//! the status the caller last observed, and the engine rejects the write
//! with a conflict if the stored status has moved. Refund finalization
//! and the completed transition are applied as one atomic unit — no
//! observer sees one without the other.

pub mod engine;
pub mod store;

// Re-export primary types.
pub use engine::{CustomerView, ReturnsEngine};
pub use store::{InMemoryReturnStore, ReturnStore};
