#![deny(missing_docs)]

//! # rma-refund — Refund Engine
//!
//! Computes and validates the refund for a return request once inspection
//! has passed, independent of payment execution (which belongs to the
//! payment collaborator). A [`RefundDraft`] carries what staff chose; a
//! [`RefundRecord`] is the finalized, immutable result whose existence is
//! the precondition for completing the request.
//!
//! Amounts are non-negative by construction ([`rma_core::Amount`]), so no
//! negative refund can be drafted, finalized, or stored.

pub mod record;

// Re-export primary types.
pub use record::{RefundDraft, RefundRecord};
