#![deny(missing_docs)]

//! # rma-validation — Inbound Contracts
//!
//! One parse/validate operation per inbound shape. Each either returns a
//! normalized, strongly-typed value or fails with a
//! [`rma_core::ValidationError`] enumerating **every** violated field —
//! contracts never short-circuit at the first problem, so a caller can
//! correct all of them in one pass.
//!
//! This layer checks *shape*: presence, bounds, formats, and membership
//! in closed enums. Whether a well-formed request is *legal* right now
//! (adjacency, entry conditions, deadlines at approval time) is the
//! lifecycle machine's job.
//!
//! Pure throughout — no I/O, no clock reads, no locks.

pub mod application;
pub mod images;
pub mod inspection;
pub mod login;
pub mod refund;
pub mod status;
pub mod violations;

// Re-export the contract surface.
pub use application::{
    validate_return_application, ReturnApplication, ReturnApplicationInput, ReturnItemInput,
};
pub use images::{validate_image_batch, ImageFileInput};
pub use inspection::{validate_inspection, InspectionInput, InspectionSubmission};
pub use login::{validate_customer_login, CustomerLogin, CustomerLoginInput};
pub use refund::{validate_refund, RefundInput, RefundSubmission};
pub use status::{validate_status_update, StatusUpdate, StatusUpdateInput};
pub use violations::Violations;

/// Bounds shared by the textual fields of several contracts.
pub mod limits {
    /// Maximum order number length for customer lookup.
    pub const ORDER_NUMBER_MAX: usize = 100;
    /// Minimum reason-detail length on an application.
    pub const REASON_DETAIL_MIN: usize = 10;
    /// Maximum reason-detail length on an application.
    pub const REASON_DETAIL_MAX: usize = 1000;
    /// Maximum reason-category length.
    pub const REASON_CATEGORY_MAX: usize = 100;
    /// Maximum per-item reason length.
    pub const ITEM_REASON_MAX: usize = 500;
    /// Maximum length for inspection notes and comments.
    pub const FREE_TEXT_MAX: usize = 2000;
}
