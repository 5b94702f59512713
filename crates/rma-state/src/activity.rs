//! # Activity Log Entries
//!
//! One append-only audit entry per accepted status transition: who moved
//! the request, from where, to where, when, and any notes. Entries are
//! written atomically with the transition they record and are never
//! mutated or deleted by this core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rma_core::ActorId;

use crate::status::ReturnStatus;

/// A record of a single accepted status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Who performed the transition.
    pub actor: ActorId,
    /// Status before the transition.
    pub from_status: ReturnStatus,
    /// Status after the transition.
    pub to_status: ReturnStatus,
    /// When the transition occurred.
    pub at: DateTime<Utc>,
    /// Optional notes (staff remarks, override reason).
    pub notes: Option<String>,
}
