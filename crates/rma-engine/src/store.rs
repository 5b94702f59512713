//! # Storage Contract and Reference Store
//!
//! The engine talks to storage through [`ReturnStore`]: reads return the
//! latest committed aggregate, writes are atomic per aggregate. A
//! production deployment implements this over its database; the
//! [`InMemoryReturnStore`] here is the reference implementation used by
//! tests and single-process deployments.
//!
//! All operations are synchronous (the lock is `parking_lot`, not an
//! async one) because the lock is never held across an await point.
//! `parking_lot::RwLock` is non-poisonable — a panicking writer does not
//! permanently corrupt the store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use rma_core::{RequestId, RmaError};
use rma_state::ReturnRequest;

/// Storage contract for return-request aggregates.
///
/// Implementations must guarantee that [`ReturnStore::get`] returns the
/// latest committed state and that [`ReturnStore::mutate`] applies its
/// operation atomically with respect to other writers of the same
/// aggregate: the closure observes committed state, and either all of
/// its changes commit or none do.
pub trait ReturnStore: Send + Sync {
    /// Retrieve the latest committed aggregate by id.
    fn get(&self, id: &RequestId) -> Option<ReturnRequest>;

    /// Store a freshly created aggregate, returning the previous one if
    /// the id already existed (which a correctly wired caller never
    /// triggers — ids are generated at creation).
    fn insert(&self, request: ReturnRequest) -> Option<ReturnRequest>;

    /// Atomically read-modify-write one aggregate.
    ///
    /// The operation runs against the committed state under the
    /// aggregate's write exclusivity. If it returns `Err`, the stored
    /// state is left untouched; on `Ok` the updated aggregate is
    /// committed and returned.
    fn mutate(
        &self,
        id: &RequestId,
        op: &mut dyn FnMut(&mut ReturnRequest) -> Result<(), RmaError>,
    ) -> Result<ReturnRequest, RmaError>;

    /// All stored aggregates, for staff listings.
    fn list(&self) -> Vec<ReturnRequest>;
}

/// Thread-safe, cloneable in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryReturnStore {
    data: Arc<RwLock<HashMap<RequestId, ReturnRequest>>>,
}

impl Clone for InMemoryReturnStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl InMemoryReturnStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored aggregates.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl ReturnStore for InMemoryReturnStore {
    fn get(&self, id: &RequestId) -> Option<ReturnRequest> {
        self.data.read().get(id).cloned()
    }

    fn insert(&self, request: ReturnRequest) -> Option<ReturnRequest> {
        self.data.write().insert(request.id, request)
    }

    fn mutate(
        &self,
        id: &RequestId,
        op: &mut dyn FnMut(&mut ReturnRequest) -> Result<(), RmaError>,
    ) -> Result<ReturnRequest, RmaError> {
        let mut guard = self.data.write();
        let stored = guard
            .get_mut(id)
            .ok_or_else(|| RmaError::NotFound(id.to_string()))?;
        // Work on a copy so a failed operation commits nothing.
        let mut working = stored.clone();
        op(&mut working)?;
        *stored = working.clone();
        Ok(working)
    }

    fn list(&self) -> Vec<ReturnRequest> {
        self.data.read().values().cloned().collect()
    }
}
