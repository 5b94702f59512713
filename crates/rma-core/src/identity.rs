//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the Returns Stack.
//! Each identifier is a distinct type — you cannot pass an [`OrderId`]
//! where a [`RequestId`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`RequestNumber`], [`ActorId`]) validate format
//! at construction time. UUID-based identifiers ([`RequestId`], [`OrderId`],
//! [`OrderLineId`]) are always valid by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityError;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for a return request (the aggregate root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Create a new random request identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a request identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for the order a return originates from.
///
/// The order itself is owned by the order-management collaborator; this
/// core only holds the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new random order identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an order identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a single line item on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderLineId(Uuid);

impl OrderLineId {
    /// Create a new random order-line identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an order-line identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderLineId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// The human-readable request number printed on labels and quoted in
/// customer correspondence.
///
/// Format: `RMA-YYYYMMDD-XXXXXX` where the suffix is derived from the
/// request's UUID. Assigned once at creation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestNumber(String);

impl RequestNumber {
    /// Derive the request number for a new request from its creation time
    /// and identifier.
    ///
    /// The UUID-derived suffix makes collisions across requests created on
    /// the same day as unlikely as UUID collisions themselves.
    pub fn generate(created_at: DateTime<Utc>, id: &RequestId) -> Self {
        let date = created_at.format("%Y%m%d");
        let hex = id.as_uuid().simple().to_string();
        Self(format!("RMA-{date}-{}", hex[..6].to_uppercase()))
    }

    /// Parse a request number arriving as a string (e.g. from a customer
    /// lookup form).
    ///
    /// Accepts only the canonical `RMA-YYYYMMDD-XXXXXX` shape.
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 19
            && s.starts_with("RMA-")
            && bytes[4..12].iter().all(|b| b.is_ascii_digit())
            && bytes[12] == b'-'
            && bytes[13..19]
                .iter()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(IdentityError::InvalidRequestNumber(s.to_string()))
        }
    }

    /// Access the request number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of the party performing an operation — a staff login or a
/// customer session handle, as resolved by the authentication collaborator.
///
/// This core only records actor identities on the audit trail; it never
/// authenticates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Maximum accepted actor identity length.
    pub const MAX_LEN: usize = 64;

    /// Create an actor identity, rejecting empty or oversized values.
    pub fn new(s: impl Into<String>) -> Result<Self, IdentityError> {
        let s = s.into();
        if s.trim().is_empty() || s.len() > Self::MAX_LEN {
            return Err(IdentityError::InvalidActor(s));
        }
        Ok(Self(s))
    }

    /// Access the actor identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
