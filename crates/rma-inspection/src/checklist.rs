//! # Condition Checklist
//!
//! The fixed five-point checklist staff work through when a returned
//! parcel is opened. Every point is tri-state: `Some(true)` passed,
//! `Some(false)` failed, `None` not assessed. Staff may pass or fail a
//! request on holistic judgment alone, so an entirely unassessed
//! checklist is valid — this module records what was checked, it does
//! not mandate completeness.

use serde::{Deserialize, Serialize};

/// The five-point condition checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Checklist {
    /// Original packaging is intact.
    pub packaging_intact: Option<bool>,
    /// The product itself shows no damage.
    pub product_intact: Option<bool>,
    /// All accessories and inserts are present.
    pub accessories_complete: Option<bool>,
    /// The item matches the customer's application photos.
    pub matches_photos: Option<bool>,
    /// The item can go back into sellable stock.
    pub resellable: Option<bool>,
}

impl Checklist {
    /// A checklist with every point unassessed.
    pub fn unassessed() -> Self {
        Self::default()
    }

    /// All five points as `(name, value)` pairs, in canonical order.
    pub fn points(&self) -> [(&'static str, Option<bool>); 5] {
        [
            ("packaging_intact", self.packaging_intact),
            ("product_intact", self.product_intact),
            ("accessories_complete", self.accessories_complete),
            ("matches_photos", self.matches_photos),
            ("resellable", self.resellable),
        ]
    }

    /// How many points were actually assessed.
    pub fn assessed_count(&self) -> usize {
        self.points().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Whether no point was assessed at all.
    pub fn is_unassessed(&self) -> bool {
        self.assessed_count() == 0
    }

    /// Names of the points that were assessed and failed.
    pub fn failed_points(&self) -> Vec<&'static str> {
        self.points()
            .iter()
            .filter(|(_, v)| *v == Some(false))
            .map(|(name, _)| *name)
            .collect()
    }
}
