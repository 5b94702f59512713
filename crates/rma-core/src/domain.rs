//! # Shared Domain Enums — Single Source of Truth
//!
//! Closed enums referenced by more than one crate in the workspace: the
//! return shipping methods, image classification tags, accepted image
//! content types, and refund types. Each is the single definition used
//! everywhere — the compiler enforces exhaustive `match`, so a new variant
//! forces every handler in the codebase to address it.
//!
//! Wire names are snake_case and stable; they appear in stored records and
//! in operator policy files.

use serde::{Deserialize, Serialize};

/// How the customer sends the merchandise back.
///
/// Fixed at creation of the return request; the logistics collaborator
/// maps each method to a carrier workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnShippingMethod {
    /// Customer ships through a carrier of their choice.
    SelfShip,
    /// Customer drops the parcel at a convenience store counter.
    ConvenienceStore,
    /// The company arranges a courier pickup.
    CompanyPickup,
}

impl ReturnShippingMethod {
    /// Return all shipping methods as a slice.
    pub fn all() -> &'static [ReturnShippingMethod] {
        &[Self::SelfShip, Self::ConvenienceStore, Self::CompanyPickup]
    }

    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfShip => "self_ship",
            Self::ConvenienceStore => "convenience_store",
            Self::CompanyPickup => "company_pickup",
        }
    }

    /// Convert a canonical wire name back to a method.
    ///
    /// Returns `None` for any other input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "self_ship" => Some(Self::SelfShip),
            "convenience_store" => Some(Self::ConvenienceStore),
            "company_pickup" => Some(Self::CompanyPickup),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReturnShippingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a customer- or staff-uploaded image documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    /// The return shipping label.
    ShippingLabel,
    /// Damage to the product itself.
    ProductDamage,
    /// The outer shipping box.
    OuterBox,
    /// Photos taken by staff during inspection.
    Inspection,
    /// Anything else.
    Other,
}

impl ImageKind {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShippingLabel => "shipping_label",
            Self::ProductDamage => "product_damage",
            Self::OuterBox => "outer_box",
            Self::Inspection => "inspection",
            Self::Other => "other",
        }
    }

    /// Convert a canonical wire name back to a kind.
    ///
    /// Returns `None` for any other input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shipping_label" => Some(Self::ShippingLabel),
            "product_damage" => Some(Self::ProductDamage),
            "outer_box" => Some(Self::OuterBox),
            "inspection" => Some(Self::Inspection),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepted image content types for evidence uploads.
///
/// The set an operator actually accepts is policy
/// ([`crate::policy::ReturnPolicy::accepted_image_types`]); this enum is the
/// closed universe those policies draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageContentType {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
    /// `image/webp`
    Webp,
    /// `image/heic`
    Heic,
}

impl ImageContentType {
    /// Return all content types as a slice.
    pub fn all() -> &'static [ImageContentType] {
        &[Self::Jpeg, Self::Png, Self::Webp, Self::Heic]
    }

    /// The MIME type string as it arrives from an upload collaborator.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Heic => "image/heic",
        }
    }

    /// Resolve a MIME type string to a content type.
    ///
    /// Returns `None` for anything outside the closed set — there is no
    /// pass-through for unrecognized types.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/heic" => Some(Self::Heic),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

/// How an approved refund is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundType {
    /// Reverse the charge on the original payment instrument.
    OriginalPayment,
    /// Issue store credit for future purchases.
    StoreCredit,
    /// Transfer to a bank account supplied by the customer.
    BankTransfer,
}

impl RefundType {
    /// Return all refund types as a slice.
    pub fn all() -> &'static [RefundType] {
        &[Self::OriginalPayment, Self::StoreCredit, Self::BankTransfer]
    }

    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OriginalPayment => "original_payment",
            Self::StoreCredit => "store_credit",
            Self::BankTransfer => "bank_transfer",
        }
    }

    /// Convert a canonical wire name back to a refund type.
    ///
    /// Returns `None` for any other input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "original_payment" => Some(Self::OriginalPayment),
            "store_credit" => Some(Self::StoreCredit),
            "bank_transfer" => Some(Self::BankTransfer),
            _ => None,
        }
    }
}

impl std::fmt::Display for RefundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
