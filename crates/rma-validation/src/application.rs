//! # Return Application Contract
//!
//! The entry-point contract: what a customer submits to open a return.
//! Item violations are reported with indexed field names
//! (`items[2].quantity`) so a multi-line form can highlight the exact
//! row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rma_core::{OrderId, OrderLineId, ReturnShippingMethod, ValidationError};
use rma_state::{NewReturnRequest, ReturnItem};

use crate::limits::{
    ITEM_REASON_MAX, REASON_CATEGORY_MAX, REASON_DETAIL_MAX, REASON_DETAIL_MIN,
};
use crate::violations::Violations;

/// One selected item line as it arrives from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReturnItemInput {
    /// The order line, as a UUID string.
    pub order_line_id: String,
    /// Units to return.
    pub quantity: u32,
    /// Why this item is coming back.
    pub reason: String,
}

/// A raw return application as it arrives from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReturnApplicationInput {
    /// The originating order, as a UUID string.
    pub order_id: String,
    /// Optional sales-channel tag.
    pub channel_source: Option<String>,
    /// Reason category from the storefront's category list.
    pub reason_category: String,
    /// Free-text reason detail.
    pub reason_detail: String,
    /// Shipping method wire name.
    pub shipping_method: String,
    /// The selected items.
    pub items: Vec<ReturnItemInput>,
}

/// A normalized, validated return application.
///
/// Carries no delivery timestamp — that comes from the order record when
/// the engine opens the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnApplication {
    /// The originating order.
    pub order_id: OrderId,
    /// Optional sales-channel tag.
    pub channel_source: Option<String>,
    /// Reason category.
    pub reason_category: String,
    /// Reason detail, 10-1000 characters.
    pub reason_detail: String,
    /// The chosen shipping method.
    pub shipping_method: ReturnShippingMethod,
    /// The validated items, each with a positive quantity and a reason.
    pub items: Vec<ReturnItem>,
}

impl ReturnApplication {
    /// Combine with the order's delivery timestamp into the creation
    /// payload for the aggregate.
    pub fn into_new_request(self, delivered_at: Option<DateTime<Utc>>) -> NewReturnRequest {
        NewReturnRequest {
            order_id: self.order_id,
            channel_source: self.channel_source,
            reason_category: self.reason_category,
            reason_detail: self.reason_detail,
            shipping_method: self.shipping_method,
            delivered_at,
            items: self.items,
        }
    }
}

/// Validate a return application.
pub fn validate_return_application(
    input: ReturnApplicationInput,
) -> Result<ReturnApplication, ValidationError> {
    let mut violations = Violations::new();

    let order_id = match Uuid::parse_str(input.order_id.trim()) {
        Ok(id) => Some(OrderId::from_uuid(id)),
        Err(_) => {
            violations.add("order_id", "must be a valid order reference");
            None
        }
    };

    let reason_category = input.reason_category.trim().to_string();
    if reason_category.is_empty() {
        violations.add("reason_category", "must not be empty");
    } else if reason_category.chars().count() > REASON_CATEGORY_MAX {
        violations.add(
            "reason_category",
            format!("must be at most {REASON_CATEGORY_MAX} characters"),
        );
    }

    let reason_detail = input.reason_detail.trim().to_string();
    let detail_len = reason_detail.chars().count();
    if detail_len < REASON_DETAIL_MIN {
        violations.add(
            "reason_detail",
            format!("must be at least {REASON_DETAIL_MIN} characters"),
        );
    } else if detail_len > REASON_DETAIL_MAX {
        violations.add(
            "reason_detail",
            format!("must be at most {REASON_DETAIL_MAX} characters"),
        );
    }

    let shipping_method = ReturnShippingMethod::from_name(input.shipping_method.trim());
    if shipping_method.is_none() {
        violations.add(
            "shipping_method",
            "must be one of self_ship, convenience_store, company_pickup",
        );
    }

    if input.items.is_empty() {
        violations.add("items", "at least one item must be selected");
    }
    let mut items = Vec::with_capacity(input.items.len());
    for (index, item) in input.items.iter().enumerate() {
        let mut line_ok = true;
        let order_line_id = match Uuid::parse_str(item.order_line_id.trim()) {
            Ok(id) => Some(OrderLineId::from_uuid(id)),
            Err(_) => {
                violations.add(
                    format!("items[{index}].order_line_id"),
                    "must be a valid order line reference",
                );
                line_ok = false;
                None
            }
        };
        if item.quantity < 1 {
            violations.add(format!("items[{index}].quantity"), "must be at least 1");
            line_ok = false;
        }
        let reason = item.reason.trim().to_string();
        if reason.is_empty() {
            violations.add(format!("items[{index}].reason"), "must not be empty");
            line_ok = false;
        } else if reason.chars().count() > ITEM_REASON_MAX {
            violations.add(
                format!("items[{index}].reason"),
                format!("must be at most {ITEM_REASON_MAX} characters"),
            );
            line_ok = false;
        }
        if line_ok {
            items.push(ReturnItem {
                order_line_id: order_line_id.expect("checked above"),
                quantity: item.quantity,
                reason,
            });
        }
    }

    violations.finish_with(|| ReturnApplication {
        order_id: order_id.expect("violations empty implies order id parsed"),
        channel_source: input
            .channel_source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        reason_category,
        reason_detail,
        shipping_method: shipping_method.expect("violations empty implies method parsed"),
        items,
    })
}
