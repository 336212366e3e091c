//! Confirmed customer orders.
//!
//! Orders are written once by the booking service and never change afterwards.
//! Line items hold lesson ids by value; the total is fixed at booking time.

use crate::model::LessonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

store_id!(
    /// Store-assigned identifier for orders.
    OrderId
);

/// One `{lessonId, quantity}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub lesson_id: LessonId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(lesson_id: LessonId, quantity: u32) -> Self {
        Self {
            lesson_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub line_items: Vec<LineItem>,
    /// Sum of `price × quantity` at the prices in effect when the order was booked.
    pub total_amount: u64,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Payload for appending an order to the ledger.
///
/// Built by the booking service after every line item has been reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_phone: String,
    pub line_items: Vec<LineItem>,
    pub total_amount: u64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_create(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            line_items: params.line_items,
            total_amount: params.total_amount,
            created_at: params.created_at,
            status: OrderStatus::Confirmed,
        }
    }
}
