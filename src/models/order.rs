use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cart::CartLine;
use crate::models::product::Price;

pub const ORDER_CONFIRMED_MESSAGE: &str = "🎉 Order Confirmed! Thank you for your purchase. 🎉";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    #[default]
    Browsing,
    ReviewRequested,
    /// A confirmation just cleared the cart and its notification is still live.
    OrderCleared,
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutState::Browsing => write!(f, "browsing"),
            CheckoutState::ReviewRequested => write!(f, "review requested"),
            CheckoutState::OrderCleared => write!(f, "order cleared"),
        }
    }
}

/// Snapshot of the cart shown to the customer before they accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReview {
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl OrderReview {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The success notification produced when an order is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub message: String,
    pub confirmed_at: DateTime<Utc>,
    pub line_count: usize,
    pub unit_count: u64,
    pub total: Price,
}

impl OrderConfirmation {
    pub fn new(line_count: usize, unit_count: u64, total: Price) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            message: ORDER_CONFIRMED_MESSAGE.to_string(),
            confirmed_at: Utc::now(),
            line_count,
            unit_count,
            total,
        }
    }
}
