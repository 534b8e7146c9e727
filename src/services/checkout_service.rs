use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    models::order::{CheckoutState, OrderConfirmation, OrderReview},
    services::cart_service::CartEngine,
};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("No order review is awaiting confirmation")]
    NotAwaitingConfirmation,

    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
}

#[derive(Debug, Clone)]
struct ActiveNotification {
    confirmation: OrderConfirmation,
    expires_at: Instant,
}

/// Two-step confirmation gate in front of clearing the cart, plus the
/// short-lived success notification that follows an accepted order.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    reviewing: bool,
    notification: Option<ActiveNotification>,
    notification_ttl: Duration,
    allow_empty_orders: bool,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL, true)
    }
}

impl CheckoutFlow {
    pub fn new(notification_ttl: Duration, allow_empty_orders: bool) -> Self {
        Self {
            reviewing: false,
            notification: None,
            notification_ttl,
            allow_empty_orders,
        }
    }

    pub fn state(&self) -> CheckoutState {
        if self.reviewing {
            CheckoutState::ReviewRequested
        } else if self.notification().is_some() {
            CheckoutState::OrderCleared
        } else {
            CheckoutState::Browsing
        }
    }

    /// Opens (or refreshes) the review of the current cart.
    pub fn request_confirmation(&mut self, cart: &CartEngine) -> Result<OrderReview, CheckoutError> {
        if cart.is_empty() && !self.allow_empty_orders {
            warn!("Order review refused: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        self.reviewing = true;
        let review = OrderReview {
            lines: cart.lines().to_vec(),
            total: cart.compute_total(),
        };
        debug!("Order review requested for {} lines, total {}", review.lines.len(), review.total);
        Ok(review)
    }

    /// Closes an open review without touching the cart. Returns whether one was open.
    pub fn cancel_confirmation(&mut self) -> bool {
        let was_reviewing = std::mem::replace(&mut self.reviewing, false);
        if was_reviewing {
            debug!("Order review cancelled");
        }
        was_reviewing
    }

    /// Accepts the open review: clears the cart and starts a fresh
    /// notification window. A newer confirmation always replaces an older one.
    pub fn accept_confirmation(&mut self, cart: &mut CartEngine) -> Result<OrderConfirmation, CheckoutError> {
        if !self.reviewing {
            return Err(CheckoutError::NotAwaitingConfirmation);
        }

        let confirmation =
            OrderConfirmation::new(cart.line_count(), cart.unit_count(), cart.compute_total());
        cart.clear();
        self.reviewing = false;

        if self.notification.is_some() {
            debug!("Replacing previous order notification");
        }
        self.notification = Some(ActiveNotification {
            confirmation: confirmation.clone(),
            expires_at: Instant::now() + self.notification_ttl,
        });

        info!(
            "Order {} confirmed: {} items, total {}",
            confirmation.order_id, confirmation.unit_count, confirmation.total
        );
        Ok(confirmation)
    }

    /// The success notification, if its window has not elapsed.
    pub fn notification(&self) -> Option<&OrderConfirmation> {
        self.notification
            .as_ref()
            .filter(|active| Instant::now() < active.expires_at)
            .map(|active| &active.confirmation)
    }

    pub fn notification_remaining(&self) -> Option<Duration> {
        self.notification
            .as_ref()
            .map(|active| active.expires_at.saturating_duration_since(Instant::now()))
            .filter(|remaining| !remaining.is_zero())
    }

    /// Drops the notification once its window has elapsed. Returns whether
    /// anything was dropped.
    pub fn expire_notification(&mut self) -> bool {
        match &self.notification {
            Some(active) if Instant::now() >= active.expires_at => {
                debug!("Order notification {} expired", active.confirmation.order_id);
                self.notification = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{CatalogItem, Price};

    fn cart_with_pie() -> CartEngine {
        let mut cart = CartEngine::new();
        cart.add_item(&CatalogItem::new(6, "Lemon Meringue Pie", "images/pie.jpg", Price::from_cents(500)));
        cart
    }

    #[test]
    fn accept_without_request_is_rejected() {
        let mut flow = CheckoutFlow::default();
        let mut cart = cart_with_pie();

        assert_eq!(
            flow.accept_confirmation(&mut cart),
            Err(CheckoutError::NotAwaitingConfirmation)
        );
        assert_eq!(cart.line_count(), 1);
        assert_eq!(flow.state(), CheckoutState::Browsing);
    }

    #[test]
    fn cancel_returns_to_browsing_and_keeps_cart() {
        let mut flow = CheckoutFlow::default();
        let cart = cart_with_pie();

        let review = flow.request_confirmation(&cart).unwrap();
        assert_eq!(review.total, Price::from_cents(500));
        assert_eq!(flow.state(), CheckoutState::ReviewRequested);

        assert!(flow.cancel_confirmation());
        assert!(!flow.cancel_confirmation());
        assert_eq!(flow.state(), CheckoutState::Browsing);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn empty_orders_can_be_refused() {
        let mut flow = CheckoutFlow::new(DEFAULT_NOTIFICATION_TTL, false);
        let cart = CartEngine::new();

        assert_eq!(flow.request_confirmation(&cart), Err(CheckoutError::EmptyCart));
        assert_eq!(flow.state(), CheckoutState::Browsing);
    }

    #[tokio::test(start_paused = true)]
    async fn accept_clears_cart_and_notification_expires() {
        let mut flow = CheckoutFlow::default();
        let mut cart = cart_with_pie();

        flow.request_confirmation(&cart).unwrap();
        let confirmation = flow.accept_confirmation(&mut cart).unwrap();

        assert!(cart.is_empty());
        assert_eq!(confirmation.total, Price::from_cents(500));
        assert_eq!(flow.state(), CheckoutState::OrderCleared);
        assert_eq!(flow.notification().map(|n| n.order_id), Some(confirmation.order_id));

        tokio::time::advance(Duration::from_millis(2_999)).await;
        assert!(flow.notification().is_some());
        assert!(!flow.expire_notification());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(flow.notification().is_none());
        assert!(flow.expire_notification());
        assert_eq!(flow.state(), CheckoutState::Browsing);
    }

    #[tokio::test(start_paused = true)]
    async fn second_confirmation_gets_a_fresh_window() {
        let mut flow = CheckoutFlow::default();
        let mut cart = cart_with_pie();

        flow.request_confirmation(&cart).unwrap();
        flow.accept_confirmation(&mut cart).unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;
        flow.request_confirmation(&cart).unwrap();
        let second = flow.accept_confirmation(&mut cart).unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(flow.notification().map(|n| n.order_id), Some(second.order_id));
        assert!(!flow.expire_notification());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(flow.expire_notification());
    }

    #[test]
    fn empty_cart_confirmation_still_notifies_by_default() {
        let mut flow = CheckoutFlow::default();
        let mut cart = CartEngine::new();

        let review = flow.request_confirmation(&cart).unwrap();
        assert!(review.is_empty());

        let confirmation = flow.accept_confirmation(&mut cart).unwrap();
        assert_eq!(confirmation.total, Price::ZERO);
        assert!(!confirmation.message.is_empty());
        assert!(flow.notification().is_some());
    }
}
