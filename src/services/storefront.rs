use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    models::{
        cart::CartLine,
        order::{CheckoutState, OrderConfirmation, OrderReview},
        product::{Price, ProductId},
    },
    services::{
        cart_service::CartEngine,
        checkout_service::{CheckoutError, CheckoutFlow},
    },
};

/// A shopping session: the loaded catalog, the cart and the checkout flow.
/// Every user action goes through here by catalog id.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: CartEngine,
    checkout: CheckoutFlow,
}

impl Storefront {
    pub fn new(catalog: Catalog, checkout: CheckoutFlow) -> Self {
        Self {
            catalog,
            cart: CartEngine::new(),
            checkout,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    /// Adds one unit of a catalog item. Unknown ids are ignored.
    pub fn add_item(&mut self, id: ProductId) -> Option<u32> {
        let quantity = match self.catalog.find(id) {
            Some(item) => self.cart.add_item(item),
            None => {
                warn!("Cannot add {}: not in catalog", id);
                return None;
            }
        };
        self.close_stale_review();
        Some(quantity)
    }

    pub fn increase_quantity(&mut self, id: ProductId) -> Option<u32> {
        let quantity = self.cart.increase_quantity(id)?;
        self.close_stale_review();
        Some(quantity)
    }

    pub fn decrease_quantity(&mut self, id: ProductId) -> Option<u32> {
        let quantity = self.cart.decrease_quantity(id)?;
        self.close_stale_review();
        Some(quantity)
    }

    pub fn remove_item(&mut self, id: ProductId) -> Option<CartLine> {
        let removed = self.cart.remove_item(id)?;
        self.close_stale_review();
        Some(removed)
    }

    pub fn total(&self) -> Price {
        self.cart.compute_total()
    }

    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    pub fn request_confirmation(&mut self) -> Result<OrderReview, CheckoutError> {
        self.checkout.request_confirmation(&self.cart)
    }

    pub fn accept_confirmation(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        self.checkout.accept_confirmation(&mut self.cart)
    }

    pub fn cancel_confirmation(&mut self) -> bool {
        self.checkout.cancel_confirmation()
    }

    pub fn notification(&self) -> Option<&OrderConfirmation> {
        self.checkout.notification()
    }

    pub fn expire_notification(&mut self) -> bool {
        self.checkout.expire_notification()
    }

    pub fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// An open review no longer matches the cart once the cart changes.
    fn close_stale_review(&mut self) {
        if self.checkout.cancel_confirmation() {
            debug!("Cart changed during review, review closed");
        }
    }
}
