use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::models::product::{CatalogItem, Price, ProductId};

/// A catalog item held in the cart. The quantity can never be zero: a line
/// that would drop to zero ceases to exist instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    item: CatalogItem,
    quantity: NonZeroU32,
}

impl CartLine {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            quantity: NonZeroU32::MIN,
        }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn id(&self) -> ProductId {
        self.item.id
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn unit_price(&self) -> Price {
        self.item.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn subtotal(&self) -> Price {
        self.item.price * self.quantity.get()
    }

    pub(crate) fn increment(&mut self) -> u32 {
        self.quantity = self.quantity.saturating_add(1);
        self.quantity.get()
    }

    /// Returns `None` when the line drops to zero and must be removed.
    pub(crate) fn decrement(self) -> Option<CartLine> {
        NonZeroU32::new(self.quantity.get() - 1).map(|quantity| CartLine {
            item: self.item,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brownie() -> CatalogItem {
        CatalogItem::new(8, "Salted Caramel Brownie", "images/brownie.jpg", Price::from_cents(450))
    }

    #[test]
    fn new_line_starts_at_one() {
        let line = CartLine::new(brownie());
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.subtotal(), Price::from_cents(450));
    }

    #[test]
    fn decrement_to_zero_drops_line() {
        let mut line = CartLine::new(brownie());
        assert_eq!(line.increment(), 2);

        let line = line.decrement().expect("one left");
        assert_eq!(line.quantity(), 1);
        assert!(line.decrement().is_none());
    }
}
