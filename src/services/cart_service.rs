use tracing::debug;

use crate::models::{
    cart::CartLine,
    product::{CatalogItem, Price, ProductId},
};

/// Owns the cart lines. Each id appears at most once and lines keep the order
/// in which they were first added.
#[derive(Debug, Clone, Default)]
pub struct CartEngine {
    lines: Vec<CartLine>,
}

impl CartEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, appending a new line if it is not in the cart yet.
    pub fn add_item(&mut self, item: &CatalogItem) -> u32 {
        let quantity = match self.position(item.id) {
            Some(index) => self.lines[index].increment(),
            None => {
                self.lines.push(CartLine::new(item.clone()));
                1
            }
        };
        debug!("Added {} to cart, quantity now {}", item.id, quantity);
        quantity
    }

    /// Returns the new quantity, or `None` if the id is not in the cart.
    pub fn increase_quantity(&mut self, id: ProductId) -> Option<u32> {
        let Some(index) = self.position(id) else {
            debug!("Increase ignored, {} is not in the cart", id);
            return None;
        };
        let quantity = self.lines[index].increment();
        debug!("Increased {} to {}", id, quantity);
        Some(quantity)
    }

    /// Returns the remaining quantity (`Some(0)` once the line is gone), or
    /// `None` if the id is not in the cart.
    pub fn decrease_quantity(&mut self, id: ProductId) -> Option<u32> {
        let Some(index) = self.position(id) else {
            debug!("Decrease ignored, {} is not in the cart", id);
            return None;
        };

        let line = self.lines.remove(index);
        match line.decrement() {
            Some(line) => {
                let quantity = line.quantity();
                self.lines.insert(index, line);
                debug!("Decreased {} to {}", id, quantity);
                Some(quantity)
            }
            None => {
                debug!("Removed {} from cart after decreasing to zero", id);
                Some(0)
            }
        }
    }

    pub fn remove_item(&mut self, id: ProductId) -> Option<CartLine> {
        let removed = self.position(id).map(|index| self.lines.remove(index));
        match &removed {
            Some(line) => debug!("Removed {} ({}) from cart", id, line.name()),
            None => debug!("Remove ignored, {} is not in the cart", id),
        }
        removed
    }

    pub fn compute_total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        debug!("Clearing cart with {} lines", self.lines.len());
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == id)
    }
}
