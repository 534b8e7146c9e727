pub mod cart;
pub mod order;
pub mod product;

pub use cart::CartLine;
pub use order::{CheckoutState, OrderConfirmation, OrderReview};
pub use product::{CatalogItem, Price, PriceError, ProductId};
