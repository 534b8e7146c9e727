pub mod cart_service;
pub mod checkout_service;
pub mod storefront;

pub use cart_service::*;
pub use checkout_service::*;
pub use storefront::*;
