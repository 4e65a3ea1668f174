//! Shopping cart module.
//!
//! Contains types for the cart, its items, pricing, and discount codes.

mod cart;
mod discount;
mod item;
mod pricing;

pub use cart::Cart;
pub use discount::{Discount, DiscountCatalog};
pub use item::{Item, ItemUpdate};
pub use pricing::{AppliedDiscount, CartPricing, LineItemPricing};
