//! Shopping cart, discount and payment-strategy domain types for Cartwright.
//!
//! - **Cart**: validated items, name-based lookup/update/remove, stacked discount codes
//! - **Payment**: provider trait plus the `cc` / `paypal` / `apple` checkout strategies
//! - **Bank**: accounts whose deposits and withdrawals go through a payment provider
//! - **Order**: order status transitions and notification emails
//!
//! # Example
//!
//! ```rust
//! use cartwright_commerce::prelude::*;
//!
//! let catalog = DiscountCatalog::standard(Currency::USD);
//! let mut cart = Cart::new(Currency::USD);
//! cart.add_item(Item::new("Book", Money::new(1450, Currency::USD), 2)?)?;
//! cart.update_item("Book", ItemUpdate::new().quantity(3))?;
//! cart.apply_discount("SAVE10", &catalog)?;
//!
//! assert_eq!(cart.total()?, Money::new(3915, Currency::USD));
//! println!("{}", cart.display()?);
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod bank;
pub mod cart;
pub mod order;
pub mod payment;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        AppliedDiscount, Cart, CartPricing, Discount, DiscountCatalog, Item, ItemUpdate,
        LineItemPricing,
    };

    // Payment
    pub use crate::payment::{
        Credentials, PaymentMethod, PaymentReceipt, PaymentService, StripePaymentService,
        TransactionKind,
    };

    // Bank
    pub use crate::bank::{Account, AccountKind, BankService};

    // Order
    pub use crate::order::{Email, Order, OrderStatus, OrderType};
}
