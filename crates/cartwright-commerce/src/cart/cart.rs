//! The shopping cart.

use crate::cart::{
    AppliedDiscount, CartPricing, Discount, DiscountCatalog, Item, ItemUpdate, LineItemPricing,
};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::Serialize;
use tracing::{debug, warn};

/// A shopping cart.
///
/// Items keep insertion order and are not deduplicated; name lookups
/// return the first match. Discounts are resolved against a
/// [`DiscountCatalog`] when applied and re-evaluated against the current
/// subtotal whenever the discount is read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    items: Vec<Item>,
    discounts: Vec<Discount>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            discounts: Vec::new(),
            currency,
        }
    }

    /// Create a cart holding the given items.
    pub fn with_items(
        currency: Currency,
        items: impl IntoIterator<Item = Item>,
    ) -> Result<Self, CommerceError> {
        let mut cart = Self::new(currency);
        for item in items {
            cart.add_item(item)?;
        }
        Ok(cart)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Append an item. Items with the same name are kept side by side.
    pub fn add_item(&mut self, item: Item) -> Result<(), CommerceError> {
        if item.unit_price().currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price().currency.code().to_string(),
            });
        }
        debug!(item = item.name(), quantity = item.quantity(), "adding item to cart");
        self.items.push(item);
        Ok(())
    }

    /// Find the first item with this name.
    pub fn find_item(&self, name: &str) -> Result<&Item, CommerceError> {
        self.items
            .iter()
            .find(|i| i.name() == name)
            .ok_or_else(|| CommerceError::ItemNotFound(name.to_string()))
    }

    fn position(&self, name: &str) -> Result<usize, CommerceError> {
        self.items
            .iter()
            .position(|i| i.name() == name)
            .ok_or_else(|| CommerceError::ItemNotFound(name.to_string()))
    }

    /// Change the quantity and/or price of the first item with this name.
    ///
    /// All provided fields are validated before any is applied, so the
    /// cart is unchanged if this returns an error.
    pub fn update_item(&mut self, name: &str, update: ItemUpdate) -> Result<(), CommerceError> {
        let index = self.position(name)?;
        update.validate()?;
        if let Some(price) = update.price {
            if price.currency != self.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: price.currency.code().to_string(),
                });
            }
        }

        let item = &mut self.items[index];
        if let Some(quantity) = update.quantity {
            item.set_quantity(quantity)?;
        }
        if let Some(price) = update.price {
            item.set_price(price)?;
        }
        debug!(item = name, ?update, "updated cart item");
        Ok(())
    }

    /// Remove and return the first item with this name.
    pub fn remove_item(&mut self, name: &str) -> Result<Item, CommerceError> {
        let index = self.position(name)?;
        debug!(item = name, "removing item from cart");
        Ok(self.items.remove(index))
    }

    /// Remove all items and discounts.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discounts.clear();
    }

    /// Activate a discount code from the catalog.
    ///
    /// Unknown codes are rejected with [`CommerceError::InvalidDiscountCode`]
    /// and leave the cart unchanged. Applying an active code again is a no-op.
    pub fn apply_discount(
        &mut self,
        code: &str,
        catalog: &DiscountCatalog,
    ) -> Result<(), CommerceError> {
        let Some(discount) = catalog.get(code) else {
            warn!(code, "rejected unknown discount code");
            return Err(CommerceError::InvalidDiscountCode(code.to_string()));
        };
        if discount.fixed_amount().currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: discount.fixed_amount().currency.code().to_string(),
            });
        }
        if self.discounts.iter().any(|d| d.code() == code) {
            debug!(code, "discount code already active");
            return Ok(());
        }
        debug!(code, "applying discount code");
        self.discounts.push(discount.clone());
        Ok(())
    }

    /// Deactivate a discount code. Returns whether it was active.
    pub fn remove_discount(&mut self, code: &str) -> bool {
        let len_before = self.discounts.len();
        self.discounts.retain(|d| d.code() != code);
        self.discounts.len() < len_before
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Active discount codes in the order they were applied.
    pub fn discount_codes(&self) -> impl Iterator<Item = &str> {
        self.discounts.iter().map(|d| d.code())
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> Result<i64, CommerceError> {
        self.items.iter().try_fold(0i64, |acc, i| {
            acc.checked_add(i.quantity()).ok_or(CommerceError::Overflow)
        })
    }

    /// Sum of item subtotals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items
            .iter()
            .try_fold(Money::zero(self.currency), |acc, item| {
                acc.try_add(&item.subtotal()?)
            })
    }

    /// Sum over active codes of `fixed + percentage * subtotal`.
    pub fn discount(&self) -> Result<Money, CommerceError> {
        let subtotal = self.subtotal()?;
        self.discount_for(&subtotal)
    }

    fn discount_for(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        self.discounts
            .iter()
            .try_fold(Money::zero(self.currency), |acc, d| {
                acc.try_add(&d.amount_for(subtotal)?)
            })
    }

    /// Subtotal minus discount. Not floored at zero.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let subtotal = self.subtotal()?;
        subtotal.try_subtract(&self.discount_for(&subtotal)?)
    }

    /// Calculate cart pricing.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    name: item.name().to_string(),
                    unit_price: item.unit_price(),
                    quantity: item.quantity(),
                    subtotal: item.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = Money::try_sum(line_items.iter().map(|l| &l.subtotal), self.currency)?;

        let discounts = self
            .discounts
            .iter()
            .map(|d| {
                Ok(AppliedDiscount {
                    code: d.code().to_string(),
                    amount: d.amount_for(&subtotal)?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let discount_total = Money::try_sum(discounts.iter().map(|d| &d.amount), self.currency)?;
        let grand_total = subtotal.try_subtract(&discount_total)?;

        Ok(CartPricing {
            currency: self.currency,
            subtotal,
            discount_total,
            grand_total,
            line_items,
            discounts,
        })
    }

    /// Render the fixed-width cart report.
    pub fn display(&self) -> Result<String, CommerceError> {
        Ok(self.calculate_pricing()?.to_string())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn sample_cart() -> Cart {
        Cart::with_items(
            Currency::USD,
            [
                Item::new("Apple", usd(150), 10).unwrap(),
                Item::new("Banana", usd(200), 2).unwrap(),
                Item::new("Pizza", usd(1190), 5).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::USD);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().unwrap(), usd(0));
        assert_eq!(cart.total().unwrap(), usd(0));
    }

    #[test]
    fn test_add_item_keeps_duplicates() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(Item::new("Apple", usd(100), 1).unwrap()).unwrap();
        cart.add_item(Item::new("Apple", usd(200), 2).unwrap()).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count().unwrap(), 3);
        // First match wins.
        assert_eq!(cart.find_item("Apple").unwrap().unit_price(), usd(100));
    }

    #[test]
    fn test_add_item_currency_mismatch() {
        let mut cart = Cart::new(Currency::USD);
        let euro = Item::new("Croissant", Money::new(250, Currency::EUR), 1).unwrap();
        assert!(matches!(
            cart.add_item(euro),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal() {
        let cart = sample_cart();
        // 10 * 1.50 + 2 * 2.00 + 5 * 11.90
        assert_eq!(cart.subtotal().unwrap(), usd(7850));
    }

    #[test]
    fn test_update_item() {
        let mut cart = sample_cart();
        cart.update_item("Pizza", ItemUpdate::new().price(usd(350))).unwrap();
        cart.update_item("Apple", ItemUpdate::new().quantity(4)).unwrap();

        let pizza = cart.find_item("Pizza").unwrap();
        assert_eq!(pizza.unit_price(), usd(350));
        assert_eq!(pizza.quantity(), 5);
        assert_eq!(cart.find_item("Apple").unwrap().quantity(), 4);
    }

    #[test]
    fn test_update_item_empty_is_noop() {
        let mut cart = sample_cart();
        let before = cart.clone();
        cart.update_item("Banana", ItemUpdate::new()).unwrap();
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_item_invalid_leaves_cart_unchanged() {
        let mut cart = Cart::with_items(
            Currency::USD,
            [Item::new("Book", usd(1450), 2).unwrap()],
        )
        .unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.update_item("Book", ItemUpdate::new().price(usd(0))),
            Err(CommerceError::InvalidPrice(usd(0)))
        );
        assert_eq!(
            cart.update_item("Book", ItemUpdate::new().quantity(-3)),
            Err(CommerceError::InvalidQuantity(-3))
        );
        // Valid quantity is not applied when the price is rejected.
        assert!(cart
            .update_item("Book", ItemUpdate::new().quantity(7).price(usd(0)))
            .is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_missing_item() {
        let mut cart = sample_cart();
        assert_eq!(
            cart.update_item("Nonexistent", ItemUpdate::new().quantity(1)),
            Err(CommerceError::ItemNotFound("Nonexistent".to_string()))
        );
    }

    #[test]
    fn test_remove_item() {
        let mut cart = sample_cart();
        let removed = cart.remove_item("Banana").unwrap();
        assert_eq!(removed.name(), "Banana");
        assert_eq!(cart.len(), 2);
        assert!(cart.find_item("Banana").is_err());
    }

    #[test]
    fn test_remove_missing_item() {
        let mut cart = sample_cart();
        assert_eq!(
            cart.remove_item("Nonexistent"),
            Err(CommerceError::ItemNotFound("Nonexistent".to_string()))
        );
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_apply_discount() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart =
            Cart::with_items(Currency::USD, [Item::new("Thing", usd(10000), 1).unwrap()])
                .unwrap();

        cart.apply_discount("SAVE10", &catalog).unwrap();
        assert_eq!(cart.discount().unwrap(), usd(1000));
        assert_eq!(cart.total().unwrap(), usd(9000));
    }

    #[test]
    fn test_discounts_stack_additively() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart =
            Cart::with_items(Currency::USD, [Item::new("Thing", usd(10000), 1).unwrap()])
                .unwrap();

        cart.apply_discount("SAVE10", &catalog).unwrap();
        cart.apply_discount("5BUCKSOFF", &catalog).unwrap();
        cart.apply_discount("SAVE10", &catalog).unwrap();

        assert_eq!(cart.discount_codes().collect::<Vec<_>>(), ["SAVE10", "5BUCKSOFF"]);
        assert_eq!(cart.discount().unwrap(), usd(1500));
        assert_eq!(cart.total().unwrap(), usd(8500));

        assert!(cart.remove_discount("SAVE10"));
        assert!(!cart.remove_discount("SAVE10"));
        assert_eq!(cart.total().unwrap(), usd(9500));
    }

    #[test]
    fn test_unknown_discount_rejected() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart = sample_cart();
        assert_eq!(
            cart.apply_discount("BOGUS", &catalog),
            Err(CommerceError::InvalidDiscountCode("BOGUS".to_string()))
        );
        assert_eq!(cart.discount_codes().count(), 0);
        assert_eq!(cart.discount().unwrap(), usd(0));
    }

    #[test]
    fn test_unknown_discount_keeps_active_codes() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart = sample_cart();
        cart.apply_discount("SAVE10", &catalog).unwrap();
        let total = cart.total().unwrap();

        assert!(cart.apply_discount("NOPE", &catalog).is_err());
        assert_eq!(cart.discount_codes().collect::<Vec<_>>(), vec!["SAVE10"]);
        assert_eq!(cart.total().unwrap(), total);
    }

    #[test]
    fn test_item_count_overflow() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(Item::new("A", usd(1), i64::MAX).unwrap()).unwrap();
        cart.add_item(Item::new("B", usd(1), 1).unwrap()).unwrap();

        assert_eq!(cart.item_count(), Err(CommerceError::Overflow));
        assert_eq!(cart.subtotal(), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_discount_tracks_current_subtotal() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart =
            Cart::with_items(Currency::USD, [Item::new("Thing", usd(10000), 1).unwrap()])
                .unwrap();
        cart.apply_discount("BLKFRIDAY", &catalog).unwrap();
        cart.update_item("Thing", ItemUpdate::new().quantity(2)).unwrap();
        assert_eq!(cart.discount().unwrap(), usd(4000));
    }

    #[test]
    fn test_total_can_go_negative() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart =
            Cart::with_items(Currency::USD, [Item::new("Gum", usd(100), 1).unwrap()]).unwrap();
        cart.apply_discount("5BUCKSOFF", &catalog).unwrap();
        assert_eq!(cart.total().unwrap(), usd(-400));
    }

    #[test]
    fn test_pricing() {
        let mut catalog = DiscountCatalog::new(Currency::USD);
        catalog
            .insert(Discount::percentage("HALF", Decimal::new(5, 1), Currency::USD).unwrap())
            .unwrap();
        let mut cart = sample_cart();
        cart.apply_discount("HALF", &catalog).unwrap();

        let pricing = cart.calculate_pricing().unwrap();
        assert_eq!(pricing.line_items.len(), 3);
        assert_eq!(pricing.line_items[2].subtotal, usd(5950));
        assert_eq!(pricing.subtotal, usd(7850));
        assert_eq!(pricing.discounts[0].amount, usd(3925));
        assert_eq!(pricing.grand_total, usd(3925));
        assert_eq!(pricing.grand_total, cart.total().unwrap());
    }

    #[test]
    fn test_display() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart = sample_cart();
        cart.apply_discount("SAVE10", &catalog).unwrap();

        let report = cart.display().unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Shopping Cart:");
        assert_eq!(lines[2], "Apple       $   1.50     10     $  15.00");
        assert_eq!(lines[4], "Pizza       $  11.90      5     $  59.50");
        assert_eq!(lines[6], "Subtotal: $  78.50");
        assert_eq!(lines[7], "Discount: $   7.85");
        assert_eq!(lines[8], "Total:    $  70.65");
    }

    #[test]
    fn test_clear() {
        let catalog = DiscountCatalog::standard(Currency::USD);
        let mut cart = sample_cart();
        cart.apply_discount("SAVE10", &catalog).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.discount_codes().count(), 0);
    }
}
