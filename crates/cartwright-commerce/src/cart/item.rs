//! Cart items.

use crate::error::CommerceError;
use crate::money::Money;
use serde::Serialize;

/// A named product line with a unit price and quantity.
///
/// Fields are private so every mutation goes through validation:
/// the name is never blank, the price and quantity are always positive.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Item {
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl Item {
    /// Create a new item.
    pub fn new(
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CommerceError::InvalidName(name));
        }
        validate_price(&unit_price)?;
        validate_quantity(quantity)?;
        Ok(Self {
            name,
            unit_price,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Set the unit price. The item is unchanged on error.
    pub fn set_price(&mut self, price: Money) -> Result<(), CommerceError> {
        validate_price(&price)?;
        self.unit_price = price;
        Ok(())
    }

    /// Set the quantity. The item is unchanged on error.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.unit_price.try_multiply(self.quantity)
    }
}

/// Fields to change on an existing item. `None` leaves a field as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub quantity: Option<i64>,
    pub price: Option<Money>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// True if the update would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }

    /// Check every provided field without applying anything.
    pub(crate) fn validate(&self) -> Result<(), CommerceError> {
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = &self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_price(price: &Money) -> Result<(), CommerceError> {
    if !price.is_positive() {
        return Err(CommerceError::InvalidPrice(*price));
    }
    Ok(())
}

pub(crate) fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    Ok(())
}
