//! Order processing and customer notification emails.

use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Address order emails are sent from.
pub const SALES_SENDER: &str = "sales@webshop.com";

/// How the order is fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    Online,
    InStore,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Online => "online",
            OrderType::InStore => "in store",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    InProgress,
    Confirmed,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
        }
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    pub customer_email: String,
    pub status: OrderStatus,
}

impl Order {
    /// Create an order in the `InProgress` state.
    pub fn new(
        id: impl Into<OrderId>,
        order_type: OrderType,
        customer_email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            order_type,
            customer_email: customer_email.into(),
            status: OrderStatus::default(),
        }
    }
}

/// An outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub subject: String,
    pub body: String,
    pub recipient: String,
    pub sender: String,
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "From: {}", self.sender)?;
        writeln!(f, "To: {}", self.recipient)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

/// Sum the prices and take `discount_rate` (a fraction, `0.1` = 10%) off.
pub fn calculate_price<'a>(
    prices: impl IntoIterator<Item = &'a Money>,
    currency: Currency,
    discount_rate: Decimal,
) -> Result<Money, CommerceError> {
    if discount_rate < Decimal::ZERO || discount_rate > Decimal::ONE {
        return Err(CommerceError::InvalidDiscount(format!(
            "rate {} is outside [0, 1]",
            discount_rate
        )));
    }
    let total = Money::try_sum(prices.into_iter(), currency)?;
    total.try_subtract(&total.try_multiply_decimal(discount_rate)?)
}

/// Build the customer notification for the order's current status.
pub fn generate_order_email(order: &Order) -> Email {
    let (subject, body) = match order.status {
        OrderStatus::Confirmed => (
            "Order Confirmation",
            format!(
                "Thank you for your order! Your order #{} has been confirmed.",
                order.id
            ),
        ),
        OrderStatus::InProgress | OrderStatus::Shipped => (
            "Order Shipped",
            format!(
                "Good news! Your order #{} has been shipped and is on its way.",
                order.id
            ),
        ),
    };
    Email {
        subject: subject.to_string(),
        body,
        recipient: order.customer_email.clone(),
        sender: SALES_SENDER.to_string(),
    }
}

/// Advance the order and return the email to send.
///
/// Online orders are shipped to the customer and become `Confirmed`;
/// in-store orders are ready for pickup and become `Shipped`.
pub fn process_order(order: &mut Order) -> Email {
    info!(order = %order.id, order_type = %order.order_type, "processing order");
    order.status = match order.order_type {
        OrderType::Online => OrderStatus::Confirmed,
        OrderType::InStore => OrderStatus::Shipped,
    };
    let email = generate_order_email(order);
    info!(order = %order.id, status = order.status.as_str(), "order processed");
    email
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_calculate_price() {
        let prices = [usd(1999), usd(4999), usd(7999)];
        let total = calculate_price(&prices, Currency::USD, Decimal::ZERO).unwrap();
        assert_eq!(total, usd(14997));

        // 149.97 - 15.00 (14.997 rounded)
        let discounted = calculate_price(&prices, Currency::USD, Decimal::new(1, 1)).unwrap();
        assert_eq!(discounted, usd(13497));

        assert!(calculate_price(&prices, Currency::USD, Decimal::TWO).is_err());
    }

    #[test]
    fn test_process_online_order() {
        let mut order = Order::new("123", OrderType::Online, "sarah@gmail.com");
        assert_eq!(order.status, OrderStatus::InProgress);

        let email = process_order(&mut order);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(email.subject, "Order Confirmation");
        assert_eq!(
            email.body,
            "Thank you for your order! Your order #123 has been confirmed."
        );
        assert_eq!(email.recipient, "sarah@gmail.com");
        assert_eq!(email.sender, SALES_SENDER);
    }

    #[test]
    fn test_process_in_store_order() {
        let mut order = Order::new("456", OrderType::InStore, "john@gmail.com");
        let email = process_order(&mut order);
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(email.subject, "Order Shipped");
        assert!(email.body.contains("#456 has been shipped"));
    }

    #[test]
    fn test_email_display() {
        let order = Order::new("7", OrderType::Online, "a@b.c");
        let rendered = generate_order_email(&order).to_string();
        assert!(rendered.starts_with("From: sales@webshop.com\nTo: a@b.c\nSubject: Order Shipped\n\n"));
    }
}
