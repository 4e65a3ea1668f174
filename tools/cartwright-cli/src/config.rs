//! CLI configuration.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use cartwright_commerce::bank::{Account, AccountKind};
use cartwright_commerce::cart::{Cart, Discount, DiscountCatalog, Item};
use cartwright_commerce::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Currency for the cart, discounts and accounts.
    #[serde(default)]
    pub currency: Currency,

    /// Items the cart starts with.
    #[serde(default = "default_items")]
    pub items: Vec<ItemConfig>,

    /// Extra or overriding discount codes, on top of the stock table.
    #[serde(default)]
    pub discounts: BTreeMap<String, DiscountConfig>,

    /// Payment provider settings.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Bank demo settings.
    #[serde(default)]
    pub bank: BankConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            items: default_items(),
            discounts: BTreeMap::new(),
            payment: PaymentConfig::default(),
            bank: BankConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Build the starting cart.
    pub fn cart(&self) -> Result<Cart> {
        let items = self
            .items
            .iter()
            .map(|item| item.to_item(self.currency))
            .collect::<Result<Vec<_>>>()?;
        Ok(Cart::with_items(self.currency, items)?)
    }

    /// The stock discount table with configured codes merged in.
    pub fn discount_catalog(&self) -> Result<DiscountCatalog> {
        let mut catalog = DiscountCatalog::standard(self.currency);
        for (code, discount) in &self.discounts {
            let fixed = Money::from_decimal(discount.fixed, self.currency)?;
            let discount = Discount::new(code.as_str(), fixed, discount.percentage)
                .with_context(|| format!("Invalid discount '{}'", code))?;
            catalog.insert(discount)?;
        }
        Ok(catalog)
    }

    /// Accounts for the bank demo.
    pub fn accounts(&self) -> Result<Vec<Account>> {
        self.bank
            .accounts
            .iter()
            .map(|account| {
                let balance = Money::from_decimal(account.balance, self.currency)
                    .with_context(|| format!("Invalid balance for account {}", account.id))?;
                Ok(Account::new(account.id.as_str(), account.kind, balance))
            })
            .collect()
    }
}

/// An item line in the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl ItemConfig {
    fn new(name: &str, price: Decimal, quantity: i64) -> Self {
        Self {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    fn to_item(&self, currency: Currency) -> Result<Item> {
        let price = Money::from_decimal(self.price, currency)?;
        Item::new(self.name.as_str(), price, self.quantity)
            .with_context(|| format!("Invalid item '{}'", self.name))
    }
}

fn default_items() -> Vec<ItemConfig> {
    vec![
        ItemConfig::new("Apple", Decimal::new(150, 2), 10),
        ItemConfig::new("Banana", Decimal::new(200, 2), 2),
        ItemConfig::new("Pizza", Decimal::new(1190, 2), 5),
    ]
}

/// A discount code definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Fixed amount off.
    #[serde(default)]
    pub fixed: Decimal,

    /// Fraction of the subtotal off, between 0 and 1.
    #[serde(default)]
    pub percentage: Decimal,
}

/// Payment provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// API key handed to the selected provider.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Bank demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            accounts: vec![
                AccountConfig {
                    id: "SA001".to_string(),
                    kind: AccountKind::Savings,
                    balance: Decimal::from(1000),
                },
                AccountConfig {
                    id: "CA001".to_string(),
                    kind: AccountKind::Checking,
                    balance: Decimal::from(500),
                },
            ],
        }
    }
}

/// A bank account definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    pub kind: AccountKind,
    pub balance: Decimal,
}

/// Generate a default config file.
pub fn generate_default_config() -> String {
    r#"# Cartwright configuration

currency = "USD"

[[items]]
name = "Apple"
price = "1.50"
quantity = 10

[[items]]
name = "Banana"
price = "2.00"
quantity = 2

[[items]]
name = "Pizza"
price = "11.90"
quantity = 5

# Codes here are added to (or replace) SAVE10, 5BUCKSOFF, FREESHIPPING and BLKFRIDAY.
[discounts.WELCOME]
fixed = "3.00"
percentage = "0.05"

[payment]
# api_key = "sk_test_1234567890"

[[bank.accounts]]
id = "SA001"
kind = "savings"
balance = "1000"

[[bank.accounts]]
id = "CA001"
kind = "checking"
balance = "500"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.items.len(), 3);
        assert_eq!(config.bank.accounts.len(), 2);

        let catalog = config.discount_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.contains("WELCOME"));
    }

    #[test]
    fn test_missing_sections_default() {
        let config: CliConfig = toml::from_str("currency = \"EUR\"").unwrap();
        let cart = config.cart().unwrap();
        assert_eq!(cart.currency(), Currency::EUR);
        assert_eq!(cart.len(), 3);
        assert_eq!(config.accounts().unwrap().len(), 2);
        assert!(config.payment.api_key.is_none());
    }

    #[test]
    fn test_invalid_item_rejected() {
        let config: CliConfig = toml::from_str(
            r#"
            [[items]]
            name = "Broken"
            price = "0"
            quantity = 1
            "#,
        )
        .unwrap();
        let err = config.cart().unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid item 'Broken'"));
    }

    #[test]
    fn test_out_of_range_discount_rejected() {
        let config: CliConfig = toml::from_str(
            r#"
            [discounts.TOOMUCH]
            percentage = "1.5"
            "#,
        )
        .unwrap();
        assert!(config.discount_catalog().is_err());
    }

    #[test]
    fn test_json_config() {
        let config: CliConfig =
            serde_json::from_str(r#"{"items": [{"name": "Tea", "price": "3.25", "quantity": 4}]}"#)
                .unwrap();
        let cart = config.cart().unwrap();
        assert_eq!(cart.subtotal().unwrap(), Money::new(1300, Currency::USD));
    }
}
