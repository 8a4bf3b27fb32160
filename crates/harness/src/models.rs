//! Validated value objects used by tests and page objects.
//!
//! Construction fails fast with [`HarnessError::Validation`] so malformed
//! test data never reaches the browser.

use std::fmt;

use crate::error::{HarnessError, HarnessResult};

/// A test user of the application under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> HarnessResult<Self> {
        let email = email.into();
        let password = password.into();
        if email.is_empty() {
            return Err(HarnessError::Validation("email cannot be empty".into()));
        }
        if !email.contains('@') {
            return Err(HarnessError::Validation(format!(
                "email '{email}' is not a valid address"
            )));
        }
        if password.is_empty() {
            return Err(HarnessError::Validation("password cannot be empty".into()));
        }
        Ok(Self {
            email,
            password,
            name: name.into(),
        })
    }
}

// Password is deliberately omitted from user-visible output.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(email={}, name={})", self.email, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stock trade to execute through the trading page.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub symbol: String,
    pub quantity: u32,
    pub trade_type: TradeType,
    pub price: Option<f64>,
}

impl Trade {
    pub fn new(
        symbol: impl Into<String>,
        quantity: u32,
        trade_type: TradeType,
        price: Option<f64>,
    ) -> HarnessResult<Self> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(HarnessError::Validation("symbol cannot be empty".into()));
        }
        if quantity == 0 {
            return Err(HarnessError::Validation("quantity must be positive".into()));
        }
        if let Some(price) = price {
            if price < 0.0 {
                return Err(HarnessError::Validation(format!(
                    "price cannot be negative (got {price})"
                )));
            }
        }
        Ok(Self {
            symbol,
            quantity,
            trade_type,
            price,
        })
    }

    pub fn buy(symbol: impl Into<String>, quantity: u32) -> HarnessResult<Self> {
        Self::new(symbol, quantity, TradeType::Buy, None)
    }

    pub fn sell(symbol: impl Into<String>, quantity: u32) -> HarnessResult<Self> {
        Self::new(symbol, quantity, TradeType::Sell, None)
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.trade_type, self.quantity, self.symbol)
    }
}

/// A stock as displayed by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub symbol: String,
    pub name: Option<String>,
    pub current_price: Option<f64>,
}

impl Stock {
    pub fn new(
        symbol: impl Into<String>,
        name: Option<String>,
        current_price: Option<f64>,
    ) -> HarnessResult<Self> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(HarnessError::Validation("symbol cannot be empty".into()));
        }
        if let Some(price) = current_price {
            if price < 0.0 {
                return Err(HarnessError::Validation(format!(
                    "current price cannot be negative (got {price})"
                )));
            }
        }
        Ok(Self {
            symbol,
            name,
            current_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_requires_email_and_password() {
        assert!(User::new("", "secret", "A").is_err());
        assert!(User::new("a@b.com", "", "A").is_err());
        assert!(User::new("not-an-address", "secret", "A").is_err());
        assert!(User::new("a@b.com", "secret", "A").is_ok());
    }

    #[test]
    fn user_display_hides_password() {
        let user = User::new("john@example.com", "password123", "John Doe").unwrap();
        let shown = user.to_string();
        assert!(shown.contains("john@example.com"));
        assert!(!shown.contains("password123"));
    }

    #[test]
    fn trade_rejects_zero_quantity_and_negative_price() {
        assert!(Trade::new("AAPL", 0, TradeType::Buy, None).is_err());
        assert!(Trade::new("AAPL", 1, TradeType::Buy, Some(-0.01)).is_err());
        assert!(Trade::new("", 1, TradeType::Buy, None).is_err());

        let trade = Trade::new("AAPL", 5, TradeType::Buy, Some(100.0)).unwrap();
        assert_eq!(trade.quantity, 5);
        assert_eq!(trade.trade_type.as_str(), "BUY");
    }

    #[test]
    fn trade_shorthand_constructors() {
        assert_eq!(Trade::buy("MSFT", 3).unwrap().trade_type, TradeType::Buy);
        assert_eq!(Trade::sell("MSFT", 3).unwrap().trade_type, TradeType::Sell);
    }

    #[test]
    fn stock_requires_symbol_and_non_negative_price() {
        assert!(Stock::new("", None, None).is_err());
        assert!(Stock::new("TSLA", None, Some(-1.0)).is_err());
        assert!(Stock::new("TSLA", Some("Tesla".into()), Some(250.0)).is_ok());
    }
}
