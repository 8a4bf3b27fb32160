//! Static catalog of named fixtures consumed by tests.
//!
//! The application under test must be seeded with these users before a run;
//! the harness only verifies reachability (see `preflight`), it never seeds.

use crate::models::User;

/// Stock symbols known to exist in the application's market data.
pub const STOCK_SYMBOLS: &[&str] = &["AAPL", "GOOGL", "MSFT", "TSLA", "NVDA", "AMZN", "META"];

pub const DEFAULT_TRADE_QUANTITY: u32 = 10;
pub const LARGE_TRADE_QUANTITY: u32 = 100;
pub const SMALL_TRADE_QUANTITY: u32 = 1;

fn user(email: &str, password: &str, name: &str) -> User {
    User {
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
    }
}

pub fn primary_user() -> User {
    user("john@example.com", "password123", "John Doe")
}

pub fn secondary_user() -> User {
    user("jane@example.com", "password123", "Jane Smith")
}

pub fn tertiary_user() -> User {
    user("bob@example.com", "password123", "Bob Johnson")
}

pub fn all_users() -> Vec<User> {
    vec![primary_user(), secondary_user(), tertiary_user()]
}

/// Credentials that must not authenticate, for negative tests.
pub fn invalid_user() -> User {
    user("invalid@example.com", "wrongpassword", "Invalid User")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_users_pass_model_validation() {
        for candidate in all_users() {
            assert!(
                User::new(candidate.email.clone(), candidate.password.clone(), candidate.name)
                    .is_ok()
            );
        }
    }

    #[test]
    fn invalid_user_is_not_a_catalog_user() {
        let bad = invalid_user();
        assert!(all_users().iter().all(|u| u.email != bad.email));
    }

    #[test]
    fn symbols_are_upper_case_tickers() {
        assert!(!STOCK_SYMBOLS.is_empty());
        for sym in STOCK_SYMBOLS {
            assert!(sym.chars().all(|c| c.is_ascii_uppercase()));
        }
    }
}
