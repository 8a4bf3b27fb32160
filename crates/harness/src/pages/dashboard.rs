//! Dashboard page object.

use crate::dom::Locator;
use crate::driver::{extract_number_from_text, PageDriver};
use crate::error::HarnessResult;

pub struct DashboardPage {
    driver: PageDriver,
    url: String,
}

impl DashboardPage {
    pub fn new(driver: &PageDriver) -> Self {
        Self {
            url: driver.settings().dashboard_url(),
            driver: driver.clone(),
        }
    }

    fn header() -> Locator {
        Locator::text("dashboard")
    }

    fn logout_button() -> Locator {
        Locator::button("logout")
    }

    // Named *_locator to stay clear of the accessor methods below;
    // associated fns and methods share one namespace.
    fn portfolio_value_locator() -> Locator {
        Locator::text_any(&["portfolio value", "total value"])
    }

    fn cash_balance_locator() -> Locator {
        Locator::text_any(&["cash balance", "available cash"])
    }

    fn navigation() -> Locator {
        Locator::css("nav")
    }

    fn trading_link() -> Locator {
        Locator::link_any(&["trading", "trade stocks"])
    }

    fn portfolio_link() -> Locator {
        Locator::link("portfolio")
    }

    fn watchlists_link() -> Locator {
        Locator::link("watchlist")
    }

    fn trades_link() -> Locator {
        Locator::link_any(&["trade history", "trades"])
    }

    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.url).await?;
        self.driver.wait_for_url("/dashboard").await
    }

    pub async fn logout(&self) -> HarnessResult<()> {
        self.driver.click(&Self::logout_button()).await?;
        self.driver.wait_for_url("/login").await
    }

    pub async fn is_logged_in(&self) -> HarnessResult<bool> {
        self.driver.is_visible(&Self::logout_button()).await
    }

    // Nav links

    pub async fn goto_trading(&self) -> HarnessResult<()> {
        self.driver.click(&Self::trading_link()).await?;
        self.driver.wait_for_url("/trading").await
    }

    pub async fn goto_portfolio(&self) -> HarnessResult<()> {
        self.driver.click(&Self::portfolio_link()).await?;
        self.driver.wait_for_url("/portfolio").await
    }

    pub async fn goto_watchlists(&self) -> HarnessResult<()> {
        self.driver.click(&Self::watchlists_link()).await?;
        self.driver.wait_for_url("/watchlists").await
    }

    pub async fn goto_trades(&self) -> HarnessResult<()> {
        self.driver.click(&Self::trades_link()).await?;
        self.driver.wait_for_url("/trades").await
    }

    // Portfolio metrics

    pub async fn portfolio_summary_displayed(&self) -> HarnessResult<bool> {
        Ok(self
            .driver
            .is_visible(&Self::portfolio_value_locator())
            .await?
            || self.driver.is_visible(&Self::cash_balance_locator()).await?)
    }

    pub async fn portfolio_value(&self) -> HarnessResult<Option<f64>> {
        let text = self
            .driver
            .get_text(&Self::portfolio_value_locator())
            .await?;
        Ok(text.as_deref().and_then(extract_number_from_text))
    }

    pub async fn cash_balance(&self) -> HarnessResult<Option<f64>> {
        let text = self.driver.get_text(&Self::cash_balance_locator()).await?;
        Ok(text.as_deref().and_then(extract_number_from_text))
    }

    pub async fn get_local_storage_item(&self, key: &str) -> HarnessResult<Option<String>> {
        self.driver.get_local_storage_item(key).await
    }

    // Assertions

    pub async fn expect_loaded(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::header()).await?;
        self.driver.expect_visible(&Self::logout_button()).await
    }

    pub async fn expect_logged_in(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::logout_button()).await?;
        self.driver.expect_url("/dashboard").await
    }

    pub async fn expect_navigation_visible(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::navigation()).await
    }

    pub async fn expect_portfolio_summary_visible(&self) -> HarnessResult<()> {
        if self.portfolio_summary_displayed().await? {
            Ok(())
        } else {
            Err(crate::error::HarnessError::Assertion(
                "expected portfolio value or cash balance to be visible on the dashboard".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The metric locators coexist with the same-named value accessors.
    #[test]
    fn metric_locators_match_summary_labels() {
        assert_eq!(
            DashboardPage::portfolio_value_locator().to_string(),
            "text~/portfolio value|total value/i"
        );
        assert_eq!(
            DashboardPage::cash_balance_locator().to_string(),
            "text~/cash balance|available cash/i"
        );
    }
}
