//! Watchlists page object.

use std::time::{Duration, Instant};

use crate::dom::Locator;
use crate::driver::{ElementState, PageDriver};
use crate::error::{HarnessError, HarnessResult};

/// Result of a watchlist mutation submitted through the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistOutcome {
    Completed,
    /// The application refused the change (e.g. duplicate stock).
    Rejected(String),
}

impl WatchlistOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WatchlistOutcome::Completed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, WatchlistOutcome::Rejected(_))
    }
}

pub struct WatchlistPage {
    driver: PageDriver,
    url: String,
}

impl WatchlistPage {
    pub fn new(driver: &PageDriver) -> Self {
        Self {
            url: driver.settings().watchlists_url(),
            driver: driver.clone(),
        }
    }

    fn header() -> Locator {
        Locator::text("watchlist")
    }

    fn create_button() -> Locator {
        Locator::button_any(&["create", "new watchlist"])
    }

    fn name_input() -> Locator {
        Locator::css(r#"input[type="text"], input[placeholder*="name" i]"#)
    }

    fn save_button() -> Locator {
        Locator::button_any(&["save", "create"])
    }

    fn add_stock_button() -> Locator {
        Locator::button_any(&["add stock", "add"])
    }

    fn symbol_input() -> Locator {
        Locator::css(r#"input[placeholder*="symbol" i], input[placeholder*="stock" i]"#)
    }

    fn watchlist_items() -> Locator {
        Locator::css(r#"[data-testid="watchlist-item"], .watchlist-item"#)
    }

    fn error_message() -> Locator {
        Locator::text_any(&["error", "failed", "already exists", "duplicate"])
    }

    pub async fn navigate(&self) -> HarnessResult<()> {
        self.driver.goto(&self.url).await?;
        self.driver.wait_for_url("/watchlists").await?;
        self.driver.expect_visible(&Self::header()).await
    }

    pub async fn reload(&self) -> HarnessResult<()> {
        self.driver.reload().await
    }

    pub async fn watchlist_count(&self) -> HarnessResult<usize> {
        self.driver.element_count(&Self::watchlist_items()).await
    }

    pub async fn watchlist_displayed(&self, name: &str) -> HarnessResult<bool> {
        self.driver.is_visible(&Locator::text(name)).await
    }

    pub async fn stock_listed(&self, symbol: &str) -> HarnessResult<bool> {
        self.driver.is_visible(&Locator::text(symbol)).await
    }

    /// Create a watchlist and wait until it shows up (or is rejected).
    pub async fn create_watchlist(&self, name: &str) -> HarnessResult<WatchlistOutcome> {
        self.driver.click(&Self::create_button()).await?;
        self.driver.fill(&Self::name_input(), name).await?;
        self.driver.click(&Self::save_button()).await?;
        self.await_outcome(|| self.watchlist_displayed(name)).await
    }

    /// Open the create form and submit it without a name. The caller
    /// asserts that no watchlist appeared.
    pub async fn submit_create_with_empty_name(&self) -> HarnessResult<()> {
        self.driver.click(&Self::create_button()).await?;
        self.driver.fill(&Self::name_input(), "").await?;
        self.driver.click(&Self::save_button()).await
    }

    /// Add a stock to the (first) watchlist; duplicates come back Rejected.
    pub async fn add_stock(&self, symbol: &str) -> HarnessResult<WatchlistOutcome> {
        self.driver.click(&Self::add_stock_button()).await?;
        self.driver.fill(&Self::symbol_input(), symbol).await?;
        self.driver.click(&Self::save_button()).await?;
        self.await_outcome(|| self.stock_listed(symbol)).await
    }

    pub async fn remove_stock(&self, symbol: &str) -> HarnessResult<()> {
        self.driver
            .click(&Locator::near_button_any(symbol, &["remove", "delete"]))
            .await?;
        self.driver
            .wait_for_element(&Locator::text(symbol), ElementState::Hidden)
            .await
    }

    pub async fn delete_watchlist(&self, name: &str) -> HarnessResult<()> {
        self.driver
            .click(&Locator::near_button(name, "delete"))
            .await?;
        self.driver
            .wait_for_element(&Locator::text(name), ElementState::Hidden)
            .await
    }

    /// Poll for the expected post-condition, treating a surfaced error
    /// state as a rejection rather than a timeout.
    async fn await_outcome<F, Fut>(&self, mut succeeded: F) -> HarnessResult<WatchlistOutcome>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = HarnessResult<bool>>,
    {
        let start = Instant::now();
        loop {
            if self.driver.is_visible(&Self::error_message()).await? {
                let message = self
                    .driver
                    .get_text(&Self::error_message())
                    .await?
                    .unwrap_or_else(|| "watchlist change rejected".to_string());
                return Ok(WatchlistOutcome::Rejected(message));
            }
            if succeeded().await? {
                return Ok(WatchlistOutcome::Completed);
            }
            if start.elapsed() >= self.driver.timeout() {
                return Err(HarnessError::Timeout {
                    what: "watchlist change confirmation or rejection".to_string(),
                    ms: self.driver.timeout().as_millis() as u64,
                });
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    // Assertions

    pub async fn expect_loaded(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::header()).await?;
        self.driver.expect_url("/watchlists").await
    }

    pub async fn expect_create_button_visible(&self) -> HarnessResult<()> {
        self.driver.expect_visible(&Self::create_button()).await
    }

    pub async fn expect_watchlist_displayed(&self, name: &str) -> HarnessResult<()> {
        self.driver.expect_visible(&Locator::text(name)).await
    }

    pub async fn expect_stock_listed(&self, symbol: &str) -> HarnessResult<()> {
        self.driver.expect_visible(&Locator::text(symbol)).await
    }
}
