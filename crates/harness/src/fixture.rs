//! Per-test browser provisioning.
//!
//! A [`TestContext`] owns one browser session for one test case. The
//! authenticated variant only yields once the login round-trip has been
//! verified, so no case ever observes a half-authenticated session.

use std::sync::Arc;

use crate::browser::Session;
use crate::driver::PageDriver;
use crate::error::{HarnessError, HarnessResult};
use crate::pages::{
    DashboardPage, LoginPage, PortfolioPage, TradeHistoryPage, TradingPage, WatchlistPage,
};
use crate::settings::Settings;
use crate::testdata;

pub struct TestContext {
    session: Session,
    driver: PageDriver,
    settings: Arc<Settings>,
}

impl TestContext {
    /// Fresh, unauthenticated browser session.
    pub async fn new(settings: Arc<Settings>) -> HarnessResult<Self> {
        let session = Session::launch(Arc::clone(&settings)).await?;
        let driver = PageDriver::new(session.page().clone(), Arc::clone(&settings));
        Ok(Self {
            session,
            driver,
            settings,
        })
    }

    /// Session logged in as the primary test user. A failed login fails
    /// the fixture, not the test body.
    pub async fn authenticated(settings: Arc<Settings>) -> HarnessResult<Self> {
        let ctx = Self::new(settings).await?;
        let login = ctx.login_page();
        login
            .navigate()
            .await
            .map_err(|e| HarnessError::Fixture(format!("login page unavailable: {e}")))?;
        login
            .login(&testdata::primary_user())
            .await
            .map_err(|e| HarnessError::Fixture(format!("login failed: {e}")))?;
        ctx.dashboard_page()
            .expect_logged_in()
            .await
            .map_err(|e| HarnessError::Fixture(format!("session not authenticated: {e}")))?;
        Ok(ctx)
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn driver(&self) -> &PageDriver {
        &self.driver
    }

    // Page object accessors, all sharing the one driver.

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(&self.driver)
    }

    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(&self.driver)
    }

    pub fn trading_page(&self) -> TradingPage {
        TradingPage::new(&self.driver)
    }

    pub fn portfolio_page(&self) -> PortfolioPage {
        PortfolioPage::new(&self.driver)
    }

    pub fn watchlist_page(&self) -> WatchlistPage {
        WatchlistPage::new(&self.driver)
    }

    pub fn trade_history_page(&self) -> TradeHistoryPage {
        TradeHistoryPage::new(&self.driver)
    }

    /// Release the browser. Called by the runner on every exit path.
    pub async fn teardown(self) {
        self.session.close().await;
    }
}
