//! Dashboard scenarios: summary widgets and navigation.

use papertrade_harness::{HarnessResult, TestCase, TestContext};

use super::case;

pub fn cases() -> Vec<TestCase> {
    vec![
        case!(dashboard_loads, Authenticated, [Dashboard, Smoke]),
        case!(portfolio_summary_displayed, Authenticated, [Dashboard, Smoke]),
        case!(navigation_visible, Authenticated, [Dashboard]),
        case!(navigate_to_trading, Authenticated, [Dashboard]),
        case!(navigate_to_portfolio, Authenticated, [Dashboard]),
        case!(navigate_to_watchlists, Authenticated, [Dashboard]),
        case!(navigate_to_trade_history, Authenticated, [Dashboard]),
    ]
}

async fn dashboard_loads(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.expect_loaded().await
}

async fn portfolio_summary_displayed(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.expect_portfolio_summary_visible().await
}

async fn navigation_visible(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.expect_navigation_visible().await
}

async fn navigate_to_trading(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.goto_trading().await?;
    ctx.trading_page().expect_loaded().await
}

async fn navigate_to_portfolio(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.goto_portfolio().await?;
    ctx.portfolio_page().expect_loaded().await
}

async fn navigate_to_watchlists(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.goto_watchlists().await?;
    ctx.watchlist_page().expect_loaded().await
}

async fn navigate_to_trade_history(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.goto_trades().await?;
    ctx.trade_history_page().expect_loaded().await
}
