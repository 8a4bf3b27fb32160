//! Authentication scenarios: login, logout, registration navigation,
//! and route protection.

use papertrade_harness::testdata;
use papertrade_harness::{HarnessError, HarnessResult, TestCase, TestContext};

use super::case;

pub fn cases() -> Vec<TestCase> {
    vec![
        case!(login_page_loads, Fresh, [Auth, Smoke]),
        case!(login_with_valid_credentials, Fresh, [Auth, Smoke]),
        case!(login_with_invalid_email, Fresh, [Auth]),
        case!(login_with_invalid_password, Fresh, [Auth]),
        case!(empty_submit_stays_on_login, Fresh, [Auth]),
        case!(login_works_for_every_seeded_user, Fresh, [Auth, Regression]),
        case!(logout_returns_to_login, Authenticated, [Auth, Smoke]),
        case!(logout_clears_stored_session, Authenticated, [Auth, Regression]),
        case!(register_page_loads, Fresh, [Auth]),
        case!(login_register_round_trip, Fresh, [Auth]),
        case!(protected_routes_redirect_to_login, Fresh, [Auth, Regression]),
        case!(authenticated_user_reaches_every_page, Authenticated, [Auth, Regression]),
    ]
}

async fn login_page_loads(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login.expect_loaded().await
}

async fn login_with_valid_credentials(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login.login(&testdata::primary_user()).await?;
    ctx.dashboard_page().expect_logged_in().await
}

async fn login_with_invalid_email(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login
        .login_expecting_failure(&testdata::invalid_user().email, "password123")
        .await
}

async fn login_with_invalid_password(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login
        .login_expecting_failure(&testdata::primary_user().email, "wrongpassword")
        .await
}

async fn empty_submit_stays_on_login(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login.submit_empty().await?;
    login.expect_on_login_page().await?;
    login.expect_loaded().await
}

/// Each seeded user can log in and out within one browser.
async fn login_works_for_every_seeded_user(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    let dashboard = ctx.dashboard_page();
    for user in testdata::all_users() {
        login.navigate().await?;
        login.login(&user).await?;
        dashboard.expect_logged_in().await?;
        dashboard.logout().await?;
    }
    Ok(())
}

async fn logout_returns_to_login(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.logout().await?;
    ctx.login_page().expect_loaded().await
}

async fn logout_clears_stored_session(ctx: &TestContext) -> HarnessResult<()> {
    let dashboard = ctx.dashboard_page();
    dashboard.navigate().await?;
    dashboard.logout().await?;
    for key in ["token", "user"] {
        if let Some(value) = dashboard.get_local_storage_item(key).await? {
            return Err(HarnessError::Assertion(format!(
                "localStorage `{key}` still set after logout: {value}"
            )));
        }
    }
    Ok(())
}

async fn register_page_loads(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login.goto_register().await?;
    login.expect_register_form().await
}

async fn login_register_round_trip(ctx: &TestContext) -> HarnessResult<()> {
    let login = ctx.login_page();
    login.navigate().await?;
    login.goto_register().await?;
    login.back_to_login().await?;
    login.expect_loaded().await
}

/// Every app page must bounce an unauthenticated visitor to `/login`.
async fn protected_routes_redirect_to_login(ctx: &TestContext) -> HarnessResult<()> {
    let settings = ctx.settings();
    let routes = [
        settings.dashboard_url(),
        settings.trading_url(),
        settings.portfolio_url(),
        settings.watchlists_url(),
        settings.trades_url(),
    ];
    for url in routes {
        ctx.driver().goto(&url).await?;
        ctx.driver().wait_for_url("/login").await.map_err(|e| {
            HarnessError::Assertion(format!("{url} did not redirect to /login: {e}"))
        })?;
    }
    Ok(())
}

async fn authenticated_user_reaches_every_page(ctx: &TestContext) -> HarnessResult<()> {
    ctx.dashboard_page().navigate().await?;
    ctx.dashboard_page().expect_loaded().await?;
    ctx.trading_page().navigate().await?;
    ctx.portfolio_page().navigate().await?;
    ctx.watchlist_page().navigate().await?;
    ctx.trade_history_page().navigate().await?;
    Ok(())
}
