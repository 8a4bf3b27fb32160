//! Watchlist scenarios: creation, stock membership, duplicate rejection,
//! and reload persistence.

use std::time::Duration;

use papertrade_harness::{HarnessError, HarnessResult, TestCase, TestContext};

use super::{case, unique_suffix};

pub fn cases() -> Vec<TestCase> {
    vec![
        case!(watchlists_page_loads, Authenticated, [Watchlist, Smoke]),
        case!(create_button_visible, Authenticated, [Watchlist]),
        case!(create_watchlist, Authenticated, [Watchlist]),
        case!(create_with_empty_name_is_rejected, Authenticated, [Watchlist]),
        case!(watchlist_crud_round_trip, Authenticated, [Watchlist, Regression]),
        case!(watchlist_persists_after_reload, Authenticated, [Watchlist, Regression]),
    ]
}

async fn watchlists_page_loads(ctx: &TestContext) -> HarnessResult<()> {
    let watchlists = ctx.watchlist_page();
    watchlists.navigate().await?;
    watchlists.expect_loaded().await
}

async fn create_button_visible(ctx: &TestContext) -> HarnessResult<()> {
    let watchlists = ctx.watchlist_page();
    watchlists.navigate().await?;
    watchlists.expect_create_button_visible().await
}

async fn create_watchlist(ctx: &TestContext) -> HarnessResult<()> {
    let watchlists = ctx.watchlist_page();
    watchlists.navigate().await?;

    let name = format!("My Stocks {}", unique_suffix());
    let outcome = watchlists.create_watchlist(&name).await?;
    if !outcome.is_completed() {
        return Err(HarnessError::Assertion(format!(
            "creating `{name}` failed: {outcome:?}"
        )));
    }
    watchlists.expect_watchlist_displayed(&name).await?;

    // Leave no residue for later cases.
    watchlists.delete_watchlist(&name).await
}

/// Submitting the create form without a name must not add a watchlist.
async fn create_with_empty_name_is_rejected(ctx: &TestContext) -> HarnessResult<()> {
    let watchlists = ctx.watchlist_page();
    watchlists.navigate().await?;

    let before = watchlists.watchlist_count().await?;
    watchlists.submit_create_with_empty_name().await?;

    // Give an over-permissive app time to render the bogus entry.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let after = watchlists.watchlist_count().await?;
    if after > before {
        Err(HarnessError::Assertion(format!(
            "an empty-named watchlist was created: {before} -> {after}"
        )))
    } else {
        Ok(())
    }
}

/// Create, add a stock, reject the duplicate add, remove, delete.
async fn watchlist_crud_round_trip(ctx: &TestContext) -> HarnessResult<()> {
    let watchlists = ctx.watchlist_page();
    watchlists.navigate().await?;

    let name = format!("Round Trip {}", unique_suffix());
    let symbol = "MSFT";

    let created = watchlists.create_watchlist(&name).await?;
    if !created.is_completed() {
        return Err(HarnessError::Assertion(format!(
            "creating `{name}` failed: {created:?}"
        )));
    }

    let added = watchlists.add_stock(symbol).await?;
    if !added.is_completed() {
        return Err(HarnessError::Assertion(format!(
            "adding {symbol} failed: {added:?}"
        )));
    }
    watchlists.expect_stock_listed(symbol).await?;

    let duplicate = watchlists.add_stock(symbol).await?;
    if !duplicate.is_rejected() {
        return Err(HarnessError::Assertion(format!(
            "duplicate add of {symbol} was not rejected: {duplicate:?}"
        )));
    }

    watchlists.remove_stock(symbol).await?;
    watchlists.delete_watchlist(&name).await?;
    if watchlists.watchlist_displayed(&name).await? {
        return Err(HarnessError::Assertion(format!(
            "`{name}` still displayed after deletion"
        )));
    }
    Ok(())
}

/// The "Tech Growth"/AAPL scenario: watchlist and its stock survive a
/// full page reload.
async fn watchlist_persists_after_reload(ctx: &TestContext) -> HarnessResult<()> {
    let watchlists = ctx.watchlist_page();
    watchlists.navigate().await?;

    let name = format!("Tech Growth {}", unique_suffix());
    let symbol = "AAPL";

    let created = watchlists.create_watchlist(&name).await?;
    if !created.is_completed() {
        return Err(HarnessError::Assertion(format!(
            "creating `{name}` failed: {created:?}"
        )));
    }
    let added = watchlists.add_stock(symbol).await?;
    if !added.is_completed() {
        return Err(HarnessError::Assertion(format!(
            "adding {symbol} failed: {added:?}"
        )));
    }

    watchlists.reload().await?;
    watchlists.expect_loaded().await?;
    watchlists.expect_watchlist_displayed(&name).await?;
    watchlists.expect_stock_listed(symbol).await?;

    watchlists.delete_watchlist(&name).await
}
