//! Page objects, one per application screen.
//!
//! Each page object holds an injected [`crate::driver::PageDriver`] and
//! exposes navigation, domain actions, and assertion helpers built from the
//! driver's primitives.

mod dashboard;
mod login;
mod portfolio;
mod trade_history;
mod trading;
mod watchlist;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use portfolio::PortfolioPage;
pub use trade_history::TradeHistoryPage;
pub use trading::{TradeOutcome, TradingPage};
pub use watchlist::{WatchlistOutcome, WatchlistPage};
