//! Scenario suite for the paper trading application.
//!
//! Each module under [`cases`] covers one functional area and exposes a
//! `cases()` registry; [`all_cases`] concatenates them in a stable order.

use clap::ValueEnum;
use papertrade_harness::runner::Tag;
use papertrade_harness::TestCase;

pub mod cases;

/// CLI-selectable slice of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Category {
    /// Every case, sequentially by default.
    All,
    Smoke,
    Auth,
    Trading,
    Portfolio,
    Watchlist,
    Dashboard,
    Regression,
    /// Every case, executed across multiple browsers.
    Parallel,
}

impl Category {
    /// The tag this category filters on, if it filters at all.
    pub fn tag(self) -> Option<Tag> {
        match self {
            Category::All | Category::Parallel => None,
            Category::Smoke => Some(Tag::Smoke),
            Category::Auth => Some(Tag::Auth),
            Category::Trading => Some(Tag::Trading),
            Category::Portfolio => Some(Tag::Portfolio),
            Category::Watchlist => Some(Tag::Watchlist),
            Category::Dashboard => Some(Tag::Dashboard),
            Category::Regression => Some(Tag::Regression),
        }
    }

    pub fn is_parallel(self) -> bool {
        matches!(self, Category::Parallel)
    }
}

/// The full suite in execution order.
pub fn all_cases() -> Vec<TestCase> {
    let mut cases = Vec::new();
    cases.extend(cases::auth::cases());
    cases.extend(cases::dashboard::cases());
    cases.extend(cases::trading::cases());
    cases.extend(cases::portfolio::cases());
    cases.extend(cases::watchlists::cases());
    cases.extend(cases::trade_history::cases());
    cases
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn case_names_are_unique() {
        let mut seen = HashSet::new();
        for case in all_cases() {
            assert!(seen.insert(case.name), "duplicate case name: {}", case.name);
        }
    }

    #[test]
    fn every_case_carries_a_tag() {
        for case in all_cases() {
            assert!(!case.tags.is_empty(), "untagged case: {}", case.name);
        }
    }

    #[test]
    fn every_category_selects_something() {
        let categories = [
            Category::Smoke,
            Category::Auth,
            Category::Trading,
            Category::Portfolio,
            Category::Watchlist,
            Category::Dashboard,
            Category::Regression,
        ];
        for category in categories {
            let tag = category.tag().unwrap();
            assert!(
                all_cases().iter().any(|c| c.has_tag(tag)),
                "no cases tagged {tag:?}"
            );
        }
    }

    #[test]
    fn all_and_parallel_select_the_full_suite() {
        assert_eq!(Category::All.tag(), None);
        assert_eq!(Category::Parallel.tag(), None);
        assert!(Category::Parallel.is_parallel());
        assert!(!Category::All.is_parallel());
    }
}
