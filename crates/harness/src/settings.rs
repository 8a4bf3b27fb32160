//! Process-wide test settings resolved once at startup.
//!
//! Settings are constructed explicitly and passed into fixtures and page
//! objects; nothing in the harness reads the environment after startup.

use std::sync::Arc;
use std::time::Duration;

/// Immutable snapshot of the harness configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// UI origin of the application under test.
    pub base_url: String,
    /// API origin, used only by the preflight health probe.
    pub api_url: String,

    pub headless: bool,
    /// Delay applied after each browser interaction, in milliseconds.
    pub slow_mo: u64,
    /// Default wait budget for navigation and element waits, in milliseconds.
    pub timeout: u64,

    pub viewport_width: u32,
    pub viewport_height: u32,

    pub report_dir: String,
    pub screenshot_dir: String,
}

impl Settings {
    /// Load settings from the process environment, reading an optional
    /// `.env.test` file first. Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.test");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary lookup. Keeps unit tests hermetic.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:5173".to_string()),
            api_url: lookup("API_URL").unwrap_or_else(|| "http://localhost:5001/api".to_string()),
            headless: lookup("HEADLESS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            slow_mo: parse_or(lookup("SLOW_MO"), 0),
            timeout: parse_or(lookup("TIMEOUT"), 30_000),
            viewport_width: parse_or(lookup("VIEWPORT_WIDTH"), 1920),
            viewport_height: parse_or(lookup("VIEWPORT_HEIGHT"), 1080),
            report_dir: lookup("REPORT_DIR").unwrap_or_else(|| "reports".to_string()),
            screenshot_dir: lookup("SCREENSHOT_DIR")
                .unwrap_or_else(|| "reports/screenshots".to_string()),
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    pub fn slow_mo_duration(&self) -> Duration {
        Duration::from_millis(self.slow_mo)
    }

    pub fn into_shared(self) -> Arc<Settings> {
        Arc::new(self)
    }

    // Derived page URLs.

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    pub fn register_url(&self) -> String {
        format!("{}/register", self.base_url)
    }

    pub fn dashboard_url(&self) -> String {
        format!("{}/dashboard", self.base_url)
    }

    pub fn trading_url(&self) -> String {
        format!("{}/trading", self.base_url)
    }

    pub fn portfolio_url(&self) -> String {
        format!("{}/portfolio", self.base_url)
    }

    pub fn watchlists_url(&self) -> String {
        format!("{}/watchlists", self.base_url)
    }

    pub fn trades_url(&self) -> String {
        format!("{}/trades", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_url)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let settings = settings_from(&[]);
        assert_eq!(settings.base_url, "http://localhost:5173");
        assert_eq!(settings.api_url, "http://localhost:5001/api");
        assert!(settings.headless);
        assert_eq!(settings.timeout, 30_000);
        assert_eq!(settings.viewport_width, 1920);
        assert_eq!(settings.viewport_height, 1080);
        assert_eq!(settings.report_dir, "reports");
    }

    #[test]
    fn env_values_override_defaults() {
        let settings = settings_from(&[
            ("BASE_URL", "http://10.0.0.5:3000"),
            ("HEADLESS", "false"),
            ("TIMEOUT", "5000"),
            ("SLOW_MO", "250"),
        ]);
        assert_eq!(settings.base_url, "http://10.0.0.5:3000");
        assert!(!settings.headless);
        assert_eq!(settings.timeout, 5000);
        assert_eq!(settings.slow_mo, 250);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let settings = settings_from(&[("TIMEOUT", "not-a-number"), ("VIEWPORT_WIDTH", "")]);
        assert_eq!(settings.timeout, 30_000);
        assert_eq!(settings.viewport_width, 1920);
    }

    #[test]
    fn derived_urls_are_rooted_at_base_url() {
        let settings = settings_from(&[("BASE_URL", "http://app.test:5173")]);
        assert_eq!(settings.login_url(), "http://app.test:5173/login");
        assert_eq!(settings.dashboard_url(), "http://app.test:5173/dashboard");
        assert_eq!(settings.trading_url(), "http://app.test:5173/trading");
        assert_eq!(settings.portfolio_url(), "http://app.test:5173/portfolio");
        assert_eq!(settings.watchlists_url(), "http://app.test:5173/watchlists");
        assert_eq!(settings.trades_url(), "http://app.test:5173/trades");
        assert_eq!(settings.register_url(), "http://app.test:5173/register");
    }

    #[test]
    fn health_url_is_rooted_at_api_url() {
        let settings = settings_from(&[("API_URL", "http://app.test:5001/api")]);
        assert_eq!(settings.health_url(), "http://app.test:5001/api/health");
    }
}
