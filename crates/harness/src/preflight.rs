//! Reachability checks run before any test executes.
//!
//! A failed preflight fails the whole run with a `Precondition` error;
//! no browser is launched and no case is attempted.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::{HarnessError, HarnessResult};
use crate::settings::Settings;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const PROBE_ATTEMPTS: usize = 5;

/// Verify the application UI and its API health endpoint respond.
pub async fn check_app_reachable(settings: &Settings) -> HarnessResult<()> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()?;

    probe(&client, &settings.health_url(), "API health endpoint").await?;
    probe(&client, &settings.base_url, "application UI").await?;

    info!(
        base_url = %settings.base_url,
        api_url = %settings.api_url,
        "preflight passed"
    );
    Ok(())
}

async fn probe(client: &reqwest::Client, url: &str, what: &str) -> HarnessResult<()> {
    let mut last_error = String::new();
    for attempt in 1..=PROBE_ATTEMPTS {
        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(url, attempt, "{what} reachable");
                return Ok(());
            }
            Ok(resp) => last_error = format!("HTTP {}", resp.status()),
            Err(e) => last_error = e.to_string(),
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    Err(HarnessError::Precondition(format!(
        "{what} not reachable at {url} after {PROBE_ATTEMPTS} attempts: {last_error}. \
         Is the application running?"
    )))
}
