//! Suite result artifact.
//!
//! One self-contained JSON document per run, written into the configured
//! report directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::HarnessResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn new(started_at: DateTime<Utc>, duration_ms: u64, results: Vec<CaseOutcome>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            started_at,
            duration_ms,
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Write the report as pretty JSON, named after the start timestamp.
    pub fn write(&self, dir: &Path) -> HarnessResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "run-{}.json",
            self.started_at.format("%Y%m%d-%H%M%S")
        ));
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        info!("report written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, passed: bool) -> CaseOutcome {
        CaseOutcome {
            name: name.to_string(),
            passed,
            duration_ms: 42,
            error: if passed { None } else { Some("boom".into()) },
            screenshot: None,
        }
    }

    #[test]
    fn counts_are_derived_from_results() {
        let report = SuiteReport::new(
            Utc::now(),
            1234,
            vec![outcome("a", true), outcome("b", false), outcome("c", true)],
        );
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn report_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let report = SuiteReport::new(Utc::now(), 10, vec![outcome("only", true)]);

        let path = report.write(dir.path()).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        let loaded: SuiteReport = serde_json::from_str(&raw).unwrap();

        assert_eq!(loaded.total, 1);
        assert_eq!(loaded.results[0].name, "only");
        assert!(loaded.all_passed());
    }
}
