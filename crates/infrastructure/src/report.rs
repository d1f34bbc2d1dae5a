//! Run reports: the printed pass/fail matrix and `report.json`.
//!
//! `report.json` is deterministic JSON: 2-space indentation and a trailing
//! newline.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use petstore_domain::{Exchange, PetId, ScenarioReport, StepStatus};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;

/// File name of the written report.
pub const REPORT_FILE: &str = "report.json";

/// Error type for report output.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Writing the report failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Everything written to `report.json`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Session identifier of the run.
    pub pet_id: PetId,
    /// Pass/fail matrix.
    pub report: &'a ScenarioReport,
    /// Every recorded exchange, in order.
    pub exchanges: &'a [Exchange],
}

/// Serializes a value to deterministic JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Writes `report` to `dir/report.json`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub async fn write_report(dir: &Path, report: &RunReport<'_>) -> Result<PathBuf, ReportError> {
    let json = to_json_stable(report)?;
    let path = dir.join(REPORT_FILE);

    tokio::fs::create_dir_all(dir).await.map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    tokio::fs::write(&path, json).await.map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

/// Renders the pass/fail matrix, one line per step plus a summary line.
#[must_use]
pub fn render_matrix(report: &ScenarioReport) -> String {
    let width = report.steps.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.scenario);
    for step in &report.steps {
        let _ = write!(
            out,
            "  {order}. [{label}] {name:<width$}",
            order = step.order,
            label = step.status.label(),
            name = step.name,
        );
        if step.status != StepStatus::Skipped {
            let _ = write!(out, "  {:>6} ms", step.duration_ms);
        }
        out = out.trim_end().to_string();
        out.push('\n');
        if let Some(error) = &step.error {
            let _ = writeln!(out, "       {error}");
        }
    }
    let _ = writeln!(
        out,
        "{} passed, {} failed, {} skipped ({} ms)",
        report.passed, report.failed, report.skipped, report.duration_ms
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use petstore_domain::StepOutcome;
    use pretty_assertions::assert_eq;

    fn report() -> ScenarioReport {
        ScenarioReport::new(
            "pet lifecycle",
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            vec![
                StepOutcome::passed(1, "Create pet (POST /pet) -> 200", 12),
                StepOutcome::failed(2, "Get pet (GET /pet/{id}) -> 200", "read pet: Expected status = 200, got 404", 10_003),
                StepOutcome::skipped(3, "Update pet (PUT /pet) -> 200"),
            ],
            10_015,
        )
    }

    #[test]
    fn test_stable_json_format() {
        let json = to_json_stable(&serde_json::json!({"a": [1]})).unwrap();
        assert_eq!(json, "{\n  \"a\": [\n    1\n  ]\n}\n");
    }

    #[test]
    fn test_matrix_lists_every_step() {
        let matrix = render_matrix(&report());
        let lines: Vec<_> = matrix.lines().collect();

        assert_eq!(lines[0], "pet lifecycle");
        assert!(lines[1].starts_with("  1. [PASS] Create pet (POST /pet) -> 200"));
        assert!(lines[1].ends_with("12 ms"));
        assert!(lines[2].starts_with("  2. [FAIL] Get pet (GET /pet/{id}) -> 200"));
        assert_eq!(lines[3], "       read pet: Expected status = 200, got 404");
        assert_eq!(lines[4], "  3. [SKIP] Update pet (PUT /pet) -> 200");
        assert_eq!(lines[5], "1 passed, 1 failed, 1 skipped (10015 ms)");
    }

    #[tokio::test]
    async fn test_write_report_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("e2e");
        let report = report();
        let run = RunReport {
            pet_id: PetId::new(123_456_789).unwrap(),
            report: &report,
            exchanges: &[],
        };

        let path = write_report(&target, &run).await.unwrap();
        assert_eq!(path, target.join(REPORT_FILE));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["pet_id"], 123_456_789);
        assert_eq!(parsed["report"]["failed"], 1);
        assert_eq!(parsed["report"]["steps"][2]["status"], "skipped");
        assert_eq!(parsed["exchanges"], serde_json::json!([]));
    }
}
