use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::run::ScenarioResult;
use crate::error::MatchError;
use crate::types::{index_or_sentinel, Algorithm, PatternKind};

/// Commit the binary was built from, or "unknown" outside a git checkout.
pub const BUILD_COMMIT: &str = match option_env!("STRMATCH_BUILD_COMMIT") {
    Some(c) => c,
    None => "unknown",
};

/// One line of a results file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub text: String,
    pub pattern_type: PatternKind,
    pub pattern_len: usize,
    pub reps: u32,
    /// Match offset, -1 when the pattern does not occur.
    pub index: i64,
    /// Algorithm display name → total seconds over `reps` runs.
    pub times: BTreeMap<String, f64>,
    pub fastest: String,
    pub timestamp: String,
    pub build: String,
}

impl ResultRecord {
    #[must_use]
    pub fn from_result(r: &ScenarioResult, timestamp: &str) -> Self {
        Self {
            text: r.text_name.clone(),
            pattern_type: r.kind,
            pattern_len: r.pattern_len,
            reps: r.reps,
            index: index_or_sentinel(r.index),
            times: r
                .timings
                .iter()
                .map(|t| (t.algorithm.name().to_string(), t.elapsed.as_secs_f64()))
                .collect(),
            fastest: r.fastest.name().to_string(),
            timestamp: timestamp.to_string(),
            build: BUILD_COMMIT.to_string(),
        }
    }

    #[must_use]
    pub fn time(&self, algorithm: Algorithm) -> Option<f64> {
        self.times.get(algorithm.name()).copied()
    }
}

/// Convert a whole run, stamping every record with the same local time.
#[must_use]
pub fn records(results: &[ScenarioResult]) -> Vec<ResultRecord> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    results
        .iter()
        .map(|r| ResultRecord::from_result(r, &timestamp))
        .collect()
}

/// Fixed-width comparison table, one row per scenario.
#[must_use]
pub fn table(records: &[ResultRecord]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<20} {:<14}", "Text", "Pattern Type");
    for a in Algorithm::all() {
        let _ = write!(out, " {:>24}", format!("{} Time", a.name()));
    }
    let _ = writeln!(out, "  Fastest Algorithm");
    let _ = writeln!(out, "{}", "-".repeat(20 + 1 + 14 + 25 * 3 + 2 + 20));

    for r in records {
        let _ = write!(out, "{:<20} {:<14}", truncate(&r.text, 20), r.pattern_type.label());
        for &a in Algorithm::all() {
            match r.time(a) {
                Some(secs) => {
                    let _ = write!(out, " {secs:>24.6}");
                }
                None => {
                    let _ = write!(out, " {:>24}", "-");
                }
            }
        }
        let _ = writeln!(out, "  {}", r.fastest);
    }
    out.trim_end().to_string()
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut t: String = s.chars().take(width - 1).collect();
    t.push('\u{2026}');
    t
}

/// Append `records` as JSON Lines to the timestamped file for this second in
/// `dir`. Runs landing in the same second share the file.
pub fn write_jsonl(dir: &Path, records: &[ResultRecord]) -> Result<PathBuf, MatchError> {
    fs::create_dir_all(dir).map_err(|e| MatchError::from_io(dir, e))?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("benchmark_{timestamp}.jsonl"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| MatchError::from_io(&path, e))?;
    let mut writer = BufWriter::new(file);
    for r in records {
        let line = serde_json::to_string(r).map_err(|e| MatchError::IoError {
            path: path.clone(),
            source: io::Error::other(e),
        })?;
        writeln!(writer, "{line}").map_err(|e| MatchError::from_io(&path, e))?;
    }
    writer.flush().map_err(|e| MatchError::from_io(&path, e))?;

    tracing::info!(path = %path.display(), records = records.len(), "results written");
    Ok(path)
}

/// Read a JSON Lines results file. Blank lines are skipped; anything else
/// that fails to parse is an error naming the line.
pub fn load_jsonl(path: &Path) -> Result<Vec<ResultRecord>, MatchError> {
    let content = fs::read_to_string(path).map_err(|e| MatchError::from_io(path, e))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(n, l)| {
            serde_json::from_str(l).map_err(|e| MatchError::ParseError {
                path: path.to_path_buf(),
                reason: format!("line {}: {e}", n + 1),
            })
        })
        .collect()
}
