#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,  // match offsets as i64 — we target 64-bit
    clippy::cast_possible_wrap,        // same
    clippy::cast_precision_loss,       // timing ratios
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::similar_names,             // i/j/m/n in the matchers
    clippy::missing_errors_doc,        // every error is a MatchError with its own Display
    clippy::missing_panics_doc,        // same
)]

pub mod bench;
pub mod bsearch;
pub mod error;
pub mod logging;
pub mod search;
pub mod source;
pub mod types;

use std::fmt::Write as _;

use serde::Serialize;

use error::MatchError;
use source::TextSource;
use types::{index_or_sentinel, Algorithm};

pub use search::{find, find_all, find_with, Matcher};

/// What one algorithm reported for one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub algorithm: &'static str,
    /// First match offset, -1 when absent.
    pub index: i64,
    /// Every offset, only when all occurrences were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Vec<usize>>,
}

/// Load `source` once and run each requested algorithm over it.
pub fn search_text(
    source: &dyn TextSource,
    pattern: &[u8],
    algorithms: &[Algorithm],
    modulus: u64,
    all_occurrences: bool,
) -> Result<Vec<SearchOutcome>, MatchError> {
    let modulus = bench::config::validate_modulus(modulus)?;
    let text = source.load()?;
    tracing::debug!(source = %source.name(), bytes = text.len(), pattern_len = pattern.len(), "search");

    Ok(algorithms
        .iter()
        .map(|&a| {
            let m = search::matcher(a, modulus);
            SearchOutcome {
                algorithm: a.name(),
                index: index_or_sentinel(m.find(&text, pattern)),
                occurrences: all_occurrences.then(|| m.find_all(&text, pattern)),
            }
        })
        .collect())
}

/// Plain-text report for `find`: one line per algorithm with its first
/// offset, or every offset comma-separated when all occurrences were asked
/// for. Absent patterns print -1 either way.
#[must_use]
pub fn render_outcomes(outcomes: &[SearchOutcome]) -> String {
    let mut out = String::new();
    for o in outcomes {
        let hits = match &o.occurrences {
            Some(hits) if !hits.is_empty() => hits
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            Some(_) => "-1".to_string(),
            None => o.index.to_string(),
        };
        let _ = writeln!(out, "{:<20} {hits}", o.algorithm);
    }
    out
}

/// Load every source, verify all matchers, and time them per scenario.
pub fn benchmark(
    sources: &[Box<dyn TextSource>],
    config: &bench::BenchConfig,
) -> Result<Vec<bench::ScenarioResult>, MatchError> {
    let corpora = bench::load_corpora(sources)?;
    bench::run(&corpora, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use source::InlineSource;

    fn outcomes(text: &str, pattern: &str, all: bool) -> Vec<SearchOutcome> {
        let source = InlineSource::new("arg", text);
        search_text(
            &source,
            pattern.as_bytes(),
            Algorithm::all(),
            search::DEFAULT_MODULUS,
            all,
        )
        .unwrap()
    }

    #[test]
    fn render_first_offsets() {
        let out = render_outcomes(&outcomes("ABABDABACDABABCABAB", "ABABCABAB", false));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Boyer-Moore          10",
                "Knuth-Morris-Pratt   10",
                "Rabin-Karp           10",
            ]
        );
    }

    #[test]
    fn render_all_occurrences() {
        let out = render_outcomes(&outcomes("aaaa", "aa", true));
        assert!(out.lines().all(|l| l.ends_with(" 0,1,2")), "{out}");
    }

    #[test]
    fn render_missing_is_sentinel_with_and_without_all() {
        for all in [false, true] {
            let out = render_outcomes(&outcomes("hello", "xyz", all));
            assert_eq!(out.lines().count(), 3);
            assert!(out.lines().all(|l| l.ends_with(" -1")), "all={all}: {out}");
        }
    }
}
