use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// The three substring-search algorithms, in canonical order.
/// Canonical order matters: timing ties resolve to the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    BoyerMoore,
    Kmp,
    RabinKarp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Self::BoyerMoore, Self::Kmp, Self::RabinKarp];

    #[must_use]
    pub fn all() -> &'static [Algorithm] {
        &Self::ALL
    }

    /// Display name used in reports and result files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BoyerMoore => "Boyer-Moore",
            Self::Kmp => "Knuth-Morris-Pratt",
            Self::RabinKarp => "Rabin-Karp",
        }
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::BoyerMoore => "bm",
            Self::Kmp => "kmp",
            Self::RabinKarp => "rk",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.short_name().eq_ignore_ascii_case(s) || a.name().eq_ignore_ascii_case(s))
            .or_else(|| match s.to_ascii_lowercase().as_str() {
                "boyer_moore" | "boyermoore" => Some(Self::BoyerMoore),
                "knuth_morris_pratt" => Some(Self::Kmp),
                "rabin_karp" | "rabinkarp" => Some(Self::RabinKarp),
                _ => None,
            })
            .ok_or_else(|| MatchError::InvalidArgument {
                arg: "algorithm".into(),
                reason: format!("unknown algorithm \"{s}\" (expected bm, kmp or rk)"),
            })
    }
}

/// Which kind of pattern a benchmark scenario searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// A window cut from the text itself, so it always occurs.
    #[serde(rename = "Existing")]
    Existing,
    #[serde(rename = "Non-Existing")]
    Missing,
}

impl PatternKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Existing => "Existing",
            Self::Missing => "Non-Existing",
        }
    }
}

/// Render a match result the classic way: the offset, or -1 when absent.
#[must_use]
pub fn index_or_sentinel(found: Option<usize>) -> i64 {
    found.map_or(-1, |i| i as i64)
}
