mod boyer_moore;
mod kmp;
mod rabin_karp;

pub use boyer_moore::boyer_moore;
pub use kmp::{failure_table, kmp};
pub use rabin_karp::{rabin_karp, BASE, DEFAULT_MODULUS, MAX_MODULUS};

use crate::types::Algorithm;

/// A substring searcher. Implementations hold only tuning, never per-call
/// state, so one value can be shared across threads.
pub trait Matcher: Sync {
    fn algorithm(&self) -> Algorithm;

    /// Offset of the first occurrence of `pattern` in `text`.
    /// Empty pattern, empty text, or a pattern longer than the text is `None`.
    fn find(&self, text: &[u8], pattern: &[u8]) -> Option<usize>;

    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    /// Every occurrence, overlapping ones included, in increasing order.
    fn find_all(&self, text: &[u8], pattern: &[u8]) -> Vec<usize> {
        let mut hits = Vec::new();
        let mut start = 0;
        while start < text.len() {
            match self.find(&text[start..], pattern) {
                Some(k) => {
                    hits.push(start + k);
                    start += k + 1;
                }
                None => break,
            }
        }
        hits
    }
}

pub struct BoyerMoore;

impl Matcher for BoyerMoore {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BoyerMoore
    }

    #[inline]
    fn find(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        boyer_moore(text, pattern)
    }
}

pub struct Kmp;

impl Matcher for Kmp {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Kmp
    }

    #[inline]
    fn find(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        kmp(text, pattern)
    }
}

pub struct RabinKarp {
    pub modulus: u64,
}

impl Default for RabinKarp {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl Matcher for RabinKarp {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RabinKarp
    }

    #[inline]
    fn find(&self, text: &[u8], pattern: &[u8]) -> Option<usize> {
        rabin_karp(text, pattern, self.modulus)
    }
}

/// Build the matcher for `algorithm`. `modulus` only affects Rabin-Karp.
#[must_use]
pub fn matcher(algorithm: Algorithm, modulus: u64) -> Box<dyn Matcher> {
    match algorithm {
        Algorithm::BoyerMoore => Box::new(BoyerMoore),
        Algorithm::Kmp => Box::new(Kmp),
        Algorithm::RabinKarp => Box::new(RabinKarp { modulus }),
    }
}

/// All three matchers in canonical order.
#[must_use]
pub fn all_matchers(modulus: u64) -> Vec<Box<dyn Matcher>> {
    Algorithm::all()
        .iter()
        .map(|&a| matcher(a, modulus))
        .collect()
}

/// First occurrence of `pattern` in `text` using `algorithm` with default tuning.
#[must_use]
pub fn find(algorithm: Algorithm, text: &[u8], pattern: &[u8]) -> Option<usize> {
    find_with(algorithm, text, pattern, DEFAULT_MODULUS)
}

/// Like [`find`], with an explicit Rabin-Karp modulus.
#[must_use]
pub fn find_with(algorithm: Algorithm, text: &[u8], pattern: &[u8], modulus: u64) -> Option<usize> {
    match algorithm {
        Algorithm::BoyerMoore => boyer_moore(text, pattern),
        Algorithm::Kmp => kmp(text, pattern),
        Algorithm::RabinKarp => rabin_karp(text, pattern, modulus),
    }
}

/// Every occurrence of `pattern` in `text` using `algorithm` with default tuning.
#[must_use]
pub fn find_all(algorithm: Algorithm, text: &[u8], pattern: &[u8]) -> Vec<usize> {
    matcher(algorithm, DEFAULT_MODULUS).find_all(text, pattern)
}
