use std::hint::black_box;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::config::{BenchConfig, WARMUP_REPS};
use super::scenario::{scenarios_for, Scenario};
use crate::error::MatchError;
use crate::search::{all_matchers, Matcher};
use crate::source::{Text, TextSource};
use crate::types::{Algorithm, PatternKind};

/// A named, loaded text.
#[derive(Debug)]
pub struct Corpus {
    pub name: String,
    pub text: Text,
}

/// Total time one matcher spent on `reps` searches of one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub text_name: String,
    pub kind: PatternKind,
    pub pattern_len: usize,
    pub reps: u32,
    /// Verified match offset, identical for every matcher.
    pub index: Option<usize>,
    pub timings: Vec<Timing>,
    pub fastest: Algorithm,
}

impl ScenarioResult {
    #[must_use]
    pub fn elapsed(&self, algorithm: Algorithm) -> Option<Duration> {
        self.timings
            .iter()
            .find(|t| t.algorithm == algorithm)
            .map(|t| t.elapsed)
    }
}

/// Load every source up front so I/O never lands inside a timed loop.
pub fn load_corpora(sources: &[Box<dyn TextSource>]) -> Result<Vec<Corpus>, MatchError> {
    sources
        .iter()
        .map(|s| {
            let text = s.load()?;
            tracing::debug!(name = %s.name(), bytes = text.len(), "loaded corpus");
            Ok(Corpus {
                name: s.name(),
                text,
            })
        })
        .collect()
}

/// Build the scenario list for all corpora: existing then missing, per text.
#[must_use]
pub fn build_scenarios(corpora: &[Corpus], config: &BenchConfig) -> Vec<Scenario> {
    corpora
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            scenarios_for(i, &c.name, &c.text, config.window, &config.missing_pattern)
        })
        .collect()
}

/// Check every matcher against `memchr::memmem` on one scenario.
/// Returns the agreed offset.
pub fn verify_scenario(
    text: &[u8],
    scenario: &Scenario,
    matchers: &[Box<dyn Matcher>],
) -> Result<Option<usize>, MatchError> {
    let expected = memchr::memmem::find(text, &scenario.pattern);
    for m in matchers {
        let got = m.find(text, &scenario.pattern);
        if got != expected {
            return Err(MatchError::Mismatch {
                algorithm: m.name(),
                scenario: scenario.label(),
                got,
                expected,
            });
        }
    }
    Ok(expected)
}

/// Verify all scenarios in parallel. Any disagreement fails the whole run.
pub fn verify_all(
    corpora: &[Corpus],
    scenarios: &[Scenario],
    matchers: &[Box<dyn Matcher>],
) -> Result<Vec<Option<usize>>, MatchError> {
    scenarios
        .par_iter()
        .map(|s| verify_scenario(&corpora[s.corpus].text, s, matchers))
        .collect()
}

/// Run `matcher` `reps` times after a short warm-up and return the total.
pub fn time_matcher(matcher: &dyn Matcher, text: &[u8], pattern: &[u8], reps: u32) -> Duration {
    for _ in 0..WARMUP_REPS {
        black_box(matcher.find(black_box(text), black_box(pattern)));
    }
    let start = Instant::now();
    for _ in 0..reps {
        black_box(matcher.find(black_box(text), black_box(pattern)));
    }
    start.elapsed()
}

/// Lowest total time wins; ties go to the earlier algorithm.
#[must_use]
pub fn fastest(timings: &[Timing]) -> Option<Algorithm> {
    timings
        .iter()
        .min_by_key(|t| (t.elapsed, t.algorithm))
        .map(|t| t.algorithm)
}

/// Verify, then time every matcher on every scenario, sequentially.
pub fn run(corpora: &[Corpus], config: &BenchConfig) -> Result<Vec<ScenarioResult>, MatchError> {
    let matchers = all_matchers(config.modulus);
    let scenarios = build_scenarios(corpora, config);
    let indices = verify_all(corpora, &scenarios, &matchers)?;
    tracing::info!(scenarios = scenarios.len(), "all matchers agree with reference search");

    let mut results = Vec::with_capacity(scenarios.len());
    for (scenario, index) in scenarios.iter().zip(indices) {
        let text = &corpora[scenario.corpus].text;
        let timings: Vec<Timing> = matchers
            .iter()
            .map(|m| Timing {
                algorithm: m.algorithm(),
                elapsed: time_matcher(m.as_ref(), text, &scenario.pattern, config.reps),
            })
            .collect();

        // matchers is never empty, so neither is timings
        let winner = fastest(&timings).unwrap_or(Algorithm::BoyerMoore);
        tracing::info!(
            scenario = %scenario.label(),
            fastest = %winner,
            "timed scenario"
        );

        results.push(ScenarioResult {
            text_name: scenario.text_name.clone(),
            kind: scenario.kind,
            pattern_len: scenario.pattern.len(),
            reps: config.reps,
            index,
            timings,
            fastest: winner,
        });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BoyerMoore, Kmp, RabinKarp};
    use crate::source::InlineSource;
    use std::path::PathBuf;

    struct Broken;

    impl Matcher for Broken {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Kmp
        }

        fn find(&self, _text: &[u8], _pattern: &[u8]) -> Option<usize> {
            Some(0)
        }
    }

    fn config(reps: u32) -> BenchConfig {
        BenchConfig {
            reps,
            texts: vec![PathBuf::from("unused")],
            ..BenchConfig::default()
        }
    }

    fn corpus(name: &str, text: &str) -> Corpus {
        Corpus {
            name: name.into(),
            text: Text::Owned(text.as_bytes().to_vec()),
        }
    }

    #[test]
    fn fastest_prefers_lowest_then_canonical_order() {
        let t = |algorithm, ms| Timing {
            algorithm,
            elapsed: Duration::from_millis(ms),
        };
        assert_eq!(
            fastest(&[t(Algorithm::BoyerMoore, 5), t(Algorithm::Kmp, 3), t(Algorithm::RabinKarp, 4)]),
            Some(Algorithm::Kmp)
        );
        assert_eq!(
            fastest(&[t(Algorithm::RabinKarp, 2), t(Algorithm::Kmp, 2), t(Algorithm::BoyerMoore, 9)]),
            Some(Algorithm::Kmp)
        );
        assert_eq!(fastest(&[]), None);
    }

    #[test]
    fn verification_catches_wrong_matcher() {
        let text = b"abcdef";
        let scenario = Scenario {
            corpus: 0,
            text_name: "t".into(),
            kind: PatternKind::Existing,
            pattern: b"cd".to_vec(),
        };
        let good: Vec<Box<dyn Matcher>> =
            vec![Box::new(BoyerMoore), Box::new(Kmp), Box::new(RabinKarp::default())];
        assert_eq!(verify_scenario(text, &scenario, &good).unwrap(), Some(2));

        let bad: Vec<Box<dyn Matcher>> = vec![Box::new(BoyerMoore), Box::new(Broken)];
        let err = verify_scenario(text, &scenario, &bad).unwrap_err();
        assert!(
            matches!(err, MatchError::Mismatch { got: Some(0), expected: Some(2), .. }),
            "{err}"
        );
    }

    #[test]
    fn run_produces_two_scenarios_per_text() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua.";
        let corpora = vec![corpus("lorem", text), corpus("tiny", "abc")];
        let results = run(&corpora, &config(3)).unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].kind, PatternKind::Existing);
        assert_eq!(results[0].index, Some(50));
        assert_eq!(results[0].pattern_len, 50);
        assert_eq!(results[1].kind, PatternKind::Missing);
        assert_eq!(results[1].index, None);
        // "abc" is shorter than the window start: second half "bc" at 1
        assert_eq!(results[2].index, Some(1));
        for r in &results {
            assert_eq!(r.timings.len(), 3);
            assert_eq!(r.reps, 3);
            assert!(r.elapsed(r.fastest).is_some());
        }
    }

    #[test]
    fn load_corpora_uses_source_names() {
        let sources: Vec<Box<dyn TextSource>> = vec![Box::new(InlineSource::new("inline", "xyz"))];
        let corpora = load_corpora(&sources).unwrap();
        assert_eq!(corpora[0].name, "inline");
        assert_eq!(&corpora[0].text[..], b"xyz");
    }
}
