use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::report::ResultRecord;
use crate::types::Algorithm;

/// Mean seconds per algorithm for one (text, pattern type) across a file.
/// A results file may hold several runs of the same scenario.
fn average_by_scenario(records: &[ResultRecord]) -> BTreeMap<(String, &'static str), Averages> {
    let mut groups: BTreeMap<(String, &'static str), Averages> = BTreeMap::new();
    for r in records {
        let entry = groups
            .entry((r.text.clone(), r.pattern_type.label()))
            .or_default();
        entry.runs += 1;
        for &a in Algorithm::all() {
            if let Some(t) = r.time(a) {
                *entry.totals.entry(a).or_insert(0.0) += t;
            }
        }
        entry.last_fastest.clone_from(&r.fastest);
    }
    groups
}

#[derive(Default)]
struct Averages {
    runs: u32,
    totals: BTreeMap<Algorithm, f64>,
    last_fastest: String,
}

impl Averages {
    fn mean(&self, a: Algorithm) -> Option<f64> {
        self.totals.get(&a).map(|t| t / f64::from(self.runs))
    }

    /// Fastest by mean time, falling back to the recorded winner.
    fn fastest(&self) -> String {
        Algorithm::all()
            .iter()
            .filter_map(|&a| self.mean(a).map(|m| (a, m)))
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map_or_else(|| self.last_fastest.clone(), |(a, _)| a.name().to_string())
    }
}

/// Side-by-side report of two results files, keyed by (text, pattern type).
/// Scenarios present in only one file are listed but not compared.
#[must_use]
pub fn compare(old: &[ResultRecord], new: &[ResultRecord]) -> String {
    let old_groups = average_by_scenario(old);
    let new_groups = average_by_scenario(new);
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "OLD vs NEW COMPARISON");
    let _ = writeln!(out, "{}", "=".repeat(80));

    let mut changed = 0usize;
    let mut compared = 0usize;

    for (key, old_avg) in &old_groups {
        let Some(new_avg) = new_groups.get(key) else {
            continue;
        };
        compared += 1;
        let (text, pattern_type) = key;

        let _ = writeln!(out);
        let _ = writeln!(out, "{text} / {pattern_type}");
        let _ = writeln!(
            out,
            "  {:<22} {:>12} {:>12} {:>10}",
            "Algorithm", "Old (s)", "New (s)", "Delta"
        );
        for &a in Algorithm::all() {
            if let (Some(o), Some(n)) = (old_avg.mean(a), new_avg.mean(a)) {
                let _ = writeln!(
                    out,
                    "  {:<22} {o:>12.6} {n:>12.6} {:>10}",
                    a.name(),
                    percent_delta(o, n)
                );
            }
        }

        let (of, nf) = (old_avg.fastest(), new_avg.fastest());
        if of == nf {
            let _ = writeln!(out, "  Fastest: {nf} (same)");
        } else {
            changed += 1;
            let _ = writeln!(out, "  Fastest: {of} -> {nf} (CHANGED)");
        }
    }

    let only_old: Vec<String> = old_groups
        .keys()
        .filter(|k| !new_groups.contains_key(*k))
        .map(|(t, p)| format!("{t} / {p}"))
        .collect();
    let only_new: Vec<String> = new_groups
        .keys()
        .filter(|k| !old_groups.contains_key(*k))
        .map(|(t, p)| format!("{t} / {p}"))
        .collect();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "Scenarios compared:      {compared}");
    let _ = writeln!(out, "Fastest changed:         {changed}");
    if !only_old.is_empty() {
        let _ = writeln!(out, "Only in old:             {}", only_old.join(", "));
    }
    if !only_new.is_empty() {
        let _ = writeln!(out, "Only in new:             {}", only_new.join(", "));
    }
    out.trim_end().to_string()
}

fn percent_delta(old: f64, new: f64) -> String {
    if old <= 0.0 {
        return "n/a".into();
    }
    format!("{:+.1}%", (new - old) / old * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatternKind;

    fn record(text: &str, kind: PatternKind, bm: f64, kmp: f64, rk: f64) -> ResultRecord {
        let times = BTreeMap::from([
            (Algorithm::BoyerMoore.name().to_string(), bm),
            (Algorithm::Kmp.name().to_string(), kmp),
            (Algorithm::RabinKarp.name().to_string(), rk),
        ]);
        let fastest = Algorithm::all()
            .iter()
            .map(|&a| (a, times[a.name()]))
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(a, _)| a.name().to_string())
            .unwrap();
        ResultRecord {
            text: text.into(),
            pattern_type: kind,
            pattern_len: 50,
            reps: 1000,
            index: if kind == PatternKind::Existing { 50 } else { -1 },
            times,
            fastest,
            timestamp: String::new(),
            build: String::new(),
        }
    }

    #[test]
    fn reports_deltas_and_changed_winner() {
        let old = vec![record("a.txt", PatternKind::Existing, 1.0, 2.0, 3.0)];
        let new = vec![record("a.txt", PatternKind::Existing, 2.0, 1.0, 3.0)];
        let out = compare(&old, &new);
        assert!(out.contains("a.txt / Existing"), "{out}");
        assert!(out.contains("+100.0%"), "{out}");
        assert!(out.contains("-50.0%"), "{out}");
        assert!(out.contains("Boyer-Moore -> Knuth-Morris-Pratt (CHANGED)"), "{out}");
        assert!(out.contains("Fastest changed:         1"), "{out}");
    }

    #[test]
    fn repeated_runs_are_averaged() {
        let old = vec![
            record("a.txt", PatternKind::Missing, 1.0, 4.0, 4.0),
            record("a.txt", PatternKind::Missing, 3.0, 4.0, 4.0),
        ];
        let new = vec![record("a.txt", PatternKind::Missing, 2.0, 4.0, 4.0)];
        let out = compare(&old, &new);
        // mean of 1.0 and 3.0 is 2.0, so no change
        assert!(out.contains("+0.0%"), "{out}");
        assert!(out.contains("Boyer-Moore (same)"), "{out}");
    }

    #[test]
    fn unmatched_scenarios_are_listed() {
        let old = vec![record("a.txt", PatternKind::Existing, 1.0, 2.0, 3.0)];
        let new = vec![record("b.txt", PatternKind::Existing, 1.0, 2.0, 3.0)];
        let out = compare(&old, &new);
        assert!(out.contains("Scenarios compared:      0"), "{out}");
        assert!(out.contains("Only in old:             a.txt / Existing"), "{out}");
        assert!(out.contains("Only in new:             b.txt / Existing"), "{out}");
    }

    #[test]
    fn zero_old_time_has_no_percentage() {
        assert_eq!(percent_delta(0.0, 1.0), "n/a");
        assert_eq!(percent_delta(2.0, 1.0), "-50.0%");
    }
}
