use std::fmt;

use serde::Serialize;

use crate::error::MatchError;

/// Outcome of [`probe`]: how many halvings it took, and the value found or
/// the smallest element above the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probe {
    pub iterations: u32,
    pub upper_bound: Option<f64>,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of iterations: {}", self.iterations)?;
        match self.upper_bound {
            Some(b) => write!(f, "Upper bound: {b}"),
            None => write!(f, "Upper bound: None"),
        }
    }
}

/// [`probe`] for user-supplied values, which must already be ascending.
pub fn checked_probe(values: &[f64], target: f64) -> Result<Probe, MatchError> {
    if !is_sorted(values) {
        return Err(MatchError::InvalidArgument {
            arg: "values".into(),
            reason: "must be in ascending order and contain no NaN".into(),
        });
    }
    Ok(probe(values, target))
}

/// Binary search over an ascending slice of floats.
///
/// An exact hit returns that element as the bound. Otherwise the bound is the
/// last element the search stepped left of, which is the successor of
/// `target`, or `None` when every element is smaller. A NaN target compares
/// false both ways, so it walks left and reports the first element.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn probe(sorted: &[f64], target: f64) -> Probe {
    let mut left = 0usize;
    // exclusive: the inclusive right end is `right - 1`
    let mut right = sorted.len();
    let mut iterations = 0u32;
    let mut upper_bound = None;

    while left < right {
        iterations += 1;
        let mid = (left + right - 1) / 2;
        let value = sorted[mid];

        if value == target {
            return Probe {
                iterations,
                upper_bound: Some(value),
            };
        }

        if value < target {
            left = mid + 1;
        } else {
            upper_bound = Some(value);
            right = mid;
        }
    }

    Probe {
        iterations,
        upper_bound,
    }
}

/// True when no element is smaller than its predecessor. NaN anywhere fails.
#[must_use]
pub fn is_sorted(values: &[f64]) -> bool {
    values.iter().all(|v| !v.is_nan()) && values.windows(2).all(|w| w[0] <= w[1])
}
