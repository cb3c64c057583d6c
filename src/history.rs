//! Bounded, timestamp-ordered record of progress observations

use std::collections::VecDeque;

use crate::{Error, Result};

/// One accepted progress observation: elapsed seconds since start and the
/// progress value at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed: f64,
    pub value: f64,
}

/// Retention policy for the sample history.
///
/// `Count` keeps that many most recent samples. `Fraction` is resolved once
/// when the bar starts, as `max(2, round(fraction * maximum))`, and requires
/// the maximum to be known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keep {
    Count(usize),
    Fraction(f64),
}

impl Keep {
    /// Resolve the policy into an absolute sample bound.
    pub(crate) fn resolve(self, maximum: Option<f64>) -> Result<usize> {
        match self {
            // rate arithmetic needs a time delta, so never keep fewer than 2
            Keep::Count(n) => Ok(n.max(2)),
            Keep::Fraction(f) => {
                if !(f > 0.0 && f < 1.0) {
                    return Err(Error::InvalidConfig(format!(
                        "keep fraction must be in (0, 1), got {f}"
                    )));
                }
                match maximum {
                    Some(maximum) => Ok(((maximum * f).round() as usize).max(2)),
                    None => Err(Error::InvalidConfig(
                        "fractional keep requires a known maximum".to_string(),
                    )),
                }
            }
        }
    }
}

/// Ordered sequence of [`Sample`]s, trimmed from the front once the
/// retention bound is exceeded.
///
/// The very first sample ever recorded is captured separately so whole-run
/// statistics survive eviction.
#[derive(Debug)]
pub struct SampleHistory {
    bound: usize,
    first: Option<Sample>,
    samples: VecDeque<Sample>,
}

impl SampleHistory {
    pub fn new(bound: usize) -> Self {
        Self {
            bound: bound.max(2),
            first: None,
            samples: VecDeque::new(),
        }
    }

    /// Append a sample, then evict the oldest entries until the retention
    /// bound holds again.
    pub fn record(&mut self, elapsed: f64, value: f64) {
        let sample = Sample { elapsed, value };
        if self.first.is_none() {
            self.first = Some(sample);
        }
        self.samples.push_back(sample);
        while self.samples.len() > self.bound {
            self.samples.pop_front();
        }
    }

    /// The `(first, last)` samples of the selected window.
    ///
    /// Adaptive statistics use the oldest *retained* sample; whole-run
    /// statistics use the first sample ever recorded. Returns `None` until
    /// something has been recorded.
    pub fn window(&self, adaptive: bool) -> Option<(Sample, Sample)> {
        let last = *self.samples.back()?;
        let first = if adaptive {
            *self.samples.front()?
        } else {
            self.first?
        };
        Some((first, last))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bound_is_never_exceeded() {
        let mut history = SampleHistory::new(5);
        for i in 0..100 {
            history.record(i as f64, (i * 10) as f64);
            assert!(history.len() <= 5);
        }
        assert_eq!(history.len(), 5);
        let (first, last) = history.window(true).unwrap();
        // the five most recent samples are 95..=99
        assert_eq!(first.elapsed, 95.0);
        assert_eq!(last.elapsed, 99.0);
    }

    #[test]
    fn whole_run_window_survives_eviction() {
        let mut history = SampleHistory::new(2);
        for i in 0..50 {
            history.record(i as f64, i as f64);
        }
        let (first, last) = history.window(false).unwrap();
        assert_eq!(first, Sample { elapsed: 0.0, value: 0.0 });
        assert_eq!(last, Sample { elapsed: 49.0, value: 49.0 });
    }

    #[test]
    fn empty_history_has_no_window() {
        let history = SampleHistory::new(4);
        assert!(history.window(true).is_none());
        assert!(history.window(false).is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn keep_count_clamps_to_two() {
        assert_eq!(Keep::Count(0).resolve(None).unwrap(), 2);
        assert_eq!(Keep::Count(7).resolve(None).unwrap(), 7);
    }

    #[test]
    fn keep_fraction_resolves_against_maximum() {
        assert_eq!(Keep::Fraction(0.05).resolve(Some(1000.0)).unwrap(), 50);
        // rounds, then clamps to at least 2
        assert_eq!(Keep::Fraction(0.01).resolve(Some(100.0)).unwrap(), 2);
    }

    #[test]
    fn keep_fraction_without_maximum_is_config_error() {
        let err = Keep::Fraction(0.05).resolve(None).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn keep_fraction_out_of_range_is_config_error() {
        assert!(Keep::Fraction(1.5).resolve(Some(10.0)).is_err());
        assert!(Keep::Fraction(0.0).resolve(Some(10.0)).is_err());
    }
}
