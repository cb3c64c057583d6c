//! Speed and remaining-time estimation over the sample history

use crate::history::SampleHistory;

/// Computes rate and remaining time from the recorded samples.
///
/// Borrowed from the bar for the duration of one render pass. Every
/// estimate is an `Option`: too few samples, a non-positive time delta or
/// an unknown maximum all yield `None` rather than dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    history: &'a SampleHistory,
}

impl<'a> Estimator<'a> {
    pub fn new(history: &'a SampleHistory) -> Self {
        Self { history }
    }

    /// Progress units per second over the selected window.
    ///
    /// With `adaptive` the window covers only the retained samples,
    /// otherwise the whole run.
    pub fn speed(&self, adaptive: bool) -> Option<f64> {
        let (first, last) = self.history.window(adaptive)?;
        let dt = last.elapsed - first.elapsed;
        if dt <= 0.0 {
            return None;
        }
        Some((last.value - first.value) / dt)
    }

    /// Seconds until `current` reaches `maximum` at the estimated speed.
    pub fn remaining_secs(
        &self,
        current: f64,
        maximum: Option<f64>,
        adaptive: bool,
    ) -> Option<f64> {
        let maximum = maximum?;
        let speed = self.speed(adaptive)?;
        if speed <= 0.0 {
            return None;
        }
        let remaining = (maximum - current).max(0.0);
        Some(remaining / speed)
    }
}
