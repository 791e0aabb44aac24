use crate::foundation::error::{PhaseError, PhaseResult};

// Roughly 98% of the remaining distance is covered after one `lag`.
const CATCH_UP_RATE: f64 = 4.0;
const SNAP_EPSILON: f64 = 1e-4;

/// Eases rendered progress toward mapped progress, lagging by about `lag_secs`.
///
/// Mirrors `scrub: 0.6`: the timeline trails the scrollbar instead of jumping with it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrubSmoother {
    lag_secs: f64,
    current: Option<f64>,
}

impl ScrubSmoother {
    pub fn new(lag_secs: f64) -> PhaseResult<Self> {
        if !lag_secs.is_finite() || lag_secs < 0.0 {
            return Err(PhaseError::validation("scrub lag must be finite and >= 0"));
        }
        Ok(Self {
            lag_secs,
            current: None,
        })
    }

    pub fn current(&self) -> Option<f64> {
        self.current
    }

    /// Jump straight to `target`.
    pub fn snap(&mut self, target: f64) -> f64 {
        self.current = Some(target);
        target
    }

    /// Advance by `dt_secs` toward `target` and return the smoothed progress.
    pub fn advance(&mut self, target: f64, dt_secs: f64) -> f64 {
        let Some(current) = self.current else {
            return self.snap(target);
        };
        if self.lag_secs == 0.0 {
            return self.snap(target);
        }
        if dt_secs <= 0.0 {
            return current;
        }
        let alpha = 1.0 - (-dt_secs * CATCH_UP_RATE / self.lag_secs).exp();
        let next = current + (target - current) * alpha;
        if (target - next).abs() < SNAP_EPSILON {
            return self.snap(target);
        }
        self.current = Some(next);
        next
    }

    /// Return `true` when rendered progress has caught up with `target`.
    pub fn is_settled(&self, target: f64) -> bool {
        self.current == Some(target)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
