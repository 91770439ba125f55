use crate::env::Reward;

/// Running reward statistics using Welford's online algorithm.
///
/// Each [`push`](Self::push) is O(1) and never revisits earlier samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RewardStats {
    count: u64,
    mean: f64,
    m2: f64,
    total: f64,
}

impl RewardStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, reward: Reward) {
        self.count += 1;
        let delta = reward - self.mean;
        self.mean += delta / self.count as f64;
        // Must use the deviation from the updated mean.
        self.m2 += delta * (reward - self.mean);
        self.total += reward;
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Sum of squared deviations from the mean.
    #[must_use]
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Population variance, `m2 / n`. Zero before any sample.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Unbiased variance, `m2 / (n - 1)`. Zero with fewer than two samples.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
