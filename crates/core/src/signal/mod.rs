use serde::{Deserialize, Serialize};

/// Deltas at or below this magnitude are sensor jitter, not gesture signal.
/// The sampler is noisy at rest, so anything this small is discarded before
/// it can reach the batch.
pub const NOISE_THRESHOLD: f32 = 13.0;

/// One left/right energy reading pushed by the external bandwidth sampler.
///
/// Samples are transient: they are consumed immediately into a signed delta
/// and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthSample {
    pub left: f32,
    pub right: f32,
}

impl BandwidthSample {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Signed bandwidth imbalance of this reading.
    pub fn delta(&self) -> f32 {
        self.left - self.right
    }
}

/// Filters a raw sample down to its delta, rejecting jitter.
///
/// Returns `None` when `|left - right|` is at or below [`NOISE_THRESHOLD`],
/// otherwise the delta unchanged. Pure and stateless.
pub fn accept(sample: &BandwidthSample) -> Option<f32> {
    let delta = sample.delta();
    if delta.abs() <= NOISE_THRESHOLD {
        None
    } else {
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_deltas_at_the_threshold() {
        assert_eq!(accept(&BandwidthSample::new(13.0, 0.0)), None);
        assert_eq!(accept(&BandwidthSample::new(0.0, 13.0)), None);
        assert_eq!(accept(&BandwidthSample::new(5.0, 5.0)), None);
    }

    #[test]
    fn passes_deltas_just_above_the_threshold() {
        assert_eq!(accept(&BandwidthSample::new(14.0, 0.0)), Some(14.0));
        assert_eq!(accept(&BandwidthSample::new(0.0, 14.0)), Some(-14.0));
    }

    #[test]
    fn delta_is_left_minus_right() {
        assert_eq!(BandwidthSample::new(30.0, 50.0).delta(), -20.0);
    }
}
