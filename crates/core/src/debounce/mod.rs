use std::future;
use std::mem;
use std::time::Duration;

use tokio::time::{self, Instant};

/// How long the sampler has to stay quiet before a batch flushes.
pub const QUIET_PERIOD: Duration = Duration::from_millis(15);

/// Trailing-edge debounce over accepted deltas.
///
/// Every [`push`](Self::push) appends to the pending batch and re-arms the
/// deadline, so the batch flushes only after a gap with no accepted deltas.
/// The batch and the deadline live inside this struct and are mutated only
/// through its methods; at most one of each exists at a time. Pushes and
/// expiry are serialized by the event loop driving this aggregator, so a
/// batch is never flushed while also being appended to.
#[derive(Debug)]
pub struct DebounceAggregator {
    window: Duration,
    batch: Vec<f32>,
    deadline: Option<Instant>,
}

impl DebounceAggregator {
    /// Creates an aggregator using the standard [`QUIET_PERIOD`].
    pub fn new() -> Self {
        Self::with_window(QUIET_PERIOD)
    }

    /// Creates an aggregator with an explicit quiet period.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            batch: Vec::new(),
            deadline: None,
        }
    }

    /// Appends a delta and re-arms the quiet-period deadline.
    pub fn push(&mut self, delta: f32) {
        self.batch.push(delta);
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Whether a flush is currently pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Completes once the quiet period has elapsed; pends forever while
    /// disarmed. Callers re-create this future on every event-loop turn, so
    /// a push that re-arms the deadline always takes effect.
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => time::sleep_until(deadline).await,
            None => future::pending().await,
        }
    }

    /// Takes the pending batch, leaving an empty one behind and disarming
    /// the deadline.
    pub fn take_batch(&mut self) -> Vec<f32> {
        self.deadline = None;
        mem::take(&mut self.batch)
    }
}

impl Default for DebounceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn rapid_pushes_keep_postponing_the_flush() {
        let mut aggregator = DebounceAggregator::new();

        // Pushes every 5ms; the 15ms deadline keeps moving.
        for _ in 0..3 {
            aggregator.push(-20.0);
            time::advance(Duration::from_millis(5)).await;
        }

        // 5ms have passed since the last push; another 9ms is still short.
        assert!(timeout(Duration::from_millis(9), aggregator.expired())
            .await
            .is_err());
        assert!(aggregator.is_armed());

        // Crossing the 15ms mark completes the wait.
        assert!(timeout(Duration::from_millis(2), aggregator.expired())
            .await
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn take_batch_drains_and_disarms() {
        let mut aggregator = DebounceAggregator::new();
        aggregator.push(-20.0);
        aggregator.push(16.0);

        let batch = aggregator.take_batch();
        assert_eq!(batch, vec![-20.0, 16.0]);
        assert!(!aggregator.is_armed());
        assert!(aggregator.take_batch().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_aggregator_never_expires() {
        let aggregator = DebounceAggregator::new();
        assert!(timeout(Duration::from_secs(60), aggregator.expired())
            .await
            .is_err());
    }
}
