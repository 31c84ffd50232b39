//! The signal-to-gesture event loop.
//!
//! Wires the external sampler to the tree: raw samples are filtered,
//! accepted deltas buffered behind the trailing-edge debounce, and each
//! flushed batch classified into a gesture that is offered to the state
//! machine. A swing runs as its own task, so samples arriving mid-swing are
//! still filtered and buffered; their eventual gesture is simply dropped by
//! the state machine, which is the intended backpressure behavior.

use tokio::sync::mpsc;

use crate::debounce::DebounceAggregator;
use crate::render::LeafHandle;
use crate::signal::{self, BandwidthSample};
use crate::tree::DopplerTree;
use crate::gesture;

/// Consumes the sampler channel until it closes.
///
/// Everything here is serialized on one task: pushes into the aggregator
/// and batch flushes can never interleave. Only the swing itself leaves
/// this loop, as a spawned task guarded by the tree's state machine.
pub async fn listen<H>(tree: DopplerTree<H>, mut samples: mpsc::Receiver<BandwidthSample>)
where
    H: LeafHandle + 'static,
{
    let mut aggregator = DebounceAggregator::new();

    loop {
        tokio::select! {
            received = samples.recv() => {
                let Some(sample) = received else { break };
                if let Some(delta) = signal::accept(&sample) {
                    aggregator.push(delta);
                }
            }
            _ = aggregator.expired() => {
                let batch = aggregator.take_batch();
                let Some(direction) = gesture::classify(&batch).direction() else {
                    tracing::debug!(len = batch.len(), "batch discarded");
                    continue;
                };
                let tree = tree.clone();
                tokio::spawn(async move {
                    if let Err(err) = tree.request_swing(direction).await {
                        tracing::warn!(%err, "swing aborted");
                    }
                });
            }
        }
    }
}
