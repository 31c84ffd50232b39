//! In-memory rendering backend.
//!
//! Implements [`SvgDocument`]/[`LeafHandle`] without a display: an animation
//! phase sleeps its duration, then applies the target transform and records
//! the call. The demo binary runs against this backend and the async tests
//! use it to observe exactly what the pipeline asked the renderer to do.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::render::{Easing, LeafHandle, Matrix, SvgDocument};
use crate::{DopplerError, Result};

/// One recorded animation phase.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRecord {
    pub target: Matrix,
    pub duration: Duration,
    pub easing: Easing,
}

#[derive(Debug, Default)]
struct ElementState {
    transform: Matrix,
    calls: Vec<AnimationRecord>,
}

/// Handle to one headless element. Clones share the same state, so a test
/// can keep a handle and inspect calls made through the registry's copy.
#[derive(Debug, Clone)]
pub struct HeadlessHandle {
    state: Arc<Mutex<ElementState>>,
    fail: bool,
}

impl HeadlessHandle {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ElementState {
                transform: Matrix::identity(),
                calls: Vec::new(),
            })),
            fail: false,
        }
    }

    /// All animation phases requested on this element so far.
    pub fn calls(&self) -> Vec<AnimationRecord> {
        self.lock().map(|state| state.calls.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ElementState>> {
        self.state
            .lock()
            .map_err(|_| DopplerError::msg("headless element state has been poisoned"))
    }
}

impl LeafHandle for HeadlessHandle {
    fn transform(&self) -> Matrix {
        self.lock()
            .map(|state| state.transform)
            .unwrap_or_default()
    }

    fn animate(
        &self,
        target: Matrix,
        duration: Duration,
        easing: Easing,
    ) -> impl Future<Output = Result<()>> + Send {
        let state = Arc::clone(&self.state);
        let fail = self.fail;
        async move {
            if fail {
                return Err(DopplerError::Animation(
                    "headless backend rejected the phase".to_string(),
                ));
            }
            tokio::time::sleep(duration).await;
            let mut state = state
                .lock()
                .map_err(|_| DopplerError::msg("headless element state has been poisoned"))?;
            state.transform = target;
            state.calls.push(AnimationRecord {
                target,
                duration,
                easing,
            });
            Ok(())
        }
    }
}

/// Headless document holding a fixed set of elements by id.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    elements: Vec<(String, HeadlessHandle)>,
}

impl HeadlessDocument {
    /// Builds a document containing one fresh element per id.
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: ids
                .into_iter()
                .map(|id| (id.into(), HeadlessHandle::new()))
                .collect(),
        }
    }

    /// Marks one element so every animation phase on it fails.
    pub fn fail_element(&mut self, id: &str) {
        for (element_id, handle) in &mut self.elements {
            if element_id == id {
                handle.fail = true;
            }
        }
    }
}

impl SvgDocument for HeadlessDocument {
    type Handle = HeadlessHandle;

    fn select(&self, id: &str) -> Option<HeadlessHandle> {
        self.elements
            .iter()
            .find(|(element_id, _)| element_id == id)
            .map(|(_, handle)| handle.clone())
    }
}
