use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tokio::task::JoinSet;

use crate::animator;
use crate::gesture::SwingDirection;
use crate::leaves::LeafRegistry;
use crate::render::{LeafHandle, SvgDocument};
use crate::{DopplerError, Result};

/// Lifecycle state of the tree.
///
/// `Init` holds until the leaf registry is attached; `Stop` is the only
/// state a new swing may start from; `Left` and `Right` are the transient
/// busy states while a swing is in flight. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeState {
    Init,
    Stop,
    Left,
    Right,
}

impl From<SwingDirection> for TreeState {
    fn from(direction: SwingDirection) -> Self {
        match direction {
            SwingDirection::Left => TreeState::Left,
            SwingDirection::Right => TreeState::Right,
        }
    }
}

struct TreeInner<H> {
    state: Mutex<TreeState>,
    registry: OnceLock<LeafRegistry<H>>,
}

/// The tree itself: the swing state machine plus the attached leaves.
///
/// Cheap to clone; clones share one state machine, so a swing can run as a
/// spawned task while the event loop keeps consuming samples.
pub struct DopplerTree<H> {
    inner: Arc<TreeInner<H>>,
}

impl<H> Clone for DopplerTree<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: LeafHandle + 'static> std::fmt::Debug for DopplerTree<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DopplerTree")
            .field("state", &self.state().ok())
            .field("leaf_count", &self.leaf_count())
            .finish()
    }
}

impl<H: LeafHandle + 'static> DopplerTree<H> {
    /// Creates an inert tree in `Init` with no leaves attached.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TreeInner {
                state: Mutex::new(TreeState::Init),
                registry: OnceLock::new(),
            }),
        }
    }

    /// Loads the leaf geometry document against the rendering layer and
    /// attaches the result. On any error the caller is left without a tree;
    /// keeping an inert [`DopplerTree::new`] around instead is the designed
    /// fallback (the tree stays `Init` and drops every gesture).
    pub fn load<D>(document: &D, data: &str) -> Result<Self>
    where
        D: SvgDocument<Handle = H>,
    {
        let tree = Self::new();
        tree.attach_leaves(LeafRegistry::load(document, data)?)?;
        Ok(tree)
    }

    /// Attaches the loaded registry and fires the one `Init` → `Stop`
    /// transition. The registry is set exactly once and must be non-empty;
    /// a swing over zero leaves would settle instantly and mean nothing.
    pub fn attach_leaves(&self, registry: LeafRegistry<H>) -> Result<()> {
        if registry.is_empty() {
            return Err(DopplerError::msg("leaf registry is empty"));
        }
        self.inner
            .registry
            .set(registry)
            .map_err(|_| DopplerError::msg("leaves are already attached"))?;

        let mut state = self.lock_state()?;
        if *state == TreeState::Init {
            *state = TreeState::Stop;
        }
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> Result<TreeState> {
        Ok(*self.lock_state()?)
    }

    /// Number of attached leaves; zero before load completes.
    pub fn leaf_count(&self) -> usize {
        self.inner.registry.get().map(LeafRegistry::len).unwrap_or(0)
    }

    /// Runs one full swing in the requested direction.
    ///
    /// Accepted only from `Stop`; from any other state the gesture is
    /// silently dropped (no queueing). On acceptance every leaf animates
    /// concurrently and the state settles back to `Stop` once all of them
    /// have finished. If any leaf fails, the settle-back transition is
    /// skipped and the error returned: the tree stays busy and keeps
    /// dropping gestures, which is the known failure mode of the rendering
    /// layer misbehaving.
    pub async fn request_swing(&self, direction: SwingDirection) -> Result<()> {
        {
            let mut state = self.lock_state()?;
            match *state {
                TreeState::Stop => {}
                TreeState::Init | TreeState::Left | TreeState::Right => {
                    tracing::debug!(?direction, state = ?*state, "gesture dropped");
                    return Ok(());
                }
            }
            *state = direction.into();
        }
        tracing::info!(?direction, "swing");

        let Some(registry) = self.inner.registry.get() else {
            // Unreachable: `Stop` is only entered after attach.
            return Ok(());
        };

        let mut swings = JoinSet::new();
        for index in 0..registry.len() {
            let inner = Arc::clone(&self.inner);
            swings.spawn(async move {
                // The registry is immutable once set, so indexing stays valid.
                let leaf = &inner.registry.get().expect("registry is attached").leaves()[index];
                animator::swing(leaf, direction).await
            });
        }

        // Once started, every leaf runs to completion; only afterwards do we
        // decide whether the swing settled cleanly.
        let mut failure = None;
        while let Some(joined) = swings.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(err) => Err(DopplerError::Animation(err.to_string())),
            };
            if let Err(err) = result {
                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }

        if let Some(err) = failure {
            tracing::warn!(%err, ?direction, "swing did not settle");
            return Err(err);
        }

        *self.lock_state()? = TreeState::Stop;
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, TreeState>> {
        self.inner
            .state
            .lock()
            .map_err(|_| DopplerError::msg("tree state has been poisoned"))
    }
}

impl<H: LeafHandle + 'static> Default for DopplerTree<H> {
    fn default() -> Self {
        Self::new()
    }
}
