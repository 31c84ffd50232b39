//! Core library for the Doppler Tree installation.
//!
//! A decorative tree reacts to a doppler-style stereo signal by swinging its
//! leaves. The crate owns the whole signal-to-gesture pipeline: raw
//! left/right bandwidth samples are filtered, debounced into batches,
//! classified into a discrete gesture, and fed to a state machine that
//! serializes the leaf animations. The sampler and the vector-graphics
//! layer are external collaborators; the [`render`] module pins down the
//! interface the pipeline needs from the latter.

pub mod animator;
pub mod debounce;
pub mod error;
pub mod gesture;
pub mod leaves;
pub mod pipeline;
pub mod render;
pub mod signal;
pub mod tree;

pub use animator::SWING_DURATION;
pub use debounce::{DebounceAggregator, QUIET_PERIOD};
pub use error::{DopplerError, Result};
pub use gesture::{classify, Gesture, SwingDirection, MIN_EVIDENCE};
pub use leaves::{Leaf, LeafDescriptor, LeafRegistry, RotateParams};
pub use render::{Easing, LeafHandle, Matrix, SvgDocument};
pub use signal::{BandwidthSample, NOISE_THRESHOLD};
pub use tree::{DopplerTree, TreeState};
