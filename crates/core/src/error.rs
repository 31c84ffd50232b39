/// Result alias that carries the custom [`DopplerError`] type.
pub type Result<T> = std::result::Result<T, DopplerError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum DopplerError {
    /// The leaf geometry document could not be parsed.
    #[error("invalid leaf data: {0}")]
    LeafData(#[from] serde_json::Error),
    /// A leaf descriptor referenced an element id the vector document does
    /// not contain.
    #[error("no element `{0}` in the tree document")]
    MissingElement(String),
    /// A rendering backend failed to complete an animation phase.
    #[error("leaf animation failed: {0}")]
    Animation(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Catch-all for conditions that do not warrant their own variant, such
    /// as poisoned locks.
    #[error("{0}")]
    Message(String),
}

impl DopplerError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}
