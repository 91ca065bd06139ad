use anchorage_core::ViewId;
use thiserror::Error;

/// Failure of a facade operation.
///
/// Errors raised by the engine while expanding visual format strings are not
/// wrapped here; they surface as the engine's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The operation needs a reference view, none was given and the subject
    /// view is not attached to a parent.
    #[error("{view} has no parent and no explicit target was given")]
    MissingTarget { view: ViewId },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid layout configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("`self_key` must not be empty")]
    EmptySelfKey,
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
