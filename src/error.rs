//! Error type shared by the library and the CLI.

use thiserror::Error;

/// Everything that can go wrong outside the pure layers.
///
/// Cancelling a prompt is not an error: it is [`crate::types::Selection::Cancelled`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The interactive table could not attach to (or drive) the terminal.
    #[error("terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    /// The render thread died before handing back a selection.
    #[error("render thread exited without a selection")]
    RenderThread,

    #[error("could not parse {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize config: {0}")]
    ConfigSerialize(#[source] serde_json::Error),

    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("profile already exists: {0}")]
    DuplicateProfile(String),

    #[error("profile id is reserved: {0}")]
    ReservedProfileId(String),

    #[error("workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("workspace {0} is running (use --force to remove it anyway)")]
    WorkspaceRunning(String),
}

pub type Result<T> = std::result::Result<T, Error>;
