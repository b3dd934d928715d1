//! Error types for the hook stream.

use thiserror::Error;

/// Result type alias for hookcast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hooking input or encoding signals.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing to or reading from the signal stream failed.
    #[error("stream i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended in the middle of a record.
    #[error("stream ended inside a {0} record")]
    UnexpectedEof(&'static str),

    /// The kind byte does not name a known signal.
    #[error("unknown signal kind: {0}")]
    UnknownKind(u8),

    /// A window title record is not length-prefixed and zero-terminated.
    #[error("malformed window title: {0}")]
    MalformedTitle(String),

    /// A window title has more code units than the length field can carry.
    #[error("window title too long: {0} code units")]
    TitleTooLong(usize),

    /// A title buffer could not be allocated.
    #[error("failed to allocate title buffer")]
    Allocation,

    /// The OS declined to install a hook.
    #[error("failed to start hook: {0}")]
    HookStartFailed(String),

    /// The OS failed to remove a hook.
    #[error("failed to stop hook: {0}")]
    HookStopFailed(String),

    /// The host window could not be created.
    #[error("failed to create host window: {0}")]
    WindowCreationFailed(String),

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),

    /// The requested feature is not supported on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),
}
