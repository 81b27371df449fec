use thiserror::Error;

use super::SessionId;

/// Errors that can occur during capture and export operations.
///
/// None of these are fatal to the process or to other sessions: connect and
/// stream failures are scoped to one `join`/session, read failures are
/// contained inside the capture loop, and `NoActiveSession` is an ordinary
/// recoverable condition for callers racing against `leave`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The registry was handed a configuration that fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source factory could not produce a connected source
    /// (e.g. transport timeout, permission). No session is created and no
    /// automatic retry is attempted.
    #[error("failed to connect audio source: {0}")]
    ConnectFailed(String),

    /// A connected source could not open a readable stream at capture start.
    /// The session stays registered with an empty buffer until left.
    #[error("failed to open audio stream: {0}")]
    StreamCreateFailed(String),

    /// A single read attempt failed. The capture loop logs this and keeps
    /// going; it never terminates the session.
    #[error("audio stream read failed: {0}")]
    ReadFailed(String),

    /// No session is registered under the given id.
    #[error("no active capture session for id {0}")]
    NoActiveSession(SessionId),

    /// Clip or metadata file I/O failed.
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}
