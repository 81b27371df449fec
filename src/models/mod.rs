pub mod clip;
pub mod config;
pub mod error;

/// Stable identifier of an audio source (e.g. a voice channel id).
pub type SessionId = u64;
