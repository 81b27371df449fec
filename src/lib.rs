//! # replay-buffer
//!
//! Rolling audio capture core: each session continuously ingests a live
//! byte stream into a fixed-memory rolling window, and callers can export
//! the most recent N seconds of that window at any time without stopping
//! capture.
//!
//! Transport (how a source gets connected) and delivery (what happens to an
//! exported clip) live outside this crate, behind the `AudioSource` /
//! `AudioStream` traits and the `AudioClip` value.
//!
//! ## Architecture
//!
//! ```text
//! replay-buffer
//! ├── traits/       ← AudioSource, AudioStream (source-handle seam)
//! ├── models/       ← CaptureConfig, CaptureError, AudioClip, ClipMetadata
//! ├── processing/   ← RollingBuffer (size-evicting chunk FIFO)
//! ├── session/      ← capture loop + SessionRegistry (join/leave/export)
//! └── storage/      ← clip file + JSON metadata sidecar helpers
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::clip::{AudioClip, ClipMetadata};
pub use models::config::CaptureConfig;
pub use models::error::CaptureError;
pub use models::SessionId;
pub use processing::rolling_buffer::RollingBuffer;
pub use session::registry::SessionRegistry;
pub use traits::audio_source::{AudioSource, AudioStream};
