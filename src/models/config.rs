use serde::{Deserialize, Serialize};

/// Configuration for the session registry and its capture loops.
///
/// The defaults describe the audio the transport layer delivers in practice:
/// 48 kHz 16-bit PCM, read in ~20 ms blocks, buffered for the last 15 seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Samples per second of the incoming stream (default: 48000).
    pub sample_rate: u32,

    /// Bytes per sample (default: 2 for 16-bit PCM). Valid values: 1..=4.
    pub bytes_per_sample: u32,

    /// How many seconds of trailing audio each session retains (default: 15).
    pub max_buffer_secs: u32,

    /// Read block size in bytes (default: 3840, ~20 ms at 48 kHz 16-bit stereo).
    pub read_block_bytes: usize,
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if !(1..=4).contains(&self.bytes_per_sample) {
            return Err(format!("unsupported bytes per sample: {}", self.bytes_per_sample));
        }
        if self.max_buffer_secs == 0 {
            return Err("buffer duration must be positive".into());
        }
        if self.read_block_bytes == 0 {
            return Err("read block size must be positive".into());
        }
        Ok(())
    }

    /// Bytes of audio per second of wall time.
    pub fn bytes_per_second(&self) -> usize {
        self.sample_rate as usize * self.bytes_per_sample as usize
    }

    /// Rolling buffer capacity in bytes for one session.
    pub fn capacity_bytes(&self) -> usize {
        self.bytes_per_second() * self.max_buffer_secs as usize
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            bytes_per_sample: 2,
            max_buffer_secs: 15,
            read_block_bytes: 3840,
        }
    }
}
