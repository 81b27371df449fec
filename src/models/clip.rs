use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::config::CaptureConfig;
use super::SessionId;

/// Result of exporting the trailing window of a session's buffer.
///
/// `data` is raw PCM at the configured sample rate/width, in chronological
/// order (oldest byte first). The caller owns persistence and delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub metadata: ClipMetadata,
}

/// Metadata describing an exported clip.
///
/// Serializable so callers can persist it as a JSON sidecar next to the
/// clip bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub id: String,
    pub session_id: SessionId,
    /// Duration the caller asked for, in seconds.
    pub requested_secs: u32,
    /// Actual duration of the returned bytes, in seconds. May be shorter than
    /// requested when the buffer held less audio.
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub bytes_per_sample: u32,
    /// SHA-256 hex digest of the clip bytes.
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

impl AudioClip {
    /// Wrap freshly extracted bytes with metadata derived from them.
    pub fn new(session_id: SessionId, requested_secs: u32, data: Vec<u8>, config: &CaptureConfig) -> Self {
        let metadata = ClipMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            session_id,
            requested_secs,
            duration_secs: data.len() as f64 / config.bytes_per_second() as f64,
            sample_rate: config.sample_rate,
            bytes_per_sample: config.bytes_per_sample,
            checksum: sha256_hex(&data),
            created_at: Utc::now(),
        };
        Self { data, metadata }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// SHA-256 hex digest of a byte slice.
pub(crate) fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn checksum_is_sha256_hex() {
        // Well-known digest of "abc".
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn duration_derived_from_byte_length() {
        let config = CaptureConfig::default();
        // Half a second of audio at 96000 bytes/sec.
        let clip = AudioClip::new(7, 15, vec![0u8; 48_000], &config);

        assert_relative_eq!(clip.metadata.duration_secs, 0.5);
        assert_eq!(clip.metadata.requested_secs, 15);
        assert_eq!(clip.metadata.session_id, 7);
        assert_eq!(clip.metadata.sample_rate, 48_000);
        assert!(!clip.metadata.id.is_empty());
    }

    #[test]
    fn metadata_serde_round_trip() {
        let config = CaptureConfig::default();
        let clip = AudioClip::new(42, 10, vec![1, 2, 3, 4], &config);

        let json = serde_json::to_string(&clip.metadata).unwrap();
        let parsed: ClipMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, clip.metadata);
    }
}
