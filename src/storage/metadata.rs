//! Persistence helpers for exported clips.
//!
//! The buffer and session paths do no I/O of their own; these functions are
//! the bridge for callers that persist a clip before uploading it.

use std::fs;
use std::path::Path;

use crate::models::clip::{AudioClip, ClipMetadata};
use crate::models::error::CaptureError;

/// Write a clip's raw bytes to `clip_path` and its metadata as a JSON
/// sidecar at `{clip_path}.metadata.json`.
pub fn write_clip(clip: &AudioClip, clip_path: &Path) -> Result<(), CaptureError> {
    fs::write(clip_path, &clip.data)
        .map_err(|e| CaptureError::StorageError(format!("failed to write clip: {}", e)))?;
    write_metadata(&clip.metadata, clip_path)
}

/// Write clip metadata as a JSON sidecar next to the clip file.
pub fn write_metadata(metadata: &ClipMetadata, clip_path: &Path) -> Result<(), CaptureError> {
    let metadata_path = clip_path.with_extension("metadata.json");
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| CaptureError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&metadata_path, json)
        .map_err(|e| CaptureError::StorageError(format!("failed to write metadata: {}", e)))?;
    Ok(())
}

/// Read clip metadata back from its JSON sidecar.
pub fn read_metadata(clip_path: &Path) -> Result<ClipMetadata, CaptureError> {
    let metadata_path = clip_path.with_extension("metadata.json");
    let json = fs::read_to_string(&metadata_path)
        .map_err(|e| CaptureError::StorageError(format!("failed to read metadata: {}", e)))?;
    let metadata: ClipMetadata = serde_json::from_str(&json)
        .map_err(|e| CaptureError::StorageError(format!("failed to parse metadata: {}", e)))?;
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CaptureConfig;
    use std::path::PathBuf;

    fn temp_clip_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("replay_buffer_test_{}.pcm", name))
    }

    #[test]
    fn clip_and_sidecar_round_trip() {
        let path = temp_clip_path("round_trip");
        let config = CaptureConfig::default();
        let clip = AudioClip::new(3, 5, vec![1, 2, 3, 4, 5], &config);

        write_clip(&clip, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), clip.data);
        let metadata = read_metadata(&path).unwrap();
        assert_eq!(metadata, clip.metadata);

        fs::remove_file(&path).ok();
        fs::remove_file(path.with_extension("metadata.json")).ok();
    }

    #[test]
    fn missing_sidecar_is_a_storage_error() {
        let path = temp_clip_path("missing");
        assert!(matches!(
            read_metadata(&path),
            Err(CaptureError::StorageError(_))
        ));
    }
}
