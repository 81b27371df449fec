//! Per-session capture loop.
//!
//! One dedicated thread per active session pulls blocks from the audio
//! stream and appends them to the session's rolling buffer until the
//! running flag is cleared or the stream can never be opened.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::SessionId;
use crate::processing::rolling_buffer::RollingBuffer;
use crate::traits::audio_source::AudioSource;

/// Body of the capture thread.
///
/// Error containment: a failed stream open ends the loop before any read
/// (the session lives on with an empty buffer); a failed read is logged and
/// the loop continues. Cancellation is cooperative: the flag is checked on
/// every iteration, and `read_block` implementations are expected to return
/// within a bounded time.
pub(crate) fn capture_loop(
    session_id: SessionId,
    mut source: Box<dyn AudioSource>,
    buffer: Arc<Mutex<RollingBuffer>>,
    running: Arc<AtomicBool>,
    block_size: usize,
) {
    let mut stream = match source.open_stream() {
        Ok(stream) => {
            log::info!("audio stream opened for session {}", session_id);
            stream
        }
        Err(e) => {
            log::error!("failed to open audio stream for session {}: {}", session_id, e);
            return;
        }
    };

    let mut block = vec![0u8; block_size];

    while running.load(Ordering::SeqCst) {
        match stream.read_block(&mut block) {
            Ok(0) => {} // nothing available right now
            Ok(n) => {
                let n = n.min(block.len());
                buffer.lock().append(block[..n].to_vec());
            }
            Err(e) => {
                log::warn!("read error on session {}, continuing: {}", session_id, e);
            }
        }
    }

    if let Err(e) = stream.flush() {
        log::warn!("failed to flush audio stream for session {}: {}", session_id, e);
    }
    // Dropping the stream and source releases the connection.
}
