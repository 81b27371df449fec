//! Session lifecycle: at most one live capture per source id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::models::clip::AudioClip;
use crate::models::config::CaptureConfig;
use crate::models::error::CaptureError;
use crate::models::SessionId;
use crate::processing::rolling_buffer::RollingBuffer;
use crate::session::capture::capture_loop;
use crate::traits::audio_source::AudioSource;

/// One live session: its buffer, its capture thread, and the flag that
/// stops it.
struct SessionEntry {
    buffer: Arc<Mutex<RollingBuffer>>,
    running: Arc<AtomicBool>,
    worker: thread::JoinHandle<()>,
}

impl SessionEntry {
    /// Signal cancellation and wait for the capture thread to exit. After
    /// this returns, nothing can append to the session's buffer anymore.
    fn stop(self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.worker.join();
    }
}

/// Registry of active capture sessions, keyed by source id.
///
/// `join`, `leave` and `export` may be called concurrently from any thread;
/// the registry map is guarded by one mutex, and each session's buffer by
/// its own. Joins for the same id have exactly one winner; a lookup during a
/// concurrent `leave` sees the session either fully present or fully absent.
pub struct SessionRegistry {
    config: CaptureConfig,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

impl SessionRegistry {
    /// Create a registry after validating the configuration.
    pub fn new(config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::InvalidConfig)?;
        Ok(Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// The most audio a session can ever buffer, in seconds.
    pub fn max_buffer_duration_secs(&self) -> u32 {
        (self.config.capacity_bytes() / self.config.bytes_per_second()) as u32
    }

    /// Start capturing from a new source, or do nothing if a session for
    /// `id` is already active (the factory is not invoked again).
    ///
    /// The registry lock is held across the whole call, so concurrent joins
    /// for one id produce exactly one session.
    pub fn join<F>(&self, id: SessionId, connect: F) -> Result<(), CaptureError>
    where
        F: FnOnce() -> Result<Box<dyn AudioSource>, CaptureError>,
    {
        let mut sessions = self.sessions.lock();
        if sessions.contains_key(&id) {
            log::debug!("session {} already active, join is a no-op", id);
            return Ok(());
        }

        let source = connect()?;
        let buffer = Arc::new(Mutex::new(RollingBuffer::new(self.config.capacity_bytes())));
        let running = Arc::new(AtomicBool::new(true));
        let block_size = self.config.read_block_bytes;

        let worker = {
            let buffer = Arc::clone(&buffer);
            let running = Arc::clone(&running);
            thread::Builder::new()
                .name(format!("capture-session-{}", id))
                .spawn(move || capture_loop(id, source, buffer, running, block_size))
                .map_err(|e| CaptureError::Unknown(format!("failed to spawn capture thread: {}", e)))?
        };

        sessions.insert(
            id,
            SessionEntry {
                buffer,
                running,
                worker,
            },
        );
        log::info!("capture session {} started", id);
        Ok(())
    }

    /// Stop the session for `id`, waiting for its capture thread to exit.
    ///
    /// The entry is removed under the registry lock first, so concurrent
    /// lookups never observe a half-torn-down session; the thread join then
    /// happens outside the lock. Returns `NoActiveSession` if `id` is not
    /// registered.
    pub fn leave(&self, id: SessionId) -> Result<(), CaptureError> {
        let entry = self
            .sessions
            .lock()
            .remove(&id)
            .ok_or(CaptureError::NoActiveSession(id))?;
        entry.stop();
        log::info!("capture session {} stopped", id);
        Ok(())
    }

    /// Stop every active session. Used on shutdown.
    pub fn leave_all(&self) {
        let entries: Vec<(SessionId, SessionEntry)> = self.sessions.lock().drain().collect();
        for (id, entry) in entries {
            entry.stop();
            log::info!("capture session {} stopped", id);
        }
    }

    /// Snapshot the most recent `duration_secs` of the session's buffer,
    /// without interrupting capture.
    ///
    /// The result may be shorter than requested when less audio is buffered;
    /// callers that need a hard cap should clamp `duration_secs` to
    /// [`max_buffer_duration_secs`](Self::max_buffer_duration_secs) first,
    /// but nothing here assumes they did.
    pub fn export(&self, id: SessionId, duration_secs: u32) -> Result<AudioClip, CaptureError> {
        let buffer = self.buffer_for(id).ok_or(CaptureError::NoActiveSession(id))?;
        let window_bytes = self
            .config
            .bytes_per_second()
            .saturating_mul(duration_secs as usize);
        let data = buffer.lock().extract_window(window_bytes);
        Ok(AudioClip::new(id, duration_secs, data, &self.config))
    }

    /// Whether a session is currently registered for `id`.
    pub fn is_active(&self, id: SessionId) -> bool {
        self.sessions.lock().contains_key(&id)
    }

    /// Ids of all currently registered sessions.
    pub fn active_sessions(&self) -> Vec<SessionId> {
        self.sessions.lock().keys().copied().collect()
    }

    /// Bytes currently buffered for `id`.
    pub fn buffered_bytes(&self, id: SessionId) -> Result<usize, CaptureError> {
        let buffer = self.buffer_for(id).ok_or(CaptureError::NoActiveSession(id))?;
        let size = buffer.lock().size_bytes();
        Ok(size)
    }

    fn buffer_for(&self, id: SessionId) -> Option<Arc<Mutex<RollingBuffer>>> {
        self.sessions.lock().get(&id).map(|entry| Arc::clone(&entry.buffer))
    }
}

impl Drop for SessionRegistry {
    fn drop(&mut self) {
        for (_, entry) in self.sessions.get_mut().drain() {
            entry.stop();
        }
    }
}
