use crate::models::error::CaptureError;

/// A connected handle to a live audio source.
///
/// Produced by the source factory passed to `SessionRegistry::join` and owned
/// by the session's capture loop for its lifetime. Whatever the connection
/// holds (sockets, transports) is released when the handle is dropped.
pub trait AudioSource: Send {
    /// Open the readable stream behind this source.
    ///
    /// Called once, at capture start. Failure leaves the session registered
    /// but capture-less (`CaptureError::StreamCreateFailed`).
    fn open_stream(&mut self) -> Result<Box<dyn AudioStream>, CaptureError>;
}

/// A readable audio stream delivering opaque byte blocks.
pub trait AudioStream: Send {
    /// Read the next block into `buf`, returning the byte count.
    ///
    /// `Ok(0)` means "nothing available right now", not an error and not end
    /// of stream; the capture loop simply tries again. Implementations should
    /// bound how long a call blocks (e.g. an internal timeout that returns
    /// `Ok(0)`) so that cooperative cancellation is observed promptly.
    fn read_block(&mut self, buf: &mut [u8]) -> Result<usize, CaptureError>;

    /// Flush any outstanding stream state. Called exactly once when capture
    /// ends, before the stream is dropped.
    fn flush(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}
