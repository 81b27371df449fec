use std::collections::VecDeque;

/// Bounded FIFO of opaque audio chunks, evicted by total byte size.
///
/// Chunks keep arrival order; when an append would exceed the byte capacity,
/// whole chunks are dropped from the head until the total fits again. A chunk
/// is never split by eviction.
///
/// The struct itself is single-threaded. For the one-writer/many-readers
/// pattern used by the capture loop and export calls, wrap it in
/// `Arc<parking_lot::Mutex<RollingBuffer>>`; the one lock guards both the
/// chunk deque and the size counter.
#[derive(Debug)]
pub struct RollingBuffer {
    chunks: VecDeque<Vec<u8>>,
    capacity_bytes: usize,
    size_bytes: usize,
}

impl RollingBuffer {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            chunks: VecDeque::new(),
            capacity_bytes,
            size_bytes: 0,
        }
    }

    /// Append a chunk at the tail, evicting oldest chunks as needed.
    ///
    /// A chunk larger than the whole capacity drains the buffer to empty:
    /// it is enqueued and then evicted like any other head chunk, since a
    /// partial chunk is never retained. Empty chunks are ignored.
    pub fn append(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }

        self.size_bytes += chunk.len();
        self.chunks.push_back(chunk);

        while self.size_bytes > self.capacity_bytes {
            match self.chunks.pop_front() {
                Some(evicted) => self.size_bytes -= evicted.len(),
                None => break,
            }
        }
    }

    /// Copy out the most recent `min(max_bytes, size_bytes)` bytes in
    /// chronological order (oldest requested byte first).
    ///
    /// Never mutates the buffer. Asking for more than is buffered returns
    /// everything currently held, short and unpadded.
    pub fn extract_window(&self, max_bytes: usize) -> Vec<u8> {
        let take = max_bytes.min(self.size_bytes);
        if take == 0 {
            return Vec::new();
        }

        // Skip the leading bytes that fall outside the window, walking
        // oldest to newest across chunk boundaries.
        let mut skip = self.size_bytes - take;
        let mut window = Vec::with_capacity(take);
        for chunk in &self.chunks {
            if skip >= chunk.len() {
                skip -= chunk.len();
                continue;
            }
            window.extend_from_slice(&chunk[skip..]);
            skip = 0;
        }

        debug_assert_eq!(window.len(), take);
        window
    }

    /// Total bytes currently retained.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Fixed byte capacity set at construction.
    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    /// Number of chunks currently retained.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bytes 0, 1, 2, ... wrapping at 256, offset by `start`.
    fn patterned(start: usize, len: usize) -> Vec<u8> {
        (start..start + len).map(|i| i as u8).collect()
    }

    #[test]
    fn size_tracks_retained_chunks() {
        let mut buf = RollingBuffer::new(100);

        buf.append(vec![1; 30]);
        assert_eq!(buf.size_bytes(), 30);
        buf.append(vec![2; 50]);
        assert_eq!(buf.size_bytes(), 80);
        assert_eq!(buf.chunk_count(), 2);
        assert!(buf.size_bytes() <= buf.capacity_bytes());
    }

    #[test]
    fn eviction_drops_whole_chunks_from_head() {
        // capacity 100, chunks of 40/40/40: the first chunk must go.
        let mut buf = RollingBuffer::new(100);
        buf.append(vec![0xAA; 40]);
        buf.append(vec![0xBB; 40]);
        buf.append(vec![0xCC; 40]);

        assert_eq!(buf.size_bytes(), 80);
        assert_eq!(buf.chunk_count(), 2);

        let all = buf.extract_window(usize::MAX);
        assert_eq!(&all[..40], &[0xBB; 40][..]);
        assert_eq!(&all[40..], &[0xCC; 40][..]);
    }

    #[test]
    fn oversized_chunk_drains_buffer() {
        let mut buf = RollingBuffer::new(100);
        buf.append(vec![1; 60]);
        buf.append(vec![2; 200]); // larger than capacity

        assert!(buf.is_empty());
        assert_eq!(buf.chunk_count(), 0);
        assert!(buf.extract_window(100).is_empty());
    }

    #[test]
    fn window_spans_chunk_boundary() {
        // [30, 30, 30] buffered; the last 50 bytes are the tail 20 of the
        // middle chunk plus all 30 of the last.
        let mut buf = RollingBuffer::new(1000);
        buf.append(patterned(0, 30));
        buf.append(patterned(30, 30));
        buf.append(patterned(60, 30));

        let window = buf.extract_window(50);
        assert_eq!(window, patterned(40, 50));
    }

    #[test]
    fn window_clamps_to_buffered_bytes() {
        let mut buf = RollingBuffer::new(1000);
        buf.append(patterned(0, 25));

        let window = buf.extract_window(9999);
        assert_eq!(window, patterned(0, 25));
    }

    #[test]
    fn empty_buffer_and_zero_request() {
        let mut buf = RollingBuffer::new(1000);
        assert!(buf.extract_window(1000).is_empty());

        buf.append(patterned(0, 10));
        assert!(buf.extract_window(0).is_empty());
    }

    #[test]
    fn extract_is_idempotent_and_non_mutating() {
        let mut buf = RollingBuffer::new(1000);
        buf.append(patterned(0, 17));
        buf.append(patterned(17, 23));

        let first = buf.extract_window(30);
        let second = buf.extract_window(30);
        assert_eq!(first, second);
        assert_eq!(buf.size_bytes(), 40);
        assert_eq!(buf.chunk_count(), 2);
    }

    #[test]
    fn uneven_chunk_lengths() {
        let mut buf = RollingBuffer::new(64);
        buf.append(patterned(0, 1));
        buf.append(patterned(1, 13));
        buf.append(patterned(14, 7));
        buf.append(patterned(21, 29));

        assert_eq!(buf.size_bytes(), 50);
        assert_eq!(buf.extract_window(36), patterned(14, 36));
    }

    #[test]
    fn empty_chunk_is_ignored() {
        let mut buf = RollingBuffer::new(100);
        buf.append(Vec::new());
        assert!(buf.is_empty());
        assert_eq!(buf.chunk_count(), 0);
    }

    #[test]
    fn twenty_seconds_in_fifteen_second_buffer() {
        // 15 s of 48 kHz 16-bit audio, fed 3840-byte blocks for 20 s.
        let capacity = 48_000 * 2 * 15;
        let block = 3840;
        let total_blocks = 48_000 * 2 * 20 / block; // 500

        let mut buf = RollingBuffer::new(capacity);
        for i in 0..total_blocks {
            buf.append(patterned(i * block, block));
        }

        assert!(buf.size_bytes() <= capacity);

        let window = buf.extract_window(capacity);
        assert_eq!(window.len(), capacity); // exactly 15 seconds

        // The window is the trailing bytes of the logical stream.
        let stream_len = total_blocks * block;
        assert_eq!(window, patterned(stream_len - capacity, capacity));
    }
}
