//! Thread-local scratch buffers for the compression paths.
//!
//! A pooled buffer keeps the capacity it grew to, so a thread that compresses
//! payloads of similar size stops allocating scratch space after the first
//! call. The finished stream is copied out once with [`Buffer::to_bytes`]:
//! the returned [`Bytes`] must own its allocation while the scratch `Vec`
//! goes back to the pool. Buffers that grew past `2 * DEFAULT_BUFFER_SIZE`
//! are dropped instead of pooled, so large payloads pay a plain allocation.
//! The `compression` group in `benches/codec_bench.rs` measures this path.

use std::cell::RefCell;
use std::io::{self, Write};

use bytes::Bytes;

/// Capacity given to freshly allocated scratch buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024; // 64 KiB

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable byte buffer, returned to the per-thread pool on drop.
///
/// Implements [`Write`] so a `flate2` encoder can use it as its sink.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            match pool.pop() {
                Some(data) => Self { data },
                None => Self {
                    data: Vec::with_capacity(DEFAULT_BUFFER_SIZE),
                },
            }
        })
    }

    /// The backing `Vec`, for decoders that write into its spare capacity.
    pub fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Copies the buffered bytes out into an owned [`Bytes`].
    ///
    /// The copy is what lets the scratch allocation return to the pool on
    /// drop; handing the `Vec` itself to `Bytes` would empty the pool.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        // Large one-off payloads would pin memory for the life of the thread.
        if self.data.capacity() <= DEFAULT_BUFFER_SIZE * 2 {
            self.data.clear();
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take() {
        let buf = Buffer::take();
        assert!(buf.data.capacity() >= DEFAULT_BUFFER_SIZE);
        assert!(buf.data.is_empty());
    }

    #[test]
    fn test_write_and_copy_out() {
        let mut buf = Buffer::take();
        buf.write_all(b"hello ").unwrap();
        buf.write_all(b"world").unwrap();
        assert_eq!(buf.to_bytes(), Bytes::from_static(b"hello world"));
    }

    #[test]
    fn test_copied_bytes_outlive_reused_buffer() {
        let first = {
            let mut buf = Buffer::take();
            buf.write_all(b"first payload").unwrap();
            buf.to_bytes()
        };

        // Reusing the pooled allocation must not disturb earlier output
        let mut buf = Buffer::take();
        buf.write_all(b"second").unwrap();
        assert_eq!(first, Bytes::from_static(b"first payload"));
        assert_eq!(buf.to_bytes(), Bytes::from_static(b"second"));
    }

    #[test]
    fn test_vec_writes_are_visible() {
        let mut buf = Buffer::take();
        buf.as_mut_vec().extend_from_slice(b"decoded");
        assert_eq!(buf.data.len(), 7);
        assert_eq!(buf.to_bytes(), Bytes::from_static(b"decoded"));
    }

    #[test]
    fn test_buffer_reuse_is_cleared() {
        {
            let mut buf = Buffer::take();
            buf.write_all(b"test data").unwrap();
        }

        let buf2 = Buffer::take();
        assert!(buf2.data.is_empty());
        assert!(buf2.data.capacity() >= DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_oversized_buffer_not_pooled() {
        {
            let mut buf = Buffer::take();
            buf.write_all(&vec![0u8; DEFAULT_BUFFER_SIZE * 4]).unwrap();
        }

        // The pool may still hold smaller buffers from other tests on this
        // thread, but never the oversized one.
        let buf = Buffer::take();
        assert!(buf.data.capacity() <= DEFAULT_BUFFER_SIZE * 2);
    }
}
