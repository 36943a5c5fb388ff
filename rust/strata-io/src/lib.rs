//! Backing storage for encoded chunks.
//!
//! - `ChunkBuffer`: append-mostly byte storage that also supports positional overwrites.
//!
//! Provides two in-memory implementations: a plain `Vec<u8>` and a cloneable
//! `SharedChunkBuffer` handle.

use std::ops::Range;

pub mod memory;

pub use memory::SharedChunkBuffer;

/// A trait representing the encoded byte storage of a single chunk.
///
/// The common case is appending at the end; updates overwrite an existing byte
/// range in place through [`write_at`](ChunkBuffer::write_at).
pub trait ChunkBuffer: Send + Sync + 'static {
    /// Returns the current size of the buffer in bytes.
    fn size(&self) -> std::io::Result<u64>;

    /// Reads a specified range of bytes from the buffer.
    ///
    /// The returned vector may be shorter than requested if the range extends
    /// beyond the end of the buffer.
    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>>;

    /// Appends `buf` to the end of the buffer.
    ///
    /// **NOTE**: `append` should not return with a short write, upon success the
    /// entire buffer is written.
    fn append(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Writes `buf` at the specified position, expanding the buffer if necessary.
    /// A gap between the current end and `pos` is zero-filled.
    fn write_at(&mut self, pos: u64, buf: &[u8]) -> std::io::Result<()>;
}

impl<T> ChunkBuffer for Box<T>
where
    T: ChunkBuffer + ?Sized,
{
    fn size(&self) -> std::io::Result<u64> {
        self.as_ref().size()
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        self.as_ref().read_at(range)
    }

    fn append(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.as_mut().append(buf)
    }

    fn write_at(&mut self, pos: u64, buf: &[u8]) -> std::io::Result<()> {
        self.as_mut().write_at(pos, buf)
    }
}

#[macro_export]
macro_rules! verify {
    ($expr:expr) => {{
        let result = $expr;
        if !result {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                concat!("verify failed: ", stringify!($expr)),
            ));
        }
    }};
}
