//! Implementations of `ChunkBuffer` for memory buffers.

use std::{
    ops::Range,
    sync::{Arc, RwLock},
};

use crate::{ChunkBuffer, verify};

impl ChunkBuffer for Vec<u8> {
    fn size(&self) -> std::io::Result<u64> {
        Ok(self.len() as u64)
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        verify!(range.end >= range.start);
        let start = range.start as usize;
        let end = std::cmp::min(range.end as usize, self.len());
        if start >= end {
            return Ok(Vec::new());
        }
        Ok(self[start..end].to_vec())
    }

    fn append(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn write_at(&mut self, pos: u64, buf: &[u8]) -> std::io::Result<()> {
        let pos = pos as usize;
        let end_pos = pos + buf.len();

        if end_pos > self.len() {
            self.reserve(end_pos - self.len());
        }

        if pos > self.len() {
            self.resize(pos, 0);
            self.extend_from_slice(buf);
        } else if end_pos <= self.len() {
            self[pos..end_pos].copy_from_slice(buf);
        } else {
            self.truncate(pos);
            self.extend_from_slice(buf);
        }
        Ok(())
    }
}

/// A cloneable handle to an in-memory chunk buffer.
///
/// All clones observe the same bytes, so a caller may hand one handle to an encoder
/// and keep another for inspecting the encoded content.
#[derive(Debug, Clone, Default)]
pub struct SharedChunkBuffer(Arc<RwLock<Vec<u8>>>);

impl SharedChunkBuffer {
    pub fn new() -> SharedChunkBuffer {
        Default::default()
    }

    /// Returns a copy of the current content.
    pub fn to_vec(&self) -> std::io::Result<Vec<u8>> {
        let guard = self.0.read().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }
}

impl ChunkBuffer for SharedChunkBuffer {
    fn size(&self) -> std::io::Result<u64> {
        self.0.read().map_err(|_| poisoned())?.size()
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        self.0.read().map_err(|_| poisoned())?.read_at(range)
    }

    fn append(&mut self, buf: &[u8]) -> std::io::Result<()> {
        let mut guard = self.0.write().map_err(|_| poisoned())?;
        ChunkBuffer::append(&mut *guard, buf)
    }

    fn write_at(&mut self, pos: u64, buf: &[u8]) -> std::io::Result<()> {
        self.0.write().map_err(|_| poisoned())?.write_at(pos, buf)
    }
}

#[cold]
fn poisoned() -> std::io::Error {
    std::io::Error::other("chunk buffer lock poisoned")
}

#[cfg(test)]
mod tests {
    use crate::{ChunkBuffer, SharedChunkBuffer};

    #[test]
    fn test_mem_append() {
        let mut buffer = Vec::<u8>::new();
        // `Vec::append` shadows the trait method.
        ChunkBuffer::append(&mut buffer, b"abcd").unwrap();
        ChunkBuffer::append(&mut buffer, b"123").unwrap();
        assert_eq!(buffer, b"abcd123");
        assert_eq!(buffer.size().unwrap(), 7);
    }

    #[test]
    fn test_mem_write_at() {
        let mut buffer = b"abcd123".to_vec();
        buffer.write_at(1, b"XY").unwrap();
        assert_eq!(buffer, b"aXYd123");

        buffer.write_at(6, b"!!").unwrap();
        assert_eq!(buffer, b"aXYd12!!");

        buffer.write_at(10, b"z").unwrap();
        assert_eq!(buffer, b"aXYd12!!\0\0z");
    }

    #[test]
    fn test_mem_read_at() {
        let blob = b"abcd123".to_vec();
        assert_eq!(blob.read_at(1..3).unwrap(), b"bc");
        assert_eq!(blob.read_at(4..200).unwrap(), b"123");
        assert!(blob.read_at(10..20).unwrap().is_empty());
        assert!(blob.read_at(3..1).is_err());
    }

    #[test]
    fn test_shared_buffer() {
        let reader = SharedChunkBuffer::new();
        let mut writer = reader.clone();
        writer.append(&[1, 2, 3]).unwrap();
        writer.write_at(1, &[9]).unwrap();
        assert_eq!(reader.to_vec().unwrap(), vec![1, 9, 3]);
        assert_eq!(reader.size().unwrap(), 3);

        let boxed: Box<dyn ChunkBuffer> = Box::new(writer);
        assert_eq!(boxed.read_at(0..2).unwrap(), vec![1, 9]);
    }
}
