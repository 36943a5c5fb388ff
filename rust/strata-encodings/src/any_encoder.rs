//! Chunk encoder over the closed set of element kinds.

use std::io::{Read, Write};

use strata_common::{Error, Result, verify_arg};
use strata_format::{ColumnType, ElementKind, LogicalType};
use strata_io::ChunkBuffer;

use crate::{
    encoder::ChunkEncoder,
    options::EncoderOptions,
    stats::ChunkStatistics,
    value::ChunkValue,
};

/// A chunk encoder tagged with its element kind.
///
/// Operations that combine two encoders (`merge_from`, `clone_statistics_from`)
/// require both to carry the same tag.
#[derive(Debug)]
pub enum AnyChunkEncoder {
    Boolean(ChunkEncoder<i8>),
    Int8(ChunkEncoder<i8>),
    Int16(ChunkEncoder<i16>),
    Int32(ChunkEncoder<i32>),
    Int64(ChunkEncoder<i64>),
    Float32(ChunkEncoder<f32>),
    Float64(ChunkEncoder<f64>),
}

macro_rules! dispatch {
    ($self:expr, $encoder:ident => $body:expr) => {
        match $self {
            AnyChunkEncoder::Boolean($encoder) => $body,
            AnyChunkEncoder::Int8($encoder) => $body,
            AnyChunkEncoder::Int16($encoder) => $body,
            AnyChunkEncoder::Int32($encoder) => $body,
            AnyChunkEncoder::Int64($encoder) => $body,
            AnyChunkEncoder::Float32($encoder) => $body,
            AnyChunkEncoder::Float64($encoder) => $body,
        }
    };
}

macro_rules! dispatch_pair {
    ($lhs:expr, $rhs:expr, $a:ident, $b:ident => $body:expr) => {
        match ($lhs, $rhs) {
            (AnyChunkEncoder::Boolean($a), AnyChunkEncoder::Boolean($b)) => Ok($body),
            (AnyChunkEncoder::Int8($a), AnyChunkEncoder::Int8($b)) => Ok($body),
            (AnyChunkEncoder::Int16($a), AnyChunkEncoder::Int16($b)) => Ok($body),
            (AnyChunkEncoder::Int32($a), AnyChunkEncoder::Int32($b)) => Ok($body),
            (AnyChunkEncoder::Int64($a), AnyChunkEncoder::Int64($b)) => Ok($body),
            (AnyChunkEncoder::Float32($a), AnyChunkEncoder::Float32($b)) => Ok($body),
            (AnyChunkEncoder::Float64($a), AnyChunkEncoder::Float64($b)) => Ok($body),
            (lhs, rhs) => Err(Error::invalid_arg(
                "other",
                format!(
                    "cannot combine {:?} chunk statistics with {:?}",
                    lhs.element_kind(),
                    rhs.element_kind()
                ),
            )),
        }
    };
}

impl AnyChunkEncoder {
    /// Creates the encoder variant matching the storage kind of `column_type`.
    pub fn new(
        column_type: ColumnType,
        buffer: Box<dyn ChunkBuffer>,
        options: EncoderOptions,
    ) -> Result<AnyChunkEncoder> {
        Ok(match column_type.element_kind() {
            ElementKind::Boolean => {
                AnyChunkEncoder::Boolean(ChunkEncoder::new(column_type, buffer, options)?)
            }
            ElementKind::Int8 => {
                AnyChunkEncoder::Int8(ChunkEncoder::new(column_type, buffer, options)?)
            }
            ElementKind::Int16 => {
                AnyChunkEncoder::Int16(ChunkEncoder::new(column_type, buffer, options)?)
            }
            ElementKind::Int32 => {
                AnyChunkEncoder::Int32(ChunkEncoder::new(column_type, buffer, options)?)
            }
            ElementKind::Int64 => {
                AnyChunkEncoder::Int64(ChunkEncoder::new(column_type, buffer, options)?)
            }
            ElementKind::Float32 => {
                AnyChunkEncoder::Float32(ChunkEncoder::new(column_type, buffer, options)?)
            }
            ElementKind::Float64 => {
                AnyChunkEncoder::Float64(ChunkEncoder::new(column_type, buffer, options)?)
            }
        })
    }

    pub fn element_kind(&self) -> ElementKind {
        match self {
            AnyChunkEncoder::Boolean(_) => ElementKind::Boolean,
            AnyChunkEncoder::Int8(_) => ElementKind::Int8,
            AnyChunkEncoder::Int16(_) => ElementKind::Int16,
            AnyChunkEncoder::Int32(_) => ElementKind::Int32,
            AnyChunkEncoder::Int64(_) => ElementKind::Int64,
            AnyChunkEncoder::Float32(_) => ElementKind::Float32,
            AnyChunkEncoder::Float64(_) => ElementKind::Float64,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        dispatch!(self, e => e.column_type())
    }

    pub fn element_count(&self) -> u64 {
        dispatch!(self, e => e.element_count())
    }

    pub fn buffer(&self) -> &dyn ChunkBuffer {
        dispatch!(self, e => e.buffer())
    }

    /// Appends raw elements given as native-endian bytes.
    ///
    /// `bytes` must hold at least `count` elements (at least one when `replicate`
    /// is set and `count > 0`). See [`ChunkEncoder::append`] for the semantics.
    pub fn append_bytes(
        &mut self,
        bytes: &[u8],
        count: usize,
        replicate: bool,
        offset: Option<u64>,
    ) -> Result<ChunkStatistics> {
        dispatch!(self, e => append_raw(e, bytes, count, replicate, offset))
    }

    pub fn get_statistics(&self) -> ChunkStatistics {
        dispatch!(self, e => e.get_statistics())
    }

    pub fn get_statistics_for_type(&self, logical_type: LogicalType) -> ChunkStatistics {
        dispatch!(self, e => e.get_statistics_for_type(logical_type))
    }

    pub fn update_running_stats_i64(&mut self, value: i64, is_null: bool) {
        dispatch!(self, e => e.update_running_stats_i64(value, is_null))
    }

    pub fn update_running_stats_f64(&mut self, value: f64, is_null: bool) {
        dispatch!(self, e => e.update_running_stats_f64(value, is_null))
    }

    pub fn recompute_statistics_over_range(&mut self, bytes: &[u8]) -> Result<()> {
        dispatch!(self, e => e.recompute_statistics_over_range(bytes))
    }

    /// Widens this chunk's statistics by those of `other`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `other` has a different element kind.
    pub fn merge_from(&mut self, other: &AnyChunkEncoder) -> Result<()> {
        dispatch_pair!(self, other, a, b => a.merge_from(b))
    }

    /// Copies the element count and statistics of `source`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `source` has a different element kind.
    pub fn clone_statistics_from(&mut self, source: &AnyChunkEncoder) -> Result<()> {
        dispatch_pair!(self, source, a, b => a.clone_statistics_from(b))
    }

    pub fn overwrite_statistics(&mut self, candidate: &ChunkStatistics) -> bool {
        dispatch!(self, e => e.overwrite_statistics(candidate))
    }

    pub fn write_statistics<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        dispatch!(self, e => e.write_statistics(sink))
    }

    pub fn read_statistics<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        dispatch!(self, e => e.read_statistics(source))
    }
}

fn append_raw<T: ChunkValue>(
    encoder: &mut ChunkEncoder<T>,
    bytes: &[u8],
    count: usize,
    replicate: bool,
    offset: Option<u64>,
) -> Result<ChunkStatistics> {
    let available = bytes.len() / T::SIZE;
    let needed = if replicate { count.min(1) } else { count };
    verify_arg!(bytes, needed <= available);
    let values = bytes[..needed * T::SIZE]
        .chunks_exact(T::SIZE)
        .map(T::read_from)
        .collect::<Vec<_>>();
    encoder.append(&values, count, replicate, offset)
}
