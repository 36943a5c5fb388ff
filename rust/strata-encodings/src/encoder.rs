//! Plain (uncompressed) chunk encoder for fixed-width numeric values.

use std::{
    borrow::Cow,
    io::{Read, Write},
};

use strata_common::{Error, Result, verify_arg};
use strata_format::{ColumnType, DecimalOverflowValidator, LogicalType};
use strata_io::ChunkBuffer;

use crate::{
    options::EncoderOptions,
    parallel,
    serialization,
    stats::{ChunkStatistics, ChunkStats},
    value::ChunkValue,
};

/// Encodes the values of a single column chunk into its backing buffer and keeps
/// the chunk's statistics up to date.
///
/// Values are stored verbatim in native byte order. The encoder follows a
/// single-writer discipline: all mutating operations take `&mut self`.
pub struct ChunkEncoder<T: ChunkValue> {
    column_type: ColumnType,
    buffer: Box<dyn ChunkBuffer>,
    stats: ChunkStats<T>,
    element_count: u64,
    decimal_validator: DecimalOverflowValidator,
    options: EncoderOptions,
}

impl<T: ChunkValue> ChunkEncoder<T> {
    /// Creates an encoder for a column of `column_type`, writing into `buffer`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `T` is not the storage type of `column_type`.
    pub fn new(
        column_type: ColumnType,
        buffer: Box<dyn ChunkBuffer>,
        options: EncoderOptions,
    ) -> Result<ChunkEncoder<T>> {
        let kind = column_type.element_kind();
        if kind.byte_width() != T::SIZE || kind.is_floating() != T::IS_FLOAT {
            return Err(Error::invalid_arg(
                "column_type",
                format!(
                    "{kind:?} column cannot be stored as {}",
                    std::any::type_name::<T>()
                ),
            ));
        }
        Ok(ChunkEncoder {
            column_type,
            buffer,
            stats: ChunkStats::empty(),
            element_count: 0,
            decimal_validator: DecimalOverflowValidator::new(&column_type),
            options,
        })
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn element_count(&self) -> u64 {
        self.element_count
    }

    pub fn stats(&self) -> &ChunkStats<T> {
        &self.stats
    }

    pub fn buffer(&self) -> &dyn ChunkBuffer {
        self.buffer.as_ref()
    }

    pub fn into_buffer(self) -> Box<dyn ChunkBuffer> {
        self.buffer
    }

    /// Appends `count` values to the chunk, or overwrites `count` values starting at
    /// element `offset`.
    ///
    /// When `replicate` is set, the first element of `values` is written `count` times.
    /// Replication cannot be combined with an `offset`.
    ///
    /// All values are checked against the column's decimal precision before anything
    /// is written; on `DecimalOverflow` neither the buffer nor the statistics change.
    ///
    /// Overwrites fold the new values into the statistics but do not retract the
    /// values they replace, and never shrink the element count.
    pub fn append(
        &mut self,
        values: &[T],
        count: usize,
        replicate: bool,
        offset: Option<u64>,
    ) -> Result<ChunkStatistics> {
        if replicate && offset.is_some() {
            return Err(Error::invalid_arg(
                "replicate",
                "a replicating append cannot overwrite at an offset",
            ));
        }
        if let Some(offset) = offset {
            verify_arg!(offset, offset <= self.element_count);
        }

        let source: Cow<[T]> = if replicate {
            match values.first() {
                Some(&value) => Cow::Owned(vec![value; count]),
                None => {
                    verify_arg!(values, count == 0);
                    Cow::Borrowed(values)
                }
            }
        } else {
            verify_arg!(count, count <= values.len());
            Cow::Borrowed(&values[..count])
        };

        if self.decimal_validator.is_enabled() {
            for value in source.iter().filter(|value| !value.is_null()) {
                self.decimal_validator.validate(ChunkValue::to_i64(*value))?;
            }
        }

        let bytes = bytemuck::cast_slice::<T, u8>(source.as_ref());
        match offset {
            None => {
                self.buffer
                    .append(bytes)
                    .map_err(|e| Error::io("chunk buffer append", e))?;
                self.element_count += count as u64;
            }
            Some(offset) => {
                self.buffer
                    .write_at(offset * T::SIZE as u64, bytes)
                    .map_err(|e| Error::io("chunk buffer write_at", e))?;
                self.element_count = self.element_count.max(offset + count as u64);
            }
        }

        for &value in source.iter() {
            self.stats.observe(value);
        }
        log::trace!(
            "appended {count} values (replicate: {replicate}, offset: {offset:?}), \
             chunk now holds {} elements",
            self.element_count
        );
        Ok(self.get_statistics())
    }

    /// Returns the current statistics, tagged with the column's logical type.
    pub fn get_statistics(&self) -> ChunkStatistics {
        self.get_statistics_for_type(self.column_type.logical_type())
    }

    /// Returns the current statistics, tagged with `logical_type` instead of the
    /// column's own type.
    pub fn get_statistics_for_type(&self, logical_type: LogicalType) -> ChunkStatistics {
        ChunkStatistics::new(logical_type, self.element_count, &self.stats)
    }

    /// Folds a value that is not stored in this chunk into the statistics.
    ///
    /// Values outside the range of `T` saturate at its bounds.
    pub fn update_running_stats_i64(&mut self, value: i64, is_null: bool) {
        if is_null {
            self.stats.has_nulls = true;
        } else {
            self.stats.update_range(T::from_i64(value));
        }
    }

    /// Floating point counterpart of [`update_running_stats_i64`](Self::update_running_stats_i64).
    /// NaN is ignored.
    pub fn update_running_stats_f64(&mut self, value: f64, is_null: bool) {
        if is_null {
            self.stats.has_nulls = true;
        } else if let Some(value) = T::from_f64(value) {
            self.stats.update_range(value);
        }
    }

    /// Folds the statistics of an already encoded range into this chunk's record.
    ///
    /// On a freshly created encoder this amounts to a full recomputation. Large
    /// ranges are processed in parallel, see [`EncoderOptions`].
    pub fn recompute_statistics_over_range(&mut self, bytes: &[u8]) -> Result<()> {
        let range_stats =
            parallel::compute_range_stats::<T>(bytes, &self.decimal_validator, &self.options)?;
        self.stats = self.stats.merge(range_stats);
        Ok(())
    }

    /// Widens this chunk's statistics by those of `other`.
    pub fn merge_from(&mut self, other: &ChunkEncoder<T>) {
        self.merge_stats(&other.stats);
    }

    pub fn merge_stats(&mut self, other: &ChunkStats<T>) {
        self.stats = self.stats.merge(*other);
    }

    /// Copies the element count and the statistics of `source` without touching
    /// the buffer.
    pub fn clone_statistics_from(&mut self, source: &ChunkEncoder<T>) {
        self.element_count = source.element_count;
        self.stats = source.stats;
    }

    /// Replaces min, max and null presence with `candidate`'s values.
    ///
    /// Returns `false` and leaves the record untouched if the values are already
    /// the same, or if a bound of `candidate` cannot be represented in `T`. The
    /// element count and the buffer are never modified.
    pub fn overwrite_statistics(&mut self, candidate: &ChunkStatistics) -> bool {
        let Some(new_stats) = candidate.to_stats::<T>() else {
            log::warn!(
                "ignoring chunk statistics {candidate:?}: bounds do not fit {}",
                std::any::type_name::<T>()
            );
            return false;
        };
        if self.stats.same_as(&new_stats) {
            return false;
        }
        log::debug!(
            "overwriting chunk statistics {:?} with {:?}",
            self.stats,
            new_stats
        );
        self.stats = new_stats;
        true
    }

    pub fn write_statistics<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        serialization::write_stats(sink, self.element_count, &self.stats)
    }

    /// Restores the element count and statistics written by
    /// [`write_statistics`](Self::write_statistics). On error the encoder is unchanged.
    pub fn read_statistics<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        let (element_count, stats) = serialization::read_stats::<T, R>(source)?;
        self.element_count = element_count;
        self.stats = stats;
        Ok(())
    }
}

impl<T: ChunkValue> std::fmt::Debug for ChunkEncoder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkEncoder")
            .field("column_type", &self.column_type)
            .field("element_count", &self.element_count)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
