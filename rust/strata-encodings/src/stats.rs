//! Chunk statistics: running min/max and null presence.

use std::cmp::Ordering;

use strata_format::{ElementKind, LogicalType};

use crate::value::ChunkValue;

/// A statistics value tagged with its storage type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
}

impl StatValue {
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            StatValue::Int8(v) => Some(v as i64),
            StatValue::Int16(v) => Some(v as i64),
            StatValue::Int32(v) => Some(v as i64),
            StatValue::Int64(v) => Some(v),
            StatValue::Float32(_) | StatValue::Float64(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            StatValue::Float32(v) => Some(v as f64),
            StatValue::Float64(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric order across variants. Integers compare exactly; any comparison
    /// involving a float uses IEEE `totalOrder` on the widened `f64` values.
    fn bound_cmp(&self, other: &StatValue) -> Ordering {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.widened().total_cmp(&other.widened()),
        }
    }

    fn widened(&self) -> f64 {
        match *self {
            StatValue::Int8(v) => v as f64,
            StatValue::Int16(v) => v as f64,
            StatValue::Int32(v) => v as f64,
            StatValue::Int64(v) => v as f64,
            StatValue::Float32(v) => v as f64,
            StatValue::Float64(v) => v,
        }
    }
}

/// Running statistics over the values of a chunk.
///
/// An empty record holds `min = T::MAX_VALUE` and `max = T::LOWEST` (`+inf` and
/// `-inf` for floats); these are placeholders and carry no meaning until
/// [`has_range`](Self::has_range) is `true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkStats<T> {
    pub min: T,
    pub max: T,
    pub has_nulls: bool,
}

impl<T: ChunkValue> ChunkStats<T> {
    pub fn empty() -> ChunkStats<T> {
        ChunkStats {
            min: T::MAX_VALUE,
            max: T::LOWEST,
            has_nulls: false,
        }
    }

    /// Computes the statistics of `values` in a single sequential pass.
    pub fn from_values(values: &[T]) -> ChunkStats<T> {
        let mut stats = ChunkStats::empty();
        for &value in values {
            stats.observe(value);
        }
        stats
    }

    /// Returns `true` once at least one non-null, non-NaN value has been folded in.
    pub fn has_range(&self) -> bool {
        self.min.value_cmp(&self.max) != Ordering::Greater
    }

    /// Folds one stored element: the null sentinel sets `has_nulls`, anything else
    /// extends the range.
    #[inline]
    pub fn observe(&mut self, value: T) {
        if value.is_null() {
            self.has_nulls = true;
        } else {
            self.update_range(value);
        }
    }

    /// Extends `[min, max]` to include `value`. NaN is ignored.
    #[inline]
    pub fn update_range(&mut self, value: T) {
        if value.is_nan() {
            return;
        }
        self.min = min_of(self.min, value);
        self.max = max_of(self.max, value);
    }

    /// Combines two records. Associative and commutative, so any partitioning of a
    /// range and any merge order produce the same result.
    pub fn merge(self, other: ChunkStats<T>) -> ChunkStats<T> {
        ChunkStats {
            min: min_of(self.min, other.min),
            max: max_of(self.max, other.max),
            has_nulls: self.has_nulls || other.has_nulls,
        }
    }

    /// Returns `true` if both records hold the same min, max and null flag.
    pub fn same_as(&self, other: &ChunkStats<T>) -> bool {
        self.min.value_cmp(&other.min) == Ordering::Equal
            && self.max.value_cmp(&other.max) == Ordering::Equal
            && self.has_nulls == other.has_nulls
    }
}

impl<T: ChunkValue> Default for ChunkStats<T> {
    fn default() -> Self {
        ChunkStats::empty()
    }
}

#[inline]
fn min_of<T: ChunkValue>(lhs: T, rhs: T) -> T {
    if rhs.value_cmp(&lhs) == Ordering::Less {
        rhs
    } else {
        lhs
    }
}

#[inline]
fn max_of<T: ChunkValue>(lhs: T, rhs: T) -> T {
    if rhs.value_cmp(&lhs) == Ordering::Greater {
        rhs
    } else {
        lhs
    }
}

/// Type-tagged snapshot of a chunk's statistics, as reported to consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkStatistics {
    /// Logical type the statistics are reported in.
    pub logical_type: LogicalType,
    pub element_count: u64,
    pub min: StatValue,
    pub max: StatValue,
    pub has_nulls: bool,
}

impl ChunkStatistics {
    pub fn new<T: ChunkValue>(
        logical_type: LogicalType,
        element_count: u64,
        stats: &ChunkStats<T>,
    ) -> ChunkStatistics {
        ChunkStatistics {
            logical_type,
            element_count,
            min: stats.min.to_stat_value(),
            max: stats.max.to_stat_value(),
            has_nulls: stats.has_nulls,
        }
    }

    /// Returns `true` if `min`/`max` describe real data rather than placeholders.
    pub fn has_range(&self) -> bool {
        self.min.bound_cmp(&self.max) != Ordering::Greater
    }

    /// Storage kind of the tagged values.
    pub fn value_kind(&self) -> ElementKind {
        match self.min {
            StatValue::Int8(_) if self.logical_type == LogicalType::Boolean => {
                ElementKind::Boolean
            }
            StatValue::Int8(_) => ElementKind::Int8,
            StatValue::Int16(_) => ElementKind::Int16,
            StatValue::Int32(_) => ElementKind::Int32,
            StatValue::Int64(_) => ElementKind::Int64,
            StatValue::Float32(_) => ElementKind::Float32,
            StatValue::Float64(_) => ElementKind::Float64,
        }
    }

    /// Converts the tagged values back into a typed record.
    ///
    /// A record without a range becomes an empty record that keeps `has_nulls`.
    /// Returns `None` if either bound is not representable in `T`.
    pub fn to_stats<T: ChunkValue>(&self) -> Option<ChunkStats<T>> {
        if !self.has_range() {
            return Some(ChunkStats {
                has_nulls: self.has_nulls,
                ..ChunkStats::empty()
            });
        }
        Some(ChunkStats {
            min: T::from_stat_value(self.min)?,
            max: T::from_stat_value(self.max)?,
            has_nulls: self.has_nulls,
        })
    }
}
