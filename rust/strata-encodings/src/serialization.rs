//! Fixed-width binary layout of persisted chunk statistics.
//!
//! Field order: element count (`u64`), min (`T`), max (`T`), has_nulls (one byte).
//! All fields use the platform byte order. There is no header or version tag; the
//! reader must know `T` from the column schema.

use std::io::{Read, Write};

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use strata_common::{Error, Result, verify_data};

use crate::{stats::ChunkStats, value::ChunkValue};

/// Size in bytes of the serialized statistics for element type `T`.
pub const fn serialized_size<T: ChunkValue>() -> usize {
    8 + 2 * T::SIZE + 1
}

pub fn write_stats<T: ChunkValue, W: Write + ?Sized>(
    sink: &mut W,
    element_count: u64,
    stats: &ChunkStats<T>,
) -> Result<()> {
    sink.write_u64::<NativeEndian>(element_count)
        .map_err(|e| Error::io("statistics element_count", e))?;
    sink.write_all(bytemuck::bytes_of(&stats.min))
        .map_err(|e| Error::io("statistics min", e))?;
    sink.write_all(bytemuck::bytes_of(&stats.max))
        .map_err(|e| Error::io("statistics max", e))?;
    sink.write_u8(stats.has_nulls as u8)
        .map_err(|e| Error::io("statistics has_nulls", e))?;
    Ok(())
}

pub fn read_stats<T: ChunkValue, R: Read + ?Sized>(
    source: &mut R,
) -> Result<(u64, ChunkStats<T>)> {
    let element_count = source
        .read_u64::<NativeEndian>()
        .map_err(|e| read_error("element_count", e))?;
    let min = read_value::<T, R>(source, "min")?;
    let max = read_value::<T, R>(source, "max")?;
    let has_nulls = source.read_u8().map_err(|e| read_error("has_nulls", e))?;
    verify_data!(has_nulls, has_nulls <= 1);
    Ok((
        element_count,
        ChunkStats {
            min,
            max,
            has_nulls: has_nulls == 1,
        },
    ))
}

fn read_value<T: ChunkValue, R: Read + ?Sized>(source: &mut R, element: &str) -> Result<T> {
    let mut buf = [0u8; 8];
    source
        .read_exact(&mut buf[..T::SIZE])
        .map_err(|e| read_error(element, e))?;
    Ok(T::read_from(&buf))
}

fn read_error(element: &str, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        Error::serialization(element, "truncated statistics stream")
    } else {
        Error::io(format!("statistics {element}"), e)
    }
}

#[cfg(test)]
mod tests {
    use strata_format::NullSentinel;

    use crate::stats::ChunkStats;

    use super::{read_stats, serialized_size, write_stats};

    #[test]
    fn test_layout() {
        let stats = ChunkStats {
            min: -3i32,
            max: 8,
            has_nulls: true,
        };
        let mut buf = Vec::<u8>::new();
        write_stats(&mut buf, 5, &stats).unwrap();
        assert_eq!(buf.len(), serialized_size::<i32>());
        assert_eq!(&buf[0..8], &5u64.to_ne_bytes());
        assert_eq!(&buf[8..12], &(-3i32).to_ne_bytes());
        assert_eq!(&buf[12..16], &8i32.to_ne_bytes());
        assert_eq!(buf[16], 1);
    }

    #[test]
    fn test_round_trip_reachable_records() {
        let records = [
            (0u64, ChunkStats::<f64>::empty()),
            (3, ChunkStats::from_values(&[1.5, f64::NULL, -2.25])),
            (1, ChunkStats::from_values(&[f64::NULL])),
        ];
        for (count, stats) in records {
            let mut buf = Vec::<u8>::new();
            write_stats(&mut buf, count, &stats).unwrap();
            let (read_count, read) = read_stats::<f64, _>(&mut buf.as_slice()).unwrap();
            assert_eq!(read_count, count);
            assert!(read.same_as(&stats));
        }
    }

    #[test]
    fn test_truncated_stream() {
        let mut buf = Vec::<u8>::new();
        write_stats(&mut buf, 2, &ChunkStats::from_values(&[1i64, 2])).unwrap();
        for len in [0, 7, 8, 15, buf.len() - 1] {
            let err = read_stats::<i64, _>(&mut &buf[..len]).unwrap_err();
            assert!(err.is_serialization(), "len {len}: {err}");
        }
    }

    #[test]
    fn test_malformed_null_flag() {
        let mut buf = Vec::<u8>::new();
        write_stats(&mut buf, 1, &ChunkStats::from_values(&[1i8])).unwrap();
        *buf.last_mut().unwrap() = 2;
        assert!(read_stats::<i8, _>(&mut buf.as_slice()).unwrap_err().is_serialization());
    }
}
