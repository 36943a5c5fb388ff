//! Statistics recomputation over an already encoded byte range.
//!
//! The range is split into contiguous blocks; each block is folded into a local
//! `ChunkStats` and the partial results are combined with `ChunkStats::merge`.
//! Because `merge` is associative and commutative the result does not depend on
//! the block size or on the order in which the worker results are combined.

use rayon::prelude::*;
use strata_common::{Error, Result};
use strata_format::DecimalOverflowValidator;

use crate::{options::EncoderOptions, stats::ChunkStats, value::ChunkValue};

/// Computes the statistics of the encoded values in `bytes`.
///
/// Every non-null value is checked against `validator`; the first violation
/// aborts the computation.
pub fn compute_range_stats<T: ChunkValue>(
    bytes: &[u8],
    validator: &DecimalOverflowValidator,
    options: &EncoderOptions,
) -> Result<ChunkStats<T>> {
    if bytes.len() % T::SIZE != 0 {
        return Err(Error::invalid_arg(
            "bytes",
            format!(
                "range length {} is not a multiple of the element width {}",
                bytes.len(),
                T::SIZE
            ),
        ));
    }
    let count = bytes.len() / T::SIZE;
    let block_bytes = options.parallel_block_len.max(1) * T::SIZE;
    let fold_block = |block: &[u8]| fold_encoded::<T>(block, validator);

    if count < options.min_parallel_len {
        return bytes
            .chunks(block_bytes)
            .try_fold(ChunkStats::empty(), |acc, block| -> Result<ChunkStats<T>> {
                Ok(acc.merge(fold_block(block)?))
            });
    }

    log::debug!(
        "recomputing statistics over {count} elements in blocks of {}",
        options.parallel_block_len
    );
    bytes
        .par_chunks(block_bytes)
        .map(fold_block)
        .try_reduce(ChunkStats::empty, |lhs, rhs| Ok(lhs.merge(rhs)))
}

fn fold_encoded<T: ChunkValue>(
    block: &[u8],
    validator: &DecimalOverflowValidator,
) -> Result<ChunkStats<T>> {
    let mut stats = ChunkStats::empty();
    for raw in block.chunks_exact(T::SIZE) {
        let value = T::read_from(raw);
        if !value.is_null() {
            validator.validate(value.to_i64())?;
        }
        stats.observe(value);
    }
    Ok(stats)
}
