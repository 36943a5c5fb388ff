//! Plain chunk encoding with running statistics.
//!
//! A [`ChunkEncoder`] writes the fixed-width values of one column chunk into an
//! injected [`ChunkBuffer`](strata_io::ChunkBuffer) and maintains the chunk's
//! min/max/null statistics, which can be persisted independently of the data.
//! [`AnyChunkEncoder`] wraps the typed encoders into one closed, tagged type.

pub mod any_encoder;
pub mod encoder;
pub mod options;
pub mod parallel;
pub mod serialization;
pub mod stats;
pub mod value;

pub use any_encoder::AnyChunkEncoder;
pub use encoder::ChunkEncoder;
pub use options::EncoderOptions;
pub use stats::{ChunkStatistics, ChunkStats, StatValue};
pub use value::ChunkValue;
