//! Type vocabulary shared by the strata chunk encoders and metadata validators:
//! element kinds, logical column types, null sentinels and decimal range checks.

pub mod decimal;
pub mod null;
pub mod types;

pub use decimal::DecimalOverflowValidator;
pub use null::NullSentinel;
pub use types::{ColumnType, ElementKind, LogicalType, MAX_DECIMAL_PRECISION};
