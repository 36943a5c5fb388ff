//! Decides whether a foreign container's column metadata can stand in for
//! statistics computed from the data itself.
//!
//! The check is pure: a `false` answer only means the statistics have to be
//! computed by decoding the values.

pub mod descriptor;
pub mod mapping;

pub use descriptor::{ForeignColumnDescriptor, ForeignLogicalType, PhysicalType};
pub use mapping::{PHYSICAL_TYPE_MAPPINGS, is_mapping_supported};
