//! Type metadata of columns stored in a foreign columnar container.

use serde::{Deserialize, Serialize};

/// Physical storage type of a column in a foreign columnar container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray,
}

impl PhysicalType {
    /// Width of a single physical value in bytes, if it is fixed.
    ///
    /// `FixedLenByteArray` has a per-column width that is not part of the type.
    pub fn byte_width(&self) -> Option<usize> {
        match self {
            PhysicalType::Boolean => Some(1),
            PhysicalType::Int32 | PhysicalType::Float => Some(4),
            PhysicalType::Int64 | PhysicalType::Double => Some(8),
            PhysicalType::Int96 => Some(12),
            PhysicalType::ByteArray | PhysicalType::FixedLenByteArray => None,
        }
    }
}

/// Logical annotation attached to a foreign column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForeignLogicalType {
    /// No annotation; only the physical type describes the column.
    #[default]
    None,
    Integer {
        bit_width: u8,
        is_signed: bool,
    },
    Decimal {
        precision: u8,
        scale: u8,
    },
    String,
    Date,
    Timestamp,
}

/// Type metadata of one foreign column, consumed read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignColumnDescriptor {
    pub physical_type: PhysicalType,
    #[serde(default)]
    pub logical_type: ForeignLogicalType,
}

impl ForeignColumnDescriptor {
    /// A descriptor without a logical annotation.
    pub fn physical(physical_type: PhysicalType) -> ForeignColumnDescriptor {
        ForeignColumnDescriptor {
            physical_type,
            logical_type: ForeignLogicalType::None,
        }
    }

    pub fn integer(
        physical_type: PhysicalType,
        bit_width: u8,
        is_signed: bool,
    ) -> ForeignColumnDescriptor {
        ForeignColumnDescriptor {
            physical_type,
            logical_type: ForeignLogicalType::Integer {
                bit_width,
                is_signed,
            },
        }
    }

    pub fn decimal(
        physical_type: PhysicalType,
        precision: u8,
        scale: u8,
    ) -> ForeignColumnDescriptor {
        ForeignColumnDescriptor {
            physical_type,
            logical_type: ForeignLogicalType::Decimal { precision, scale },
        }
    }

    pub fn has_logical_type(&self) -> bool {
        self.logical_type != ForeignLogicalType::None
    }
}
