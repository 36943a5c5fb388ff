//! Column type vocabulary shared by the chunk encoders and the metadata pushdown validator.

use serde::{Deserialize, Serialize};
use strata_common::{Error, Result};

/// Largest decimal precision whose unscaled value fits into a 64-bit integer.
pub const MAX_DECIMAL_PRECISION: u8 = 18;

/// Physical storage kind of a chunk element.
///
/// This is the closed set of element types a chunk encoder can be instantiated for.
/// `Boolean` values are stored as one-byte integers (`0`, `1` or the null sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ElementKind {
    /// Size of a single stored element in bytes.
    pub fn byte_width(&self) -> usize {
        match self {
            ElementKind::Boolean | ElementKind::Int8 => 1,
            ElementKind::Int16 => 2,
            ElementKind::Int32 | ElementKind::Float32 => 4,
            ElementKind::Int64 | ElementKind::Float64 => 8,
        }
    }

    /// Returns `true` if this is one of the integer kinds (i8, i16, i32, or i64).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ElementKind::Int8 | ElementKind::Int16 | ElementKind::Int32 | ElementKind::Int64
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, ElementKind::Float32 | ElementKind::Float64)
    }

    /// Smallest integer kind capable of holding an unscaled decimal value
    /// of the given precision.
    pub fn for_decimal_precision(precision: u8) -> Option<ElementKind> {
        match precision {
            1..=2 => Some(ElementKind::Int8),
            3..=4 => Some(ElementKind::Int16),
            5..=9 => Some(ElementKind::Int32),
            10..=MAX_DECIMAL_PRECISION => Some(ElementKind::Int64),
            _ => None,
        }
    }
}

/// Logical (SQL-level) type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
}

impl LogicalType {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            LogicalType::TinyInt | LogicalType::SmallInt | LogicalType::Int | LogicalType::BigInt
        )
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, LogicalType::Decimal { .. })
    }

    /// Storage kind used for values of this logical type, or `None` for a decimal
    /// with an unsupported precision.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match *self {
            LogicalType::Boolean => Some(ElementKind::Boolean),
            LogicalType::TinyInt => Some(ElementKind::Int8),
            LogicalType::SmallInt => Some(ElementKind::Int16),
            LogicalType::Int => Some(ElementKind::Int32),
            LogicalType::BigInt => Some(ElementKind::Int64),
            LogicalType::Float => Some(ElementKind::Float32),
            LogicalType::Double => Some(ElementKind::Float64),
            LogicalType::Decimal { precision, .. } => {
                ElementKind::for_decimal_precision(precision)
            }
        }
    }
}

/// A validated column type: a logical type together with its storage kind.
///
/// Construction rejects decimals whose precision cannot be stored in a
/// 64-bit integer, or whose scale exceeds the precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnType {
    logical_type: LogicalType,
    element_kind: ElementKind,
}

impl ColumnType {
    pub fn new(logical_type: LogicalType) -> Result<ColumnType> {
        if let LogicalType::Decimal { precision, scale } = logical_type {
            if scale > precision {
                return Err(Error::invalid_arg(
                    "scale",
                    format!("decimal scale {scale} exceeds precision {precision}"),
                ));
            }
        }
        let element_kind = logical_type.element_kind().ok_or_else(|| {
            Error::invalid_arg(
                "precision",
                format!("decimal precision must be within 1..={MAX_DECIMAL_PRECISION}"),
            )
        })?;
        Ok(ColumnType {
            logical_type,
            element_kind,
        })
    }

    pub fn decimal(precision: u8, scale: u8) -> Result<ColumnType> {
        ColumnType::new(LogicalType::Decimal { precision, scale })
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn element_kind(&self) -> ElementKind {
        self.element_kind
    }

    pub fn is_integer(&self) -> bool {
        self.logical_type.is_integer()
    }

    pub fn is_decimal(&self) -> bool {
        self.logical_type.is_decimal()
    }

    /// Stored width of a single value in bytes.
    pub fn byte_width(&self) -> usize {
        self.element_kind.byte_width()
    }

    /// Declared `(precision, scale)` of a decimal column.
    pub fn decimal_params(&self) -> Option<(u8, u8)> {
        match self.logical_type {
            LogicalType::Decimal { precision, scale } => Some((precision, scale)),
            _ => None,
        }
    }
}

impl TryFrom<LogicalType> for ColumnType {
    type Error = Error;

    fn try_from(logical_type: LogicalType) -> Result<Self> {
        ColumnType::new(logical_type)
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnType, ElementKind, LogicalType};

    #[test]
    fn test_decimal_storage_kind() {
        let cases = [
            (1, ElementKind::Int8),
            (2, ElementKind::Int8),
            (3, ElementKind::Int16),
            (4, ElementKind::Int16),
            (5, ElementKind::Int32),
            (9, ElementKind::Int32),
            (10, ElementKind::Int64),
            (18, ElementKind::Int64),
        ];
        for (precision, kind) in cases {
            let column = ColumnType::decimal(precision, 0).unwrap();
            assert_eq!(column.element_kind(), kind, "precision {precision}");
            assert!(column.is_decimal());
            assert!(!column.is_integer());
        }
    }

    #[test]
    fn test_invalid_decimals() {
        assert!(ColumnType::decimal(0, 0).unwrap_err().is_invalid_arg());
        assert!(ColumnType::decimal(19, 2).unwrap_err().is_invalid_arg());
        assert!(ColumnType::decimal(5, 6).unwrap_err().is_invalid_arg());
    }

    #[test]
    fn test_plain_columns() {
        let column = ColumnType::new(LogicalType::Int).unwrap();
        assert!(column.is_integer());
        assert_eq!(column.byte_width(), 4);
        assert_eq!(column.decimal_params(), None);

        let column = ColumnType::new(LogicalType::Boolean).unwrap();
        assert!(!column.is_integer());
        assert_eq!(column.element_kind(), ElementKind::Boolean);
        assert_eq!(column.byte_width(), 1);
    }
}
