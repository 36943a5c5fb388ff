//! Trust rules for foreign column metadata.

use strata_format::{ColumnType, ElementKind};

use crate::descriptor::{ForeignColumnDescriptor, ForeignLogicalType, PhysicalType};

/// Column kind / physical type pairs whose foreign statistics can be used as-is
/// when the foreign column carries no logical annotation.
pub const PHYSICAL_TYPE_MAPPINGS: &[(ElementKind, PhysicalType)] = &[
    (ElementKind::Boolean, PhysicalType::Boolean),
    (ElementKind::Int8, PhysicalType::Int32),
    (ElementKind::Int8, PhysicalType::Int64),
    (ElementKind::Int16, PhysicalType::Int32),
    (ElementKind::Int16, PhysicalType::Int64),
    (ElementKind::Int32, PhysicalType::Int32),
    (ElementKind::Int32, PhysicalType::Int64),
    (ElementKind::Int64, PhysicalType::Int32),
    (ElementKind::Int64, PhysicalType::Int64),
    (ElementKind::Float32, PhysicalType::Float),
    (ElementKind::Float32, PhysicalType::Double),
    (ElementKind::Float64, PhysicalType::Float),
    (ElementKind::Float64, PhysicalType::Double),
];

/// Returns `true` if the statistics recorded in `foreign`'s metadata can be used
/// for a column of type `column_type` without decoding the data.
///
/// Decimal columns are matched on their storage kind when the foreign column has
/// no annotation. An annotated integer must fit into the column's width; an
/// unsigned one needs a strictly wider column. Annotated decimals must agree on
/// precision and scale. Every other combination is rejected.
pub fn is_mapping_supported(column_type: &ColumnType, foreign: &ForeignColumnDescriptor) -> bool {
    let supported = match foreign.logical_type {
        ForeignLogicalType::None => {
            is_physical_mapping_supported(column_type.element_kind(), foreign.physical_type)
        }
        ForeignLogicalType::Integer {
            bit_width,
            is_signed,
        } if column_type.is_integer() => {
            let logical_width = bit_width as usize / 8;
            let column_width = column_type.byte_width();
            if is_signed {
                logical_width <= column_width
            } else {
                logical_width < column_width
            }
        }
        ForeignLogicalType::Decimal { precision, scale } if column_type.is_decimal() => {
            column_type.decimal_params() == Some((precision, scale))
        }
        _ => false,
    };
    if !supported {
        log::trace!(
            "foreign column {foreign:?} cannot supply statistics for {:?}",
            column_type.logical_type()
        );
    }
    supported
}

fn is_physical_mapping_supported(kind: ElementKind, physical_type: PhysicalType) -> bool {
    PHYSICAL_TYPE_MAPPINGS
        .iter()
        .any(|&(k, p)| k == kind && p == physical_type)
}

#[cfg(test)]
mod tests {
    use strata_format::{ColumnType, ElementKind, LogicalType};

    use super::{PHYSICAL_TYPE_MAPPINGS, is_mapping_supported};
    use crate::descriptor::{ForeignColumnDescriptor, ForeignLogicalType, PhysicalType};

    fn column(logical_type: LogicalType) -> ColumnType {
        ColumnType::new(logical_type).unwrap()
    }

    #[test]
    fn test_physical_fallback() {
        let int = column(LogicalType::Int);
        assert!(is_mapping_supported(
            &int,
            &ForeignColumnDescriptor::physical(PhysicalType::Int32)
        ));
        assert!(is_mapping_supported(
            &int,
            &ForeignColumnDescriptor::physical(PhysicalType::Int64)
        ));
        assert!(!is_mapping_supported(
            &int,
            &ForeignColumnDescriptor::physical(PhysicalType::Int96)
        ));
        assert!(!is_mapping_supported(
            &int,
            &ForeignColumnDescriptor::physical(PhysicalType::Double)
        ));

        let boolean = column(LogicalType::Boolean);
        assert!(is_mapping_supported(
            &boolean,
            &ForeignColumnDescriptor::physical(PhysicalType::Boolean)
        ));
        assert!(!is_mapping_supported(
            &boolean,
            &ForeignColumnDescriptor::physical(PhysicalType::Int32)
        ));
    }

    #[test]
    fn test_physical_fallback_for_decimal_uses_storage_kind() {
        let decimal = ColumnType::decimal(9, 2).unwrap();
        assert_eq!(decimal.element_kind(), ElementKind::Int32);
        assert!(is_mapping_supported(
            &decimal,
            &ForeignColumnDescriptor::physical(PhysicalType::Int64)
        ));
        assert!(!is_mapping_supported(
            &decimal,
            &ForeignColumnDescriptor::physical(PhysicalType::FixedLenByteArray)
        ));
    }

    #[test]
    fn test_allow_list_has_no_byte_arrays() {
        assert!(PHYSICAL_TYPE_MAPPINGS.iter().all(|(_, p)| p.byte_width().is_some()));
        assert!(
            !PHYSICAL_TYPE_MAPPINGS
                .iter()
                .any(|(_, p)| *p == PhysicalType::Int96)
        );
    }

    #[test]
    fn test_integer_annotation_widths() {
        let small = column(LogicalType::SmallInt);
        let int = column(LogicalType::Int);
        let big = column(LogicalType::BigInt);
        let signed_32 = ForeignColumnDescriptor::integer(PhysicalType::Int32, 32, true);
        let unsigned_32 = ForeignColumnDescriptor::integer(PhysicalType::Int32, 32, false);

        assert!(is_mapping_supported(&int, &signed_32));
        assert!(is_mapping_supported(&big, &signed_32));
        assert!(!is_mapping_supported(&small, &signed_32));

        assert!(is_mapping_supported(&big, &unsigned_32));
        assert!(!is_mapping_supported(&int, &unsigned_32));

        let unsigned_8 = ForeignColumnDescriptor::integer(PhysicalType::Int32, 8, false);
        assert!(is_mapping_supported(&small, &unsigned_8));
        assert!(!is_mapping_supported(&column(LogicalType::TinyInt), &unsigned_8));
    }

    #[test]
    fn test_integer_annotation_requires_integer_column() {
        let signed_32 = ForeignColumnDescriptor::integer(PhysicalType::Int32, 32, true);
        assert!(!is_mapping_supported(&column(LogicalType::Double), &signed_32));
        assert!(!is_mapping_supported(&ColumnType::decimal(18, 0).unwrap(), &signed_32));
        assert!(!is_mapping_supported(&column(LogicalType::Boolean), &signed_32));
    }

    #[test]
    fn test_decimal_annotation_exact_match() {
        let foreign = ForeignColumnDescriptor::decimal(PhysicalType::Int64, 10, 2);
        assert!(is_mapping_supported(&ColumnType::decimal(10, 2).unwrap(), &foreign));
        assert!(!is_mapping_supported(&ColumnType::decimal(12, 2).unwrap(), &foreign));
        assert!(!is_mapping_supported(&ColumnType::decimal(10, 3).unwrap(), &foreign));
        assert!(!is_mapping_supported(&column(LogicalType::BigInt), &foreign));
    }

    #[test]
    fn test_untrusted_annotations() {
        let big = column(LogicalType::BigInt);
        for logical_type in [
            ForeignLogicalType::String,
            ForeignLogicalType::Date,
            ForeignLogicalType::Timestamp,
        ] {
            let foreign = ForeignColumnDescriptor {
                physical_type: PhysicalType::Int64,
                logical_type,
            };
            assert!(!is_mapping_supported(&big, &foreign));
        }
    }
}
