use strata_common::{Error, Result};

use crate::types::ColumnType;

/// Checks that raw (unscaled) decimal values fit the column's declared precision.
///
/// A decimal(p, s) column accepts raw values strictly between `-10^p` and `10^p`.
/// For non-decimal columns the validator accepts everything.
#[derive(Debug, Clone, Copy)]
pub struct DecimalOverflowValidator {
    precision: Option<u8>,
    max: i64,
}

impl DecimalOverflowValidator {
    pub fn new(column_type: &ColumnType) -> DecimalOverflowValidator {
        match column_type.decimal_params() {
            Some((precision, _)) => DecimalOverflowValidator {
                precision: Some(precision),
                max: 10i64.pow(precision as u32),
            },
            None => DecimalOverflowValidator::disabled(),
        }
    }

    pub fn disabled() -> DecimalOverflowValidator {
        DecimalOverflowValidator {
            precision: None,
            max: i64::MAX,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.precision.is_some()
    }

    #[inline]
    pub fn validate(&self, value: i64) -> Result<()> {
        let Some(precision) = self.precision else {
            return Ok(());
        };
        if value >= self.max || value <= -self.max {
            log::warn!("rejecting decimal value {value}: exceeds precision {precision}");
            return Err(Error::decimal_overflow(value, precision));
        }
        Ok(())
    }
}
