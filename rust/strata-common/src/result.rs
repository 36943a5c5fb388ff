use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(Error::invalid_arg(name, condition))
    }
}

/// Checks a value decoded from a statistics stream.
#[inline]
pub fn verify_data(predicate: bool, element: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(malformed(element, condition))
    }
}

#[cold]
fn malformed(element: &str, condition: &str) -> Error {
    Error::serialization(element, format!("decoded value violates `{condition}`"))
}

#[cfg(test)]
mod tests {
    use super::Result;

    fn check_count(count: usize) -> Result<usize> {
        verify_arg!(count, count > 0);
        Ok(count)
    }

    fn check_flag(flag: u8) -> Result<bool> {
        verify_data!(has_nulls, flag <= 1);
        Ok(flag == 1)
    }

    #[test]
    fn test_verify_macros() {
        assert_eq!(check_count(3).unwrap(), 3);
        let err = check_count(0).unwrap_err();
        assert!(err.is_invalid_arg());
        assert_eq!(err.to_string(), "invalid argument count: count > 0");

        assert!(check_flag(1).unwrap());
        let err = check_flag(7).unwrap_err();
        assert!(err.is_serialization());
        assert_eq!(
            err.to_string(),
            "malformed statistics stream for 'has_nulls': decoded value violates `flag <= 1`"
        );
    }
}
