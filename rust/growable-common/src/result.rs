pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_index {
    ($index:expr, $len:expr) => {{
        $crate::result::verify_index($index, $len)?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        index_out_of_range(index, len)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn index_out_of_range(index: usize, length: usize) -> Result<()> {
    Err(crate::error::ErrorKind::IndexOutOfRange { index, length }.into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn checked(width: usize) -> super::Result<usize> {
        verify_arg!(width, width != 0);
        Ok(width)
    }

    fn lookup(items: &[u8], index: usize) -> super::Result<u8> {
        verify_index!(index, items.len());
        Ok(items[index])
    }

    #[test]
    fn test_verify_arg() {
        assert_eq!(checked(3).unwrap(), 3);
        let err = checked(0).unwrap_err();
        assert_eq!(
            err.into_kind(),
            ErrorKind::InvalidArgument {
                name: "width".into(),
                message: "width != 0".into(),
            }
        );
    }

    #[test]
    fn test_verify_index() {
        assert_eq!(lookup(&[7, 8], 1).unwrap(), 8);
        let err = lookup(&[7, 8], 2).unwrap_err();
        assert_eq!(
            err.into_kind(),
            ErrorKind::IndexOutOfRange {
                index: 2,
                length: 2
            }
        );
    }
}
