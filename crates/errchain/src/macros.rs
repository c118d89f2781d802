/// Build an error chain from present errors.
///
/// Each argument is converted with `Into<BoxError>`, so error values,
/// `&str` and `String` can be mixed. Expands to [`crate::new`] and yields
/// `Option<BoxError>`.
///
/// ```
/// use errchain::chain;
///
/// assert!(chain![].is_none());
///
/// let err = chain!["1", "2", "3"].unwrap();
/// assert_eq!(err.to_string(), "1 (2 (3))");
/// ```
#[macro_export]
macro_rules! chain {
    () => {
        ::core::option::Option::<$crate::BoxError>::None
    };

    ($($err:expr),+ $(,)?) => {
        $crate::new([
            $(
                ::core::option::Option::Some(
                    ::core::convert::Into::<$crate::BoxError>::into($err),
                )
            ),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::fmt;
    use std::io;

    use crate::{BoxError, Chain};

    #[derive(Debug, PartialEq)]
    struct Busy;

    impl fmt::Display for Busy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("resource busy")
        }
    }

    impl Error for Busy {}

    #[test]
    fn empty() {
        let err: Option<BoxError> = chain![];
        assert!(err.is_none());
    }

    #[test]
    fn single_is_unwrapped() {
        let err = chain![Busy].unwrap();
        assert!(err.downcast_ref::<Chain>().is_none());
        assert_eq!(err.downcast_ref::<Busy>(), Some(&Busy));
    }

    #[test]
    fn mixed_arguments() {
        let io_err = io::Error::new(io::ErrorKind::TimedOut, "poll timed out");
        let err = chain![Busy, "retrying".to_string(), io_err,].unwrap();
        assert_eq!(err.to_string(), "resource busy (retrying (poll timed out))");
        assert!(crate::is(&*err, &Busy));
        assert!(crate::is_io_kind(&*err, io::ErrorKind::TimedOut));
    }

    #[test]
    fn boxed_arguments() {
        let a: BoxError = Box::new(Busy);
        let b: BoxError = "later".into();
        let err = chain![a, b].unwrap();
        assert_eq!(err.downcast_ref::<Chain>().map(Chain::len), Some(2));
    }
}
