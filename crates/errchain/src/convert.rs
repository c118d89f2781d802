use std::io;

use crate::{BoxError, Chain};

// ── Into<io::Error> ───────────────────────────────────────────────

impl From<Chain> for io::Error {
    /// Wrap the chain as a custom `io::Error` of kind `Other`.
    ///
    /// [`crate::walk`] follows `io::Error` payloads, so the slots stay
    /// matchable after the conversion.
    fn from(chain: Chain) -> Self {
        io::Error::new(io::ErrorKind::Other, chain)
    }
}

// ── ResultExt — chaining a second outcome onto a Result ───────────

/// Extension trait for combining a `Result` with a follow-up outcome.
///
/// The usual case is an operation followed by cleanup that can fail too:
/// neither error should be lost.
///
/// ```
/// use std::io;
/// use errchain::ResultExt;
///
/// fn write_all() -> io::Result<usize> {
///     Err(io::Error::new(io::ErrorKind::WriteZero, "short write"))
/// }
/// fn close() -> io::Result<()> {
///     Err(io::Error::new(io::ErrorKind::BrokenPipe, "close"))
/// }
///
/// let err = write_all().chain_err(close()).unwrap_err();
/// assert_eq!(err.to_string(), "short write (close)");
/// assert!(errchain::is_io_kind(&*err, io::ErrorKind::BrokenPipe));
/// ```
pub trait ResultExt<T> {
    /// Keep `self`'s value when both succeeded; otherwise return the
    /// failed side's error, or both joined with `self`'s error first.
    fn chain_err<U, E2>(self, other: Result<U, E2>) -> Result<T, BoxError>
    where
        E2: Into<BoxError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn chain_err<U, E2>(self, other: Result<U, E2>) -> Result<T, BoxError>
    where
        E2: Into<BoxError>,
    {
        match (self, other) {
            (Ok(value), Ok(_)) => Ok(value),
            (Err(first), Ok(_)) => Err(first.into()),
            (Ok(_), Err(second)) => Err(second.into()),
            (Err(first), Err(second)) => {
                Err(Box::new(Chain::pair(first.into(), second.into())))
            }
        }
    }
}
