//! Depth-first traversal over an error, its chain slots, and what they wrap.
//!
//! Order at every level: the error itself, then (for a [`Chain`]) its
//! current slot with everything that slot wraps, then the remainder.
//! Leaf errors are unwrapped through `Error::source()`, except
//! `std::io::Error`, whose wrapped payload (`get_ref()`) is followed
//! instead since its `source()` skips the payload itself.

use std::error::Error;
use std::io;

use crate::Chain;

/// Iterator returned by [`walk`].
pub struct Walk<'a> {
    stack: Vec<&'a (dyn Error + 'static)>,
}

/// Every error reachable from `err`, in match order, starting with `err`.
///
/// ```
/// use std::io;
///
/// let err = errchain::from_errors([
///     io::Error::new(io::ErrorKind::NotFound, "config"),
///     io::Error::new(io::ErrorKind::TimedOut, "upstream"),
/// ])
/// .unwrap();
///
/// let kinds: Vec<io::ErrorKind> = errchain::walk(&*err)
///     .filter_map(|e| e.downcast_ref::<io::Error>())
///     .map(|e| e.kind())
///     .collect();
/// assert_eq!(kinds, [io::ErrorKind::NotFound, io::ErrorKind::TimedOut]);
/// ```
pub fn walk<'a>(err: &'a (dyn Error + 'static)) -> Walk<'a> {
    Walk {
        stack: vec![err],
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let err = self.stack.pop()?;

        if let Some(chain) = err.downcast_ref::<Chain>() {
            chain.push_slots(&mut self.stack);
        } else if let Some(io_err) = downcast::<io::Error>(err) {
            if let Some(inner) = io_err.get_ref() {
                self.stack.push(inner);
            }
        } else if let Some(source) = err.source() {
            self.stack.push(source);
        }

        Some(err)
    }
}

/// Whether `err`, or anything it chains or wraps, equals `target`.
///
/// An error matches when it is a `T` and compares equal to `target`.
/// Stops at the first match.
///
/// ```
/// #[derive(Debug, PartialEq)]
/// struct Closed;
///
/// impl std::fmt::Display for Closed {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("already closed")
///     }
/// }
///
/// impl std::error::Error for Closed {}
///
/// let err = errchain::chain!["flush failed", Closed].unwrap();
/// assert!(errchain::is(&*err, &Closed));
/// ```
pub fn is<T>(err: &(dyn Error + 'static), target: &T) -> bool
where
    T: Error + PartialEq + 'static,
{
    walk(err).any(|e| downcast::<T>(e) == Some(target))
}

/// First error of type `T` in `err`, its chain slots, or anything they wrap.
///
/// ```
/// use std::num::ParseIntError;
///
/// let parse_err = "x".parse::<u32>().unwrap_err();
/// let err = errchain::chain!["bad line 3", parse_err.clone()].unwrap();
///
/// assert_eq!(errchain::find::<ParseIntError>(&*err), Some(&parse_err));
/// assert!(errchain::find::<std::fmt::Error>(&*err).is_none());
/// ```
pub fn find<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    walk(err).find_map(downcast::<T>)
}

/// Whether `err`, or anything it chains or wraps, is an `io::Error` of `kind`.
///
/// `io::Error` has no `PartialEq`, so standard conditions such as
/// `UnexpectedEof` are matched by kind.
pub fn is_io_kind(err: &(dyn Error + 'static), kind: io::ErrorKind) -> bool {
    walk(err)
        .filter_map(downcast::<io::Error>)
        .any(|e| e.kind() == kind)
}

/// `err` as a `T`, looking through one `Box<T>` layer.
///
/// An already boxed error converted with `Into<BoxError>` is boxed again,
/// so its slot holds a `Box<T>` rather than a `T`.
fn downcast<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    err.downcast_ref::<T>()
        .or_else(|| err.downcast_ref::<Box<T>>().map(|boxed| &**boxed))
}
