use std::error::Error;
use std::fmt;

use crate::BoxError;

/// A linked composition of several errors that behaves as one error.
///
/// Each node owns one slot (`current`, possibly absent) and the remainder
/// of the chain. The remainder is either another node or the final slot.
/// Chains are built once by [`new`] and never mutated afterwards.
///
/// # Rendering
///
/// `Display` nests the remainder in parentheses after the current slot:
///
/// ```
/// let err = errchain::chain!["1", "2", "3"].unwrap();
/// assert_eq!(err.to_string(), "1 (2 (3))");
/// ```
///
/// Absent slots contribute nothing; a node whose slot and remainder are
/// both absent renders as empty text.
///
/// # Matching
///
/// [`Chain::is`] and [`Chain::find`] (and the free functions
/// [`crate::is`] / [`crate::find`]) look through every slot and whatever
/// each slot wraps. `source()` is always `None`: the rendered text already
/// holds every slot, and traversal goes through [`crate::walk`].
pub struct Chain {
    current: Option<BoxError>,
    next: Link,
}

/// Remainder of a chain after the current slot.
enum Link {
    /// Two or more slots follow.
    Node(Box<Chain>),
    /// Exactly one slot follows, and it may be absent.
    Last(Option<BoxError>),
}

impl Link {
    #[inline]
    fn is_absent(&self) -> bool {
        matches!(self, Link::Last(None))
    }
}

// ── Construction ──────────────────────────────────────────────────

/// Build an error chain from `errs`.
///
/// - no elements: `None`
/// - one element: that element, unchanged (not wrapped)
/// - two or more: a [`Chain`] holding every element in order
///
/// Absent elements are carried as absent slots, not rejected. An input
/// that is already a `Box<T>` is boxed again; matching looks through that
/// extra layer.
///
/// ```
/// use errchain::BoxError;
///
/// let none: Option<BoxError> = errchain::new(Vec::<Option<BoxError>>::new());
/// assert!(none.is_none());
///
/// let err = errchain::new([Some("open failed"), None, Some("close failed")]).unwrap();
/// assert_eq!(err.to_string(), "open failed (close failed)");
/// ```
pub fn new<I, E>(errs: I) -> Option<BoxError>
where
    I: IntoIterator<Item = Option<E>>,
    E: Into<BoxError>,
{
    let mut errs: Vec<Option<BoxError>> = errs
        .into_iter()
        .map(|e| e.map(Into::into))
        .collect();

    let last = errs.pop()?;
    let Some(current) = errs.pop() else {
        return last;
    };

    let mut chain = Chain {
        current,
        next: Link::Last(last),
    };
    while let Some(current) = errs.pop() {
        chain = Chain {
            current,
            next: Link::Node(Box::new(chain)),
        };
    }
    Some(Box::new(chain))
}

/// [`new`] over errors that are all present.
pub fn from_errors<I, E>(errs: I) -> Option<BoxError>
where
    I: IntoIterator<Item = E>,
    E: Into<BoxError>,
{
    new(errs.into_iter().map(Some))
}

/// [`new`] over the present elements only.
///
/// Returns `None` only when every element is absent, so a single failure
/// among many comes back unwrapped.
///
/// ```
/// let err = errchain::join([None, Some("disk full"), None]).unwrap();
/// assert_eq!(err.to_string(), "disk full");
/// ```
pub fn join<I, E>(errs: I) -> Option<BoxError>
where
    I: IntoIterator<Item = Option<E>>,
    E: Into<BoxError>,
{
    new(errs.into_iter().flatten().map(Some))
}

/// Join the errors of every failed result, in order.
///
/// ```
/// use std::io;
///
/// let steps: Vec<io::Result<()>> = vec![
///     Ok(()),
///     Err(io::Error::new(io::ErrorKind::BrokenPipe, "flush")),
///     Err(io::Error::new(io::ErrorKind::Other, "close")),
/// ];
/// let err = errchain::collect(steps).unwrap_err();
/// assert_eq!(err.to_string(), "flush (close)");
/// ```
pub fn collect<I, U, E>(results: I) -> Result<(), BoxError>
where
    I: IntoIterator<Item = Result<U, E>>,
    E: Into<BoxError>,
{
    match join(results.into_iter().map(Result::err)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[allow(clippy::len_without_is_empty)]
impl Chain {
    /// Two-slot chain with both slots present.
    pub(crate) fn pair(first: BoxError, second: BoxError) -> Self {
        Self {
            current: Some(first),
            next: Link::Last(Some(second)),
        }
    }

    /// The chain's own slots in construction order.
    ///
    /// Follows the chain's links but does not descend into the slots:
    /// a chain built from N errors yields exactly N items.
    pub fn iter(&self) -> Slots<'_> {
        Slots {
            state: SlotState::Node(self),
        }
    }

    /// Number of slots, absent ones included. Never less than two.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether `target` equals any slot or anything a slot wraps.
    pub fn is<T>(&self, target: &T) -> bool
    where
        T: Error + PartialEq + 'static,
    {
        crate::is(self, target)
    }

    /// First error of type `T` among the slots and whatever they wrap.
    pub fn find<T>(&self) -> Option<&T>
    where
        T: Error + 'static,
    {
        crate::find(self)
    }

    /// Push this node's remainder, then its current slot, so the current
    /// slot is popped first.
    pub(crate) fn push_slots<'a>(&'a self, stack: &mut Vec<&'a (dyn Error + 'static)>) {
        match &self.next {
            Link::Node(node) => stack.push(&**node),
            Link::Last(Some(err)) => stack.push(&**err),
            Link::Last(None) => {}
        }
        if let Some(err) = &self.current {
            stack.push(&**err);
        }
    }
}

// Unlinks nodes one at a time; the default drop would recurse once per slot.
impl Drop for Chain {
    fn drop(&mut self) {
        let mut next = std::mem::replace(&mut self.next, Link::Last(None));
        while let Link::Node(mut node) = next {
            next = std::mem::replace(&mut node.next, Link::Last(None));
        }
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = Option<&'a (dyn Error + Send + Sync + 'static)>;
    type IntoIter = Slots<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Slot iteration ────────────────────────────────────────────────

/// Iterator over a chain's slots, see [`Chain::iter`].
pub struct Slots<'a> {
    state: SlotState<'a>,
}

enum SlotState<'a> {
    Node(&'a Chain),
    Last(Option<&'a (dyn Error + Send + Sync + 'static)>),
    Done,
}

impl<'a> Iterator for Slots<'a> {
    type Item = Option<&'a (dyn Error + Send + Sync + 'static)>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, SlotState::Done) {
            SlotState::Node(chain) => {
                self.state = match &chain.next {
                    Link::Node(node) => SlotState::Node(&**node),
                    Link::Last(last) => SlotState::Last(last.as_deref()),
                };
                Some(chain.current.as_deref())
            }
            SlotState::Last(slot) => Some(slot),
            SlotState::Done => None,
        }
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl Error for Chain {}

// ── Display ───────────────────────────────────────────────────────

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = self;
        let mut open = 0usize;

        loop {
            if let Some(current) = &node.current {
                write!(f, "{}", current)?;
                if !node.next.is_absent() {
                    f.write_str(" (")?;
                    open += 1;
                }
            }
            match &node.next {
                Link::Node(next) => node = &**next,
                Link::Last(Some(last)) => {
                    write!(f, "{}", last)?;
                    break;
                }
                Link::Last(None) => break,
            }
        }

        for _ in 0..open {
            f.write_str(")")?;
        }
        Ok(())
    }
}

// ── Debug ─────────────────────────────────────────────────────────

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Chain ")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug, PartialEq)]
    struct Code(u32);

    impl fmt::Display for Code {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "code {}", self.0)
        }
    }

    impl Error for Code {}

    fn boxed(code: u32) -> BoxError {
        Box::new(Code(code))
    }

    fn thin(err: &(dyn Error + Send + Sync)) -> *const () {
        err as *const (dyn Error + Send + Sync) as *const ()
    }

    #[test]
    fn no_errs_is_absent() {
        assert!(new(Vec::<Option<BoxError>>::new()).is_none());
        assert!(from_errors(Vec::<BoxError>::new()).is_none());
    }

    #[test]
    fn one_err_is_not_wrapped() {
        let err = boxed(1);
        let addr = thin(&*err);

        let out = new([Some(err)]).unwrap();
        assert_eq!(thin(&*out), addr);
        assert!(out.downcast_ref::<Chain>().is_none());
        assert_eq!(out.downcast_ref::<Code>(), Some(&Code(1)));
        assert_eq!(out.to_string(), "code 1");
    }

    #[test]
    fn one_absent_err_stays_absent() {
        assert!(new([None::<BoxError>]).is_none());
    }

    #[test]
    fn nested_rendering() {
        let err = from_errors(["1", "2", "3"]).unwrap();
        assert_eq!(err.to_string(), "1 (2 (3))");

        let two = from_errors(["a", "b"]).unwrap();
        assert_eq!(two.to_string(), "a (b)");
    }

    #[test]
    fn rendering_is_stable() {
        let err = from_errors(["1", "2", "3"]).unwrap();
        let first = err.to_string();
        assert_eq!(first, err.to_string());
        assert_eq!(first, format!("{}", err));
    }

    #[test]
    fn absent_slots_render() {
        let both_absent = new([None::<BoxError>, None]).unwrap();
        assert_eq!(both_absent.to_string(), "");

        let leading = new([None, Some("a"), Some("b")]).unwrap();
        assert_eq!(leading.to_string(), "a (b)");

        let trailing = new([Some("a"), None]).unwrap();
        assert_eq!(trailing.to_string(), "a");

        // The remainder is a node that renders empty; its parentheses stay.
        let empty_tail = new([Some("a"), None, None]).unwrap();
        assert_eq!(empty_tail.to_string(), "a ()");
    }

    #[test]
    fn chain_as_element_renders_inside() {
        let inner = from_errors(["x", "y"]);
        let err = new([Some(boxed(1)), inner, Some(boxed(2))]).unwrap();
        assert_eq!(err.to_string(), "code 1 (x (y) (code 2))");
    }

    #[test]
    fn slots_keep_order_and_count() {
        let err = new([Some(boxed(1)), None, Some(boxed(3)), Some(boxed(4))]).unwrap();
        let chain = err.downcast_ref::<Chain>().unwrap();
        assert_eq!(chain.len(), 4);

        let codes: Vec<Option<u32>> = chain
            .iter()
            .map(|slot| slot.and_then(|e| e.downcast_ref::<Code>()).map(|c| c.0))
            .collect();
        assert_eq!(codes, vec![Some(1), None, Some(3), Some(4)]);
    }

    #[test]
    fn slots_for_loop() {
        let err = from_errors(["a", "b"]).unwrap();
        let chain = err.downcast_ref::<Chain>().unwrap();
        let mut seen = Vec::new();
        for slot in chain {
            seen.push(slot.map(|e| e.to_string()));
        }
        assert_eq!(seen, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn long_chain_renders_without_recursion() {
        let err = from_errors((0..100_000).map(|i| i.to_string())).unwrap();
        let text = err.to_string();
        assert!(text.starts_with("0 (1 (2 ("));

        let closing = ")".repeat(99_999);
        let body = text.strip_suffix(closing.as_str()).unwrap();
        assert!(body.ends_with(" (99998 (99999"));
        assert!(!body.ends_with(')'));

        let chain = err.downcast_ref::<Chain>().unwrap();
        assert_eq!(chain.len(), 100_000);
    }

    #[test]
    fn join_drops_absent() {
        assert!(join([None::<BoxError>, None]).is_none());

        let err = boxed(7);
        let addr = thin(&*err);
        let single = join([None, Some(err), None]).unwrap();
        assert_eq!(thin(&*single), addr);

        let many = join([Some("a"), None, Some("b")]).unwrap();
        assert_eq!(many.downcast_ref::<Chain>().unwrap().len(), 2);
    }

    #[test]
    fn collect_results() {
        let ok: Vec<Result<u8, io::Error>> = vec![Ok(1), Ok(2)];
        assert!(collect(ok).is_ok());

        let mixed: Vec<Result<u8, BoxError>> = vec![Ok(1), Err(boxed(2)), Ok(3), Err(boxed(4))];
        let err = collect(mixed).unwrap_err();
        assert_eq!(err.to_string(), "code 2 (code 4)");
    }

    #[test]
    fn debug_lists_slots() {
        let err = new([Some(boxed(1)), None]).unwrap();
        let s = format!("{:?}", err);
        assert!(s.starts_with("Chain ["), "unexpected debug output: {}", s);
        assert!(s.contains("Code(1)"), "unexpected debug output: {}", s);
        assert!(s.contains("None"), "unexpected debug output: {}", s);
    }

    #[test]
    fn no_source() {
        let err = from_errors(["a", "b"]).unwrap();
        assert!(err.source().is_none());
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Chain>();
    }
}
