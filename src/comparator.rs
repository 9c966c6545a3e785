//! The ordering contract a [`Tree`][crate::Tree] is built on.
//!
//! A comparator is a three-way function returning an [`Ordering`] for two
//! elements. It must be total and deterministic (consistent with a strict
//! weak ordering). This is not checked: an inconsistent comparator produces
//! a tree of unspecified shape, but never a panic or memory unsafety.

use std::cmp::Ordering;
use std::sync::Arc;

/// A shared three-way ordering function. Every tree derived from another
/// tree through `insert`, `remove`, etc. shares the same comparator.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// The comparator used when none is supplied: the element's [`Ord`] impl.
pub fn natural<T>() -> Comparator<T>
where
    T: Ord,
{
    Arc::new(|a: &T, b: &T| a.cmp(b))
}

/// Wraps a three-way closure as a [`Comparator`].
pub fn three_way<T, C>(cmp: C) -> Comparator<T>
where
    C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    Arc::new(cmp)
}

/// Builds a three-way [`Comparator`] from a "less-or-equal" predicate.
///
/// Two elements that are each less-or-equal to the other are `Equal`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use persistent_bst::comparator::from_less_or_equal;
///
/// let cmp = from_less_or_equal(|a: &i32, b: &i32| a <= b);
///
/// assert_eq!(cmp(&1, &2), Ordering::Less);
/// assert_eq!(cmp(&2, &2), Ordering::Equal);
/// assert_eq!(cmp(&3, &2), Ordering::Greater);
/// ```
pub fn from_less_or_equal<T, L>(le: L) -> Comparator<T>
where
    L: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    Arc::new(move |a: &T, b: &T| match (le(a, b), le(b, a)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, _) => Ordering::Greater,
    })
}
