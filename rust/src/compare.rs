//! Key ordering strategies.
//!
//! The tree only ever asks "is `a` strictly less than `b`?". Two keys are
//! equivalent when neither is less than the other.

use std::cmp::Ordering;

/// A strict weak ordering over `K`, injected into the map at construction.
pub trait Comparator<K> {
    /// Returns true if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Three-way comparison derived from [`less`](Comparator::less).
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys by the reverse of their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord> Comparator<K> for ReverseOrder {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        b < a
    }
}

/// Adapts a `less` closure into a [`Comparator`].
///
/// ```
/// use avltree::{AvlTreeMap, FnComparator};
///
/// let by_len = FnComparator(|a: &&str, b: &&str| a.len() < b.len());
/// let mut tree = AvlTreeMap::with_comparator(by_len);
/// tree.insert("ccc", 3);
/// tree.insert("a", 1);
/// tree.insert("bb", 2);
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, ["a", "bb", "ccc"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<K, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}
