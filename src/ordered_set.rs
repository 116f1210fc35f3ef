//! Ordered set of [`Token`](crate::token::Token) values.
//!
//! Preserves insertion order while giving O(1) amortized membership tests,
//! pairing a hash map with an append-only vector the way `IndexSet` itself
//! does internally. Fixed-point loops elsewhere in the crate detect
//! "no change across a pass" by cloning an `OrderedSet` before the pass and
//! comparing it against the post-pass set — `IndexSet`'s `PartialEq`
//! compares by contents, not by order, which is exactly what that
//! change-detection needs.

use indexmap::IndexSet;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    inner: IndexSet<T>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            inner: IndexSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: Eq + Hash + Clone> Eq for OrderedSet<T> {}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(value: T) -> Self {
        let mut set = Self::new();
        set.insert(value);
        set
    }

    /// Inserts `value`, a no-op if already present. Returns `true` if the
    /// set changed.
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.insert(value)
    }

    /// Inserts every element of `other` that is not already present.
    /// Returns `true` if the set changed.
    pub fn extend_with(&mut self, other: &OrderedSet<T>) -> bool {
        let mut changed = false;
        for item in other.inner.iter() {
            if self.inner.insert(item.clone()) {
                changed = true;
            }
        }
        changed
    }

    /// Removes a single element. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.shift_remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.inner.iter()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: IndexSet::from_iter(iter),
        }
    }
}

impl<'a, T: Eq + Hash + Clone> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<T: Eq + Hash + Clone> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = OrderedSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut set = OrderedSet::new();
        set.insert(3);
        set.insert(1);
        set.insert(2);
        let order: Vec<_> = set.iter().copied().collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = OrderedSet::new();
        a.insert(1);
        a.insert(2);
        let mut b = OrderedSet::new();
        b.insert(2);
        b.insert(1);
        assert_eq!(a, b);
    }

    #[test]
    fn extend_with_reports_change() {
        let mut a = OrderedSet::new();
        a.insert(1);
        let mut b = OrderedSet::new();
        b.insert(1);
        b.insert(2);
        assert!(a.extend_with(&b));
        assert!(!a.extend_with(&b));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn remove_single_element() {
        let mut set = OrderedSet::new();
        set.insert(1);
        set.insert(2);
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(!set.contains(&1));
        assert!(set.contains(&2));
    }
}
