//! An unordered collection that may contain repeated elements.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An unordered collection of elements, where each element may appear more than once.
///
/// Two multisets are equal if they contain the same elements with the same multiplicities,
/// regardless of the order they were inserted in. Hashing is consistent with equality.
///
/// Comparisons are quadratic in the number of elements, which is fine for the operand lists of an
/// expression node.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Multiset<T> {
    items: Vec<T>,
}

impl<T> Default for Multiset<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Multiset<T> {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements, counting repeats.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the multiset has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an element.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Iterates over the elements, in no particular order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the only element of the multiset, or the multiset itself if it does not have exactly
    /// one element.
    pub fn into_single(mut self) -> Result<T, Self> {
        if self.items.len() == 1 {
            if let Some(item) = self.items.pop() {
                return Ok(item);
            }
        }
        Err(self)
    }

    /// Applies a function to every element.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Multiset<U> {
        self.items.into_iter().map(f).collect()
    }
}

impl<T: PartialEq> Multiset<T> {
    /// Returns true if the multiset contains at least one occurrence of the element.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Removes one occurrence of the element, returning true if it was present.
    pub fn remove_one(&mut self, item: &T) -> bool {
        match self.items.iter().position(|other| other == item) {
            Some(index) => {
                self.items.swap_remove(index);
                true
            },
            None => false,
        }
    }

    /// Returns the first of the given candidates that is also an element of this multiset.
    pub fn first_shared<'a>(&self, candidates: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        candidates.into_iter().find(|candidate| self.contains(candidate))
    }
}

impl<T: PartialEq> PartialEq for Multiset<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut matched = vec![false; other.len()];
        self.items.iter().all(|item| {
            let found = other.items
                .iter()
                .enumerate()
                .position(|(index, candidate)| !matched[index] && candidate == item);
            match found {
                Some(index) => {
                    matched[index] = true;
                    true
                },
                None => false,
            }
        })
    }
}

impl<T: Eq> Eq for Multiset<T> {}

impl<T: Hash> Hash for Multiset<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut hashes = self.items
            .iter()
            .map(|item| {
                let mut hasher = DefaultHasher::new();
                item.hash(&mut hasher);
                hasher.finish()
            })
            .collect::<Vec<_>>();
        hashes.sort_unstable();
        hashes.hash(state);
    }
}

impl<T> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<T> From<Vec<T>> for Multiset<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> IntoIterator for Multiset<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Multiset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
