//! Contains the syntax tree nodes that represent the structure of the source code.

use getset::Getters;

pub mod declaration;
pub mod expression;
pub mod module;
pub mod statement;

/// Represents a non-empty, singly linked list of elements.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// ConsList:
///     Element (',' Element)*
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ConsList<T> {
    /// The first element of the list.
    #[get = "pub"]
    head: T,
    /// The remaining elements, [`None`] for the last cell.
    #[get = "pub"]
    tail: Option<Box<ConsList<T>>>,
}

impl<T> ConsList<T> {
    /// Creates a cons cell.
    #[must_use]
    pub fn new(head: T, tail: Option<Self>) -> Self {
        Self {
            head,
            tail: tail.map(Box::new),
        }
    }

    /// Builds a list from the elements in order, [`None`] if there are none.
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Option<Self> {
        elements
            .into_iter()
            .rev()
            .fold(None, |tail, head| Some(Self::new(head, tail)))
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: Some(self) }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always `false`; a cons cell holds at least one element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Iterator over the elements of a [`ConsList`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    next: Option<&'a ConsList<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next?;
        self.next = cell.tail.as_deref();
        Some(&cell.head)
    }
}

impl<'a, T> IntoIterator for &'a ConsList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        assert_eq!(ConsList::<u8>::from_vec(Vec::new()), None);

        let list = ConsList::from_vec(vec![1, 2, 3]).unwrap();
        assert_eq!(*list.head(), 1);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        let last = list.tail().as_deref().and_then(|cell| cell.tail().as_deref());
        assert_eq!(last.map(ConsList::head), Some(&3));
        assert_eq!(last.and_then(|cell| cell.tail().as_ref()), None);
    }
}
