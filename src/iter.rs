use std::{cmp::Ordering, iter::FusedIterator};

use crate::{Callbacks, Error, NodeId, RangeTree};

/// An iterator over the elements of a `RangeTree`, smallest to largest.
///
/// This `struct` is created by the [`iter`] method on [`RangeTree`]. See its
/// documentation for more.
///
/// [`iter`]: RangeTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, C: Callbacks> {
    tree: &'a RangeTree<C>,
    next: Option<NodeId>,
    remaining: usize,
}

/// An iterator over the elements of a `RangeTree` inside a closed range,
/// smallest to largest.
///
/// This `struct` is created by the [`range`] method on [`RangeTree`]. See
/// its documentation for more.
///
/// [`range`]: RangeTree::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, C: Callbacks> {
    tree: &'a RangeTree<C>,
    next: Option<NodeId>,
    hi: &'a C::Element,
}

impl<C: Callbacks> RangeTree<C> {
    /// Gets an iterator over the elements of the tree, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use verger::{Natural, RangeTree};
    ///
    /// let mut tree = RangeTree::with_callbacks(Natural::new());
    /// tree.insert(&2)?;
    /// tree.insert(&1)?;
    ///
    /// let elements: Vec<i32> = tree.iter().copied().collect();
    /// assert_eq!(elements, [1, 2]);
    /// # Ok::<(), verger::Error>(())
    /// ```
    pub fn iter(&self) -> Iter<'_, C> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.minimum_from(root)),
            remaining: self.len,
        }
    }

    /// Gets an iterator over the elements between `lo` and `hi`, both ends
    /// included, in sorted order.
    ///
    /// Fails with [`Error::InvalidRange`] when `lo` sorts after `hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use verger::{Natural, RangeTree};
    ///
    /// let mut values = vec![1, 2, 3, 4, 5];
    /// let tree = RangeTree::from_elements_seeded(Natural::new(), &mut values, 7)?;
    ///
    /// let middle: Vec<i32> = tree.range(&2, &4)?.copied().collect();
    /// assert_eq!(middle, [2, 3, 4]);
    /// # Ok::<(), verger::Error>(())
    /// ```
    pub fn range<'a>(&'a self, lo: &C::Element, hi: &'a C::Element) -> Result<Range<'a, C>, Error> {
        if self.callbacks.compare(lo, hi) == Ordering::Greater {
            return Err(Error::InvalidRange);
        }
        Ok(Range {
            tree: self,
            next: self.find_min_above(lo),
            hi,
        })
    }
}

impl<'a, C: Callbacks> Iterator for Iter<'a, C> {
    type Item = &'a C::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        self.remaining -= 1;
        Some(self.tree.arena[id.index()].element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<C: Callbacks> ExactSizeIterator for Iter<'_, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<C: Callbacks> FusedIterator for Iter<'_, C> {}

impl<C: Callbacks> Clone for Iter<'_, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, C: Callbacks> IntoIterator for &'a RangeTree<C> {
    type Item = &'a C::Element;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Iter<'a, C> {
        self.iter()
    }
}

impl<'a, C: Callbacks> Iterator for Range<'a, C> {
    type Item = &'a C::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        let element = self.tree.arena[id.index()].element();
        if self.tree.callbacks.compare(element, self.hi) == Ordering::Greater {
            return None;
        }
        self.next = self.tree.successor(id);
        Some(element)
    }
}

impl<C: Callbacks> FusedIterator for Range<'_, C> {}

impl<C: Callbacks> Clone for Range<'_, C> {
    fn clone(&self) -> Self {
        Range {
            tree: self.tree,
            next: self.next,
            hi: self.hi,
        }
    }
}
