//! An unbalanced binary search tree for ordered range queries, kept shallow
//! by building it in a randomized order.
//!
//! Elements are opaque to the tree: a [`Callbacks`] implementation supplies
//! ordering, copying, rendering, and disposal, and the tree owns one copy of
//! every element until teardown hands it back to [`Callbacks::dispose`].
//!
//! ```
//! use verger::{Natural, RangeTree};
//!
//! let mut values = vec![5, 2, 3, 4, 1, 6, 7, 10, 8, 9];
//! let mut tree = RangeTree::from_elements_seeded(Natural::new(), &mut values, 42)?;
//!
//! assert_eq!(tree.len(), 10);
//! assert_eq!(tree.minimum(), Some(&1));
//! assert_eq!(tree.maximum(), Some(&10));
//!
//! let middle: Vec<i32> = tree.range(&4, &8)?.copied().collect();
//! assert_eq!(middle, [4, 5, 6, 7, 8]);
//!
//! tree.insert(&11)?;
//! assert_eq!(tree.maximum(), Some(&11));
//! # Ok::<(), verger::Error>(())
//! ```

mod iter;
mod node;
mod shuffle;
mod tree;

pub use iter::{Iter, Range};

use std::{cmp::Ordering, fmt::Display, marker::PhantomData};

use thiserror::Error;

/// Which child slot of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(u32);

impl NodeId {
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One tree vertex: an owned element copy plus its structural links.
#[derive(Debug)]
pub(crate) struct Node<T> {
    element: T,
    // Arena indices; parent is a back-reference, never ownership.
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

/// The capability functions a tree uses to handle its elements.
///
/// The tree never inspects an element directly; everything it knows about
/// elements flows through these four methods.
pub trait Callbacks {
    type Element;

    /// Total order over elements. Must not change while a tree holds them.
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering;

    /// Copies an element into the tree. `None` reports allocation failure.
    fn duplicate(&self, source: &Self::Element) -> Option<Self::Element>;

    /// Renders an element for range output. `None` reports allocation
    /// failure.
    fn format(&self, element: &Self::Element) -> Option<String>;

    /// Releases a copy the tree no longer holds.
    fn dispose(&self, element: Self::Element);
}

/// Callbacks for element types that already order, clone, and display
/// themselves.
pub struct Natural<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Natural<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Natural<T> {
    pub fn new() -> Self {
        Natural {
            _phantom: PhantomData,
        }
    }
}

impl<T: Ord + Clone + Display> Callbacks for Natural<T> {
    type Element = T;

    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }

    fn duplicate(&self, source: &T) -> Option<T> {
        Some(source.clone())
    }

    fn format(&self, element: &T) -> Option<String> {
        Some(element.to_string())
    }

    fn dispose(&self, element: T) {
        drop(element);
    }
}

/// Errors reported by tree operations.
///
/// A failed operation leaves its tree exactly as it was.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Copying, rendering, or arena growth could not get memory.
    #[error("out of memory")]
    OutOfMemory,
    /// A required input was absent.
    #[error("required input was absent")]
    NullInput,
    /// A root was installed over an existing root.
    #[error("tree already has a root")]
    RootAlreadySet,
    /// The inserted element is already in the tree.
    #[error("element is already in the tree")]
    DuplicateElement,
    /// A range query ran with its bounds inverted.
    #[error("range lower bound sorts after its upper bound")]
    InvalidRange,
    /// Anything else: sink write failures, corrupted links.
    #[error("{0}")]
    General(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::General(err.to_string())
    }
}

/// A randomized range tree.
///
/// An ordinary binary search tree with no rebalancing: bulk construction
/// permutes its input first, so depth stays near-logarithmic in expectation,
/// while single inserts attach wherever the search path ends.
/// `C` supplies the capability functions.
pub struct RangeTree<C: Callbacks> {
    // Node storage; ids index into this vec. Nothing is removed before
    // teardown, so ids stay stable.
    arena: Vec<Node<C::Element>>,
    root: Option<NodeId>,
    // Greatest element, kept current by insertion; successor walks stop
    // here.
    max: Option<NodeId>,
    len: usize,
    callbacks: C,
}
