use std::{cmp::Ordering::*, fmt, io::Write, mem};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Callbacks, Error, Node, NodeId, RangeTree, Side, shuffle};

impl<C: Callbacks + Default> RangeTree<C> {
    pub fn new() -> Self {
        Self::with_callbacks(C::default())
    }
}

impl<C: Callbacks + Default> Default for RangeTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Callbacks> RangeTree<C> {
    pub fn with_callbacks(callbacks: C) -> Self {
        RangeTree {
            arena: Vec::new(),
            root: None,
            max: None,
            len: 0,
            callbacks,
        }
    }

    /// Builds a tree from `elements`, permuting the slice in place in a
    /// randomized order first and then inserting a copy of each element.
    ///
    /// The caller's slice stays permuted afterwards. Equal inputs fail the
    /// build with [`Error::DuplicateElement`], and any copies already taken
    /// are disposed.
    pub fn from_elements(callbacks: C, elements: &mut [C::Element]) -> Result<Self, Error> {
        let seed: u64 = rand::rng().random();
        Self::from_elements_seeded(callbacks, elements, seed)
    }

    /// Same as [`Self::from_elements`], with the permutation seeded by
    /// `seed`. Two builds from the same slice and seed produce the same
    /// tree shape.
    pub fn from_elements_seeded(
        callbacks: C,
        elements: &mut [C::Element],
        seed: u64,
    ) -> Result<Self, Error> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        shuffle::permute(&mut rng, elements);

        let mut tree = Self::with_callbacks(callbacks);
        if tree.arena.try_reserve(elements.len()).is_err() {
            return Err(Error::OutOfMemory);
        }
        for element in elements.iter() {
            tree.insert(element)?;
        }
        Ok(tree)
    }

    /// Copies `element` into the tree.
    ///
    /// The copy is taken through [`Callbacks::duplicate`]; the caller keeps
    /// the original. A failed insert leaves the tree exactly as it was, and
    /// duplicates are detected before any copy is taken.
    pub fn insert(&mut self, element: &C::Element) -> Result<(), Error> {
        let anchor = match self.search_node(element) {
            None => None,
            Some(near) => {
                match self
                    .callbacks
                    .compare(self.arena[near.index()].element(), element)
                {
                    Equal => return Err(Error::DuplicateElement),
                    Greater => Some((near, Side::Left)),
                    Less => Some((near, Side::Right)),
                }
            }
        };

        let Some(copy) = self.callbacks.duplicate(element) else {
            return Err(Error::OutOfMemory);
        };
        let Some(id) = self.reserve_slot() else {
            self.callbacks.dispose(copy);
            return Err(Error::OutOfMemory);
        };

        match anchor {
            None => {
                if let Err(err) = self.set_root(id) {
                    self.callbacks.dispose(copy);
                    return Err(err);
                }
                self.arena.push(Node::new(copy, None, None, None));
                self.max = Some(id);
            }
            Some((parent, side)) => {
                if let Err(err) = self.arena[parent.index()].attach_child(side, id) {
                    self.callbacks.dispose(copy);
                    return Err(err);
                }
                self.arena.push(Node::new(copy, None, None, Some(parent)));
                if side == Side::Right && self.is_new_maximum(element) {
                    self.max = Some(id);
                }
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Finds `element` or its closest neighbor on the search path.
    ///
    /// An exact match returns the stored equal element. A miss returns the
    /// element of the last node the descent visited, which is the node a
    /// subsequent insert of `element` would attach under. Only the empty
    /// tree returns `None`. Use [`Self::get`] for exact lookups.
    pub fn search(&self, element: &C::Element) -> Option<&C::Element> {
        self.search_node(element)
            .map(|near| self.arena[near.index()].element())
    }

    /// Finds the stored element equal to `element`.
    pub fn get(&self, element: &C::Element) -> Option<&C::Element> {
        let near = self.search_node(element)?;
        let candidate = self.arena[near.index()].element();
        match self.callbacks.compare(candidate, element) {
            Equal => Some(candidate),
            _ => None,
        }
    }

    pub fn contains(&self, element: &C::Element) -> bool {
        self.get(element).is_some()
    }

    pub fn minimum(&self) -> Option<&C::Element> {
        let root = self.root?;
        Some(self.arena[self.minimum_from(root).index()].element())
    }

    /// The greatest element, answered from the cached maximum.
    pub fn maximum(&self) -> Option<&C::Element> {
        self.max.map(|max| self.arena[max.index()].element())
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writes every element in `[lo, hi]` to `sink`, one per line, smallest
    /// to largest.
    ///
    /// Elements are rendered through [`Callbacks::format`]; each rendered
    /// line is released before the next element is visited. Fails with
    /// [`Error::InvalidRange`] when `lo` sorts after `hi`.
    pub fn print_range<W: Write>(
        &self,
        lo: &C::Element,
        hi: &C::Element,
        sink: &mut W,
    ) -> Result<(), Error> {
        for element in self.range(lo, hi)? {
            let line = self.callbacks.format(element).ok_or(Error::OutOfMemory)?;
            writeln!(sink, "{line}")?;
        }
        Ok(())
    }

    /// Releases every element through [`Callbacks::dispose`] and leaves the
    /// tree empty and reusable.
    ///
    /// Disposal runs bottom-up: right subtree, then left subtree, then the
    /// node itself.
    pub fn clear(&mut self) {
        // Preorder ids (node, left, right); reversed, that is a postorder
        // visiting right subtree, left subtree, node.
        let mut order = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = &self.arena[id.index()];
            if let Some(right) = node.child(Side::Right) {
                stack.push(right);
            }
            if let Some(left) = node.child(Side::Left) {
                stack.push(left);
            }
        }

        let mut nodes: Vec<Option<Node<C::Element>>> =
            mem::take(&mut self.arena).into_iter().map(Some).collect();
        for id in order.into_iter().rev() {
            if let Some(node) = nodes[id.index()].take() {
                self.callbacks.dispose(node.into_element());
            }
        }

        self.root = None;
        self.max = None;
        self.len = 0;
    }

    /// The next node in element order, or `None` past the maximum.
    ///
    /// Purely structural: no comparisons, only child and parent links.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if Some(id) == self.max {
            return None;
        }
        if let Some(right) = self.arena[id.index()].child(Side::Right) {
            return Some(self.minimum_from(right));
        }
        // Everything below is smaller; the next element is the first
        // ancestor reached by stepping up out of a left child.
        let mut current = id;
        loop {
            let parent = self.arena[current.index()].parent()?;
            match self.arena[parent.index()].which_side(current) {
                Side::Left => return Some(parent),
                Side::Right => current = parent,
            }
        }
    }

    pub(crate) fn minimum_from(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id.index()].child(Side::Left) {
            id = left;
        }
        id
    }

    /// The smallest element at or above `lo`, by id.
    pub(crate) fn find_min_above(&self, lo: &C::Element) -> Option<NodeId> {
        let mut current = self.root;
        let mut candidate: Option<NodeId> = None;
        while let Some(id) = current {
            let node = &self.arena[id.index()];
            if self.callbacks.compare(node.element(), lo) != Less {
                let better = candidate.map_or(true, |c| {
                    self.callbacks
                        .compare(self.arena[c.index()].element(), node.element())
                        == Greater
                });
                if better {
                    candidate = Some(id);
                }
                current = node.child(Side::Left);
            } else {
                current = node.child(Side::Right);
            }
        }
        candidate
    }

    /// Best-effort descent: the node holding an equal element, or the last
    /// node visited before the search would fall off the tree. `None` only
    /// for the empty tree.
    fn search_node(&self, element: &C::Element) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            let node = &self.arena[current.index()];
            let next = match self.callbacks.compare(node.element(), element) {
                Equal => return Some(current),
                Greater => node.child(Side::Left),
                Less => node.child(Side::Right),
            };
            match next {
                Some(child) => current = child,
                None => return Some(current),
            }
        }
    }

    fn set_root(&mut self, id: NodeId) -> Result<(), Error> {
        if self.root.is_some() {
            return Err(Error::RootAlreadySet);
        }
        self.root = Some(id);
        Ok(())
    }

    /// Room for one more node, or `None` when the arena cannot grow.
    fn reserve_slot(&mut self) -> Option<NodeId> {
        let slot = u32::try_from(self.arena.len()).ok()?;
        self.arena.try_reserve(1).ok()?;
        Some(NodeId(slot))
    }

    fn is_new_maximum(&self, element: &C::Element) -> bool {
        self.max.is_some_and(|max| {
            self.callbacks
                .compare(self.arena[max.index()].element(), element)
                == Less
        })
    }
}

impl<C: Callbacks> Drop for RangeTree<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<C: Callbacks> fmt::Debug for RangeTree<C>
where
    C::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
