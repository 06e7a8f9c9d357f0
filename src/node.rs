use crate::{Error, Node, NodeId, Side};

impl<T> Node<T> {
    pub fn new(
        element: T,
        left: Option<NodeId>,
        right: Option<NodeId>,
        parent: Option<NodeId>,
    ) -> Self {
        Node {
            element,
            left,
            right,
            parent,
        }
    }

    #[inline(always)]
    pub fn element(&self) -> &T {
        &self.element
    }

    #[inline(always)]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Links `child` into the given slot. The slot must be free; a second
    /// attachment is refused and the first link kept.
    pub fn attach_child(&mut self, side: Side, child: NodeId) -> Result<(), Error> {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        if slot.is_some() {
            return Err(Error::General(format!(
                "{side:?} child link already occupied"
            )));
        }
        *slot = Some(child);
        Ok(())
    }

    /// Which slot `child` occupies. The caller guarantees `child` really is
    /// one of this node's children.
    #[inline(always)]
    pub fn which_side(&self, child: NodeId) -> Side {
        if self.right == Some(child) {
            Side::Right
        } else {
            debug_assert_eq!(self.left, Some(child));
            Side::Left
        }
    }

    pub fn into_element(self) -> T {
        self.element
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attach_and_classify_children() {
        let mut parent: Node<i32> = Node::new(10, None, None, None);
        parent.attach_child(Side::Left, NodeId(1)).unwrap();
        parent.attach_child(Side::Right, NodeId(2)).unwrap();
        assert_eq!(Some(NodeId(1)), parent.child(Side::Left));
        assert_eq!(Some(NodeId(2)), parent.child(Side::Right));
        assert_eq!(Side::Left, parent.which_side(NodeId(1)));
        assert_eq!(Side::Right, parent.which_side(NodeId(2)));
    }

    #[test]
    fn occupied_links_reject_a_second_child() {
        let mut parent: Node<i32> = Node::new(10, None, None, None);
        parent.attach_child(Side::Left, NodeId(1)).unwrap();
        let err = parent.attach_child(Side::Left, NodeId(3)).unwrap_err();
        assert!(matches!(err, Error::General(_)));
        assert_eq!(Some(NodeId(1)), parent.child(Side::Left));
    }

    #[test]
    fn into_element_returns_the_stored_copy() {
        let node = Node::new(String::from("verger"), None, None, Some(NodeId(0)));
        assert_eq!(Some(NodeId(0)), node.parent());
        assert_eq!("verger", node.into_element());
    }
}
