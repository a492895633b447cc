//! Tree wiring.
//!
//! Children form a singly linked list per parent: `first_child` points at the
//! head and `next_sibling` chains the rest in insertion order. Appending at the
//! tail walks the list; `append` and `push` are O(1).

use crate::error::{LayoutError, Result, fail_fast};
use crate::types::{ItemFlags, ItemId};

use super::arrays::{ChildIndices, NO_ITEM};
use super::context::LayoutContext;

/// Iterator over an item's children, in order.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    inner: ChildIndices<'a>,
}

impl Iterator for Children<'_> {
    type Item = ItemId;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|index| ItemId::new(index as u32))
    }
}

#[inline]
fn link(raw: u32) -> Option<ItemId> {
    (raw != NO_ITEM).then(|| ItemId::new(raw))
}

impl LayoutContext {
    // =========================================================================
    // Traversal
    // =========================================================================

    /// First child of an item, if any.
    #[track_caller]
    pub fn first_child(&self, id: ItemId) -> Option<ItemId> {
        link(self.items.first_child[self.index(id)])
    }

    /// Next sibling of an item, if any.
    #[track_caller]
    pub fn next_sibling(&self, id: ItemId) -> Option<ItemId> {
        link(self.items.next_sibling[self.index(id)])
    }

    /// Last child of an item. Walks the child list.
    #[track_caller]
    pub fn last_child(&self, id: ItemId) -> Option<ItemId> {
        self.items.last_child(self.index(id)).map(|index| ItemId::new(index as u32))
    }

    #[track_caller]
    pub fn children(&self, id: ItemId) -> Children<'_> {
        Children { inner: self.items.children(self.index(id)) }
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Validate `target` as an item about to be linked next to or under `anchor`.
    fn check_insertable(&self, anchor: ItemId, target: ItemId) -> Result<(usize, usize)> {
        let a = self.check(anchor)?;
        let t = self.check(target)?;
        if target.is_root() {
            return Err(LayoutError::RootInsertion);
        }
        if a == t {
            return Err(LayoutError::SelfInsertion(target));
        }
        if self.items.flags[t].is_inserted() {
            return Err(LayoutError::AlreadyInserted(target));
        }
        Ok((a, t))
    }

    /// Put `child` at the end of `parent`'s children.
    pub fn try_insert(&mut self, parent: ItemId, child: ItemId) -> Result<()> {
        let (p, c) = self.check_insertable(parent, child)?;
        match self.items.last_child(p) {
            Some(last) => self.items.next_sibling[last] = c as u32,
            None => self.items.first_child[p] = c as u32,
        }
        self.items.next_sibling[c] = NO_ITEM;
        self.items.flags[c].insert(ItemFlags::INSERTED);
        Ok(())
    }

    /// Put `child` at the end of `parent`'s children. Aborts on misuse.
    #[track_caller]
    pub fn insert(&mut self, parent: ItemId, child: ItemId) {
        if let Err(err) = self.try_insert(parent, child) {
            fail_fast(err);
        }
    }

    /// Link `later` directly after `earlier` in whatever list `earlier` is in.
    pub fn try_append(&mut self, earlier: ItemId, later: ItemId) -> Result<()> {
        let (e, l) = self.check_insertable(earlier, later)?;
        self.items.next_sibling[l] = self.items.next_sibling[e];
        self.items.next_sibling[e] = l as u32;
        self.items.flags[l].insert(ItemFlags::INSERTED);
        Ok(())
    }

    /// Link `later` directly after `earlier`. Aborts on misuse.
    ///
    /// Keep the last inserted handle around and call this in a loop to build long
    /// child lists without walking them.
    #[track_caller]
    pub fn append(&mut self, earlier: ItemId, later: ItemId) {
        if let Err(err) = self.try_append(earlier, later) {
            fail_fast(err);
        }
    }

    /// Make `child` the first of `parent`'s children.
    pub fn try_push(&mut self, parent: ItemId, child: ItemId) -> Result<()> {
        let (p, c) = self.check_insertable(parent, child)?;
        self.items.next_sibling[c] = self.items.first_child[p];
        self.items.first_child[p] = c as u32;
        self.items.flags[c].insert(ItemFlags::INSERTED);
        Ok(())
    }

    /// Make `child` the first of `parent`'s children. Aborts on misuse.
    #[track_caller]
    pub fn push(&mut self, parent: ItemId, child: ItemId) {
        if let Err(err) = self.try_push(parent, child) {
            fail_fast(err);
        }
    }
}
