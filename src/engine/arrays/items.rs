//! Item Arrays
//!
//! Input side of the arena: everything the caller declares about an item.
//! Margins are stored as `[left, top, right, bottom]` and sizes as `[x, y]` so
//! the solver can address the near edge of axis `dim` as `[dim]` and the far
//! edge as `[dim + 2]`.

use crate::types::ItemFlags;

use super::NO_ITEM;

/// Struct-of-arrays storage for item inputs.
#[derive(Debug, Clone, Default)]
pub struct ItemArrays {
    pub(crate) flags: Vec<ItemFlags>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) margins: Vec<[f32; 4]>,
    pub(crate) size: Vec<[f32; 2]>,
    pub(crate) grow: Vec<f32>,
}

impl ItemArrays {
    /// Number of allocated slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Grow every column to `capacity` slots. Never shrinks.
    pub fn resize(&mut self, capacity: usize) {
        if capacity <= self.len() {
            return;
        }
        self.flags.resize(capacity, ItemFlags::empty());
        self.first_child.resize(capacity, NO_ITEM);
        self.next_sibling.resize(capacity, NO_ITEM);
        self.margins.resize(capacity, [0.0; 4]);
        self.size.resize(capacity, [0.0; 2]);
        self.grow.resize(capacity, 1.0);
    }

    /// Reset one slot to a fresh, unlinked item.
    pub fn clear_at(&mut self, index: usize) {
        self.flags[index] = ItemFlags::empty();
        self.first_child[index] = NO_ITEM;
        self.next_sibling[index] = NO_ITEM;
        self.margins[index] = [0.0; 4];
        self.size[index] = [0.0; 2];
        self.grow[index] = 1.0;
    }

    /// Iterate the raw indices of `parent`'s children in order.
    #[inline]
    pub fn children(&self, parent: usize) -> ChildIndices<'_> {
        ChildIndices { next_sibling: &self.next_sibling, next: self.first_child[parent] }
    }

    /// Index of the last child of `parent`, walking the sibling list.
    pub fn last_child(&self, parent: usize) -> Option<usize> {
        self.children(parent).last()
    }
}

/// Iterator over a singly linked child list.
#[derive(Debug, Clone)]
pub struct ChildIndices<'a> {
    next_sibling: &'a [u32],
    next: u32,
}

impl Iterator for ChildIndices<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NO_ITEM {
            return None;
        }
        let index = self.next as usize;
        self.next = self.next_sibling[index];
        Some(index)
    }
}
