//! Layout Context - The item arena.
//!
//! Manages the lifecycle of item handles:
//! - Dense allocation: handle `n` is slot `n`, no free list
//! - Growth by [`next_capacity`] when the arrays are full
//! - O(1) reset that keeps the storage for the next frame
//!
//! All per-item accessors live here. Tree wiring is in `tree.rs`.

use log::debug;

use crate::error::{LayoutError, Result, fail_fast};
use crate::types::{
    Anchor, Axis, BOX_MASK, BehaveFlags, BoxFlags, Direction, ItemFlags, ItemId, Justify,
    LAYOUT_MASK, Margins, Rect, Size, USER_MASK, USER_SHIFT,
};

use super::arrays::{ItemArrays, RectArray, next_capacity};

/// Owner of every item and rectangle of one layout tree.
///
/// # Example
///
/// ```
/// use spark_layout::{BehaveFlags, BoxFlags, LayoutContext, Rect};
///
/// let mut ctx = LayoutContext::new();
/// let root = ctx.create_item();
/// let child = ctx.create_item();
/// ctx.set_size(root, 30.0, 40.0);
/// ctx.set_contain(root, BoxFlags::COLUMN);
/// ctx.set_behave(child, BehaveFlags::FILL);
/// ctx.insert(root, child);
///
/// ctx.solve();
/// assert_eq!(ctx.rect(child), Rect::new(0.0, 0.0, 30.0, 40.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutContext {
    pub(crate) items: ItemArrays,
    pub(crate) rects: RectArray,
    capacity: usize,
    count: usize,
}

impl LayoutContext {
    /// Create an empty context. Does not allocate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that holds `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut ctx = Self::new();
        ctx.reserve(capacity);
        ctx
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    /// Number of items created since the last reset.
    #[inline]
    pub fn items_count(&self) -> usize {
        self.count
    }

    /// Number of items the context holds without reallocating.
    #[inline]
    pub fn items_capacity(&self) -> usize {
        self.capacity
    }

    /// Make room for at least `count` items. No-op when there already is.
    ///
    /// Computed rects are stale after a reallocation until the next solve.
    pub fn reserve(&mut self, count: usize) {
        if count <= self.capacity {
            return;
        }
        debug!("growing layout arena from {} to {} items", self.capacity, count);
        self.items.resize(count);
        self.rects.resize(count);
        self.capacity = count;
    }

    /// Forget every item. Keeps the storage; handles will be handed out again.
    #[inline]
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Create a new item with cleared directives and a zero rect.
    pub fn create_item(&mut self) -> ItemId {
        let index = self.count;
        if index >= self.capacity {
            self.reserve(next_capacity(self.capacity));
        }
        self.count += 1;
        self.items.clear_at(index);
        self.rects.clear_at(index);
        ItemId::new(index as u32)
    }

    // =========================================================================
    // Handle validation
    // =========================================================================

    /// Index of `id`, or the reason it is not a live handle.
    #[inline]
    pub(crate) fn check(&self, id: ItemId) -> Result<usize> {
        if id.index() < self.count {
            Ok(id.index())
        } else {
            Err(LayoutError::InvalidHandle { id, count: self.count as u32 })
        }
    }

    /// Index of `id`. Aborts on a dead handle.
    #[inline]
    #[track_caller]
    pub(crate) fn index(&self, id: ItemId) -> usize {
        match self.check(id) {
            Ok(index) => index,
            Err(err) => fail_fast(err),
        }
    }

    /// True if `id` is a live handle of this context.
    #[inline]
    pub fn contains(&self, id: ItemId) -> bool {
        id.index() < self.count
    }

    // =========================================================================
    // Directives
    // =========================================================================

    /// Full packed flag word of an item.
    #[track_caller]
    pub fn flags(&self, id: ItemId) -> ItemFlags {
        self.items.flags[self.index(id)]
    }

    /// Set how the item lays out its children. Other flag regions are kept.
    #[track_caller]
    pub fn set_contain(&mut self, id: ItemId, flags: BoxFlags) {
        let i = self.index(id);
        self.items.flags[i] = self.items.flags[i].with_masked(BOX_MASK, flags.bits());
    }

    #[track_caller]
    pub fn contain(&self, id: ItemId) -> BoxFlags {
        self.flags(id).contain()
    }

    /// Set how the item is placed by its parent. Other flag regions are kept.
    #[track_caller]
    pub fn set_behave(&mut self, id: ItemId, flags: BehaveFlags) {
        let i = self.index(id);
        self.items.flags[i] = self.items.flags[i].with_masked(LAYOUT_MASK, flags.bits());
    }

    #[track_caller]
    pub fn behave(&self, id: ItemId) -> BehaveFlags {
        self.flags(id).behave()
    }

    #[track_caller]
    pub fn direction(&self, id: ItemId) -> Direction {
        self.contain(id).direction()
    }

    #[track_caller]
    pub fn justify(&self, id: ItemId) -> Justify {
        self.contain(id).justify()
    }

    #[track_caller]
    pub fn wraps(&self, id: ItemId) -> bool {
        self.contain(id).wraps()
    }

    #[track_caller]
    pub fn anchor(&self, id: ItemId, axis: Axis) -> Anchor {
        self.behave(id).anchor(axis)
    }

    /// Store application data in the reserved flag bits.
    #[track_caller]
    pub fn set_user_flags(&mut self, id: ItemId, value: u16) {
        let i = self.index(id);
        self.items.flags[i] =
            self.items.flags[i].with_masked(USER_MASK, u32::from(value) << USER_SHIFT);
    }

    #[track_caller]
    pub fn user_flags(&self, id: ItemId) -> u16 {
        self.flags(id).user()
    }

    // =========================================================================
    // Size, margins, grow
    // =========================================================================

    /// Set the explicit size. A zero component means "derive from children".
    #[track_caller]
    pub fn set_size(&mut self, id: ItemId, width: f32, height: f32) {
        let i = self.index(id);
        self.items.size[i] = [width, height];
        let mut flags = self.items.flags[i];
        flags.set(ItemFlags::HFIXED, width != 0.0);
        flags.set(ItemFlags::VFIXED, height != 0.0);
        self.items.flags[i] = flags;
    }

    /// Explicit size as set by [`set_size`](Self::set_size).
    #[track_caller]
    pub fn size(&self, id: ItemId) -> Size {
        let [width, height] = self.items.size[self.index(id)];
        Size::new(width, height)
    }

    #[track_caller]
    pub fn set_margins(&mut self, id: ItemId, margins: Margins) {
        let i = self.index(id);
        self.items.margins[i] = [margins.left, margins.top, margins.right, margins.bottom];
    }

    /// Shorthand for [`set_margins`](Self::set_margins).
    #[track_caller]
    pub fn set_margins_ltrb(&mut self, id: ItemId, left: f32, top: f32, right: f32, bottom: f32) {
        self.set_margins(id, Margins::new(left, top, right, bottom));
    }

    #[track_caller]
    pub fn margins(&self, id: ItemId) -> Margins {
        let [left, top, right, bottom] = self.items.margins[self.index(id)];
        Margins::new(left, top, right, bottom)
    }

    /// Weight of a filler when leftover space is shared. Negative values count as zero.
    #[track_caller]
    pub fn set_grow(&mut self, id: ItemId, grow: f32) {
        let i = self.index(id);
        self.items.grow[i] = grow.max(0.0);
    }

    #[track_caller]
    pub fn grow(&self, id: ItemId) -> f32 {
        self.items.grow[self.index(id)]
    }

    // =========================================================================
    // Line breaks
    // =========================================================================

    /// True if a wrapping parent starts a new line at this item.
    #[track_caller]
    pub fn is_line_break(&self, id: ItemId) -> bool {
        self.flags(id).is_break()
    }

    /// Drop both the manual `BREAK` and any recorded wrap point.
    #[track_caller]
    pub fn clear_item_break(&mut self, id: ItemId) {
        let i = self.index(id);
        self.items.flags[i] = ItemFlags::from_bits_retain(
            self.items.flags[i].bits() & !(BehaveFlags::BREAK.bits() | ItemFlags::AUTO_BREAK.bits()),
        );
    }

    /// Drop only the wrap point recorded by a previous solve.
    #[track_caller]
    pub fn clear_auto_break(&mut self, id: ItemId) {
        let i = self.index(id);
        self.items.flags[i].remove(ItemFlags::AUTO_BREAK);
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Computed rectangle. Zero for items a solve has not reached.
    #[track_caller]
    pub fn rect(&self, id: ItemId) -> Rect {
        self.rects.rect(self.index(id))
    }

    pub fn try_rect(&self, id: ItemId) -> Result<Rect> {
        self.check(id).map(|i| self.rects.rect(i))
    }
}
