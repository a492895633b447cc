//! Layout Solver - Two-pass box layout over the item arena.
//!
//! # Algorithm
//!
//! Each axis is solved independently, horizontal first:
//!
//! 1. **calc_size(X)**: natural widths, bottom-up ([`calc_size`])
//! 2. **arrange(X)**: distribute widths, top-down ([`arrange()`])
//! 3. **calc_size(Y)**: natural heights, bottom-up
//! 4. **arrange(Y)**: distribute heights, top-down
//!
//! Heights are measured after widths are arranged, so a wrapping row already
//! knows how many lines it has when its height is computed.
//!
//! # Wrap points
//!
//! Arranging a wrapping container records where each line starts on the child
//! that begins it. Later solves reuse those points, which keeps repeated solves
//! of an unchanged tree identical. When the space available to a wrapping
//! container changes, call [`LayoutContext::clear_child_breaks`] on it first.
//!
//! # Example
//!
//! ```
//! use spark_layout::{BehaveFlags, BoxFlags, LayoutContext, Rect};
//!
//! let mut ctx = LayoutContext::new();
//! let root = ctx.create_item();
//! ctx.set_size(root, 90.0, 3.0);
//! ctx.set_contain(root, BoxFlags::ROW);
//!
//! let anchors = [BehaveFlags::TOP, BehaveFlags::VCENTER, BehaveFlags::BOTTOM];
//! let cells: Vec<_> = anchors
//!     .into_iter()
//!     .map(|anchor| {
//!         let cell = ctx.create_item();
//!         ctx.set_size(cell, 0.0, 1.0);
//!         ctx.set_behave(cell, BehaveFlags::HFILL | anchor);
//!         ctx.insert(root, cell);
//!         cell
//!     })
//!     .collect();
//!
//! ctx.solve();
//! assert_eq!(ctx.rect(cells[1]), Rect::new(30.0, 1.0, 30.0, 1.0));
//! ```

mod arrange;
mod measure;

pub use arrange::arrange;
pub use measure::calc_size;

use log::trace;

use crate::engine::LayoutContext;
use crate::engine::arrays::NO_ITEM;
use crate::types::{Axis, ItemFlags, ItemId};

/// Solve the whole tree rooted at item 0. Does nothing on an empty context.
pub fn solve(ctx: &mut LayoutContext) {
    if ctx.items_count() > 0 {
        solve_from(ctx, ItemId::ROOT);
    }
}

/// Solve the subtree rooted at `id` as if it were a root.
///
/// `id` is placed at its near margins with its explicit or natural size, not
/// where its parent put it during the last solve.
#[track_caller]
pub fn solve_from(ctx: &mut LayoutContext, id: ItemId) {
    let index = ctx.index(id);
    trace!("solving layout from item {id} ({} items)", ctx.items_count());

    for axis in Axis::ALL {
        measure::calc_size_at(ctx, index, axis);
        arrange::arrange_at(ctx, index, axis);
    }

    trace!("solved layout from item {id}: {:?}", ctx.rects.rect(index));
}

impl LayoutContext {
    /// See [`solve`].
    pub fn solve(&mut self) {
        solve(self);
    }

    /// See [`solve_from`].
    #[track_caller]
    pub fn solve_from(&mut self, id: ItemId) {
        solve_from(self, id);
    }

    /// Forget the wrap points recorded on the direct children of `parent`.
    /// Manual breaks stay.
    #[track_caller]
    pub fn clear_child_breaks(&mut self, parent: ItemId) {
        let index = self.index(parent);
        let mut child = self.items.first_child[index];
        while child != NO_ITEM {
            let c = child as usize;
            self.items.flags[c].remove(ItemFlags::AUTO_BREAK);
            child = self.items.next_sibling[c];
        }
    }
}
