//! Natural size computation (bottom-up).
//!
//! For one axis at a time, every item gets its position reset to its near
//! margin and its extent set to either the explicit size or the size its
//! children need. Children are always measured before their parent.

use crate::engine::LayoutContext;
use crate::engine::arrays::NO_ITEM;
use crate::types::{Axis, ItemId};

/// Compute natural sizes for `id` and its subtree along `axis`.
///
/// Overwrites the position of every visited item with its near margin.
#[track_caller]
pub fn calc_size(ctx: &mut LayoutContext, id: ItemId, axis: Axis) {
    let index = ctx.index(id);
    calc_size_at(ctx, index, axis);
}

pub(crate) fn calc_size_at(ctx: &mut LayoutContext, item: usize, axis: Axis) {
    let mut child = ctx.items.first_child[item];
    while child != NO_ITEM {
        calc_size_at(ctx, child as usize, axis);
        child = ctx.items.next_sibling[child as usize];
    }

    let dim = axis.index();
    let flags = ctx.items.flags[item];
    ctx.rects[item][dim] = ctx.items.margins[item][dim];

    if flags.is_fixed(axis) {
        ctx.rects[item][dim + 2] = ctx.items.size[item][dim];
        return;
    }

    let contain = flags.contain();
    let size = match (contain.direction().main_axis(), contain.wraps()) {
        (Some(main), true) if main == axis => wrapped_stacked_size(ctx, item, axis),
        // Row lines are already arranged by the time heights are measured.
        // Column lines are not, so only manual breaks are known.
        (Some(main), true) => wrapped_overlaid_size(ctx, item, axis, main == Axis::X),
        (Some(main), false) if main == axis => stacked_size(ctx, item, axis),
        _ => overlaid_size(ctx, item, axis),
    };
    ctx.rects[item][dim + 2] = size;
}

// =============================================================================
// Child extents
// =============================================================================

/// Space a child takes along `axis`: near margin + size + far margin.
#[inline]
pub(crate) fn outer_extent(ctx: &LayoutContext, child: usize, axis: Axis) -> f32 {
    let dim = axis.index();
    let rect = &ctx.rects[child];
    rect[dim] + rect[dim + 2] + ctx.items.margins[child][dim + 2]
}

fn overlaid_size(ctx: &LayoutContext, item: usize, axis: Axis) -> f32 {
    ctx.items
        .children(item)
        .fold(0.0_f32, |need, child| need.max(outer_extent(ctx, child, axis)))
}

fn stacked_size(ctx: &LayoutContext, item: usize, axis: Axis) -> f32 {
    ctx.items.children(item).map(|child| outer_extent(ctx, child, axis)).sum()
}

/// Longest line. Recorded wrap points are ignored, they depend on the space
/// this size is about to produce.
fn wrapped_stacked_size(ctx: &LayoutContext, item: usize, axis: Axis) -> f32 {
    let mut line = 0.0_f32;
    let mut longest = 0.0_f32;
    for child in ctx.items.children(item) {
        if ctx.items.flags[child].is_manual_break() {
            longest = longest.max(line);
            line = 0.0;
        }
        line += outer_extent(ctx, child, axis);
    }
    longest.max(line)
}

/// Sum of the thickest child of every line.
fn wrapped_overlaid_size(ctx: &LayoutContext, item: usize, axis: Axis, recorded: bool) -> f32 {
    let mut line = 0.0_f32;
    let mut total = 0.0_f32;
    for child in ctx.items.children(item) {
        let flags = ctx.items.flags[child];
        let breaks = if recorded { flags.is_break() } else { flags.is_manual_break() };
        if breaks {
            total += line;
            line = 0.0;
        }
        line = line.max(outer_extent(ctx, child, axis));
    }
    total + line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BehaveFlags, BoxFlags, ItemFlags, Margins, Rect};

    fn tree(ctx: &mut LayoutContext, contain: BoxFlags, sizes: &[(f32, f32)]) -> Vec<ItemId> {
        let root = ctx.create_item();
        ctx.set_contain(root, contain);
        let mut ids = vec![root];
        for &(w, h) in sizes {
            let child = ctx.create_item();
            ctx.set_size(child, w, h);
            ctx.insert(root, child);
            ids.push(child);
        }
        ids
    }

    fn measure(ctx: &mut LayoutContext, id: ItemId) -> (f32, f32) {
        calc_size(ctx, id, Axis::X);
        calc_size(ctx, id, Axis::Y);
        let rect = ctx.rect(id);
        (rect.width, rect.height)
    }

    #[test]
    fn test_free_model_overlays() {
        let mut ctx = LayoutContext::new();
        let ids = tree(&mut ctx, BoxFlags::FREE, &[(10.0, 4.0), (6.0, 9.0)]);
        assert_eq!(measure(&mut ctx, ids[0]), (10.0, 9.0));
    }

    #[test]
    fn test_row_stacks_main_axis() {
        let mut ctx = LayoutContext::new();
        let ids = tree(&mut ctx, BoxFlags::ROW, &[(10.0, 4.0), (6.0, 9.0)]);
        assert_eq!(measure(&mut ctx, ids[0]), (16.0, 9.0));
    }

    #[test]
    fn test_column_stacks_main_axis() {
        let mut ctx = LayoutContext::new();
        let ids = tree(&mut ctx, BoxFlags::COLUMN, &[(10.0, 4.0), (6.0, 9.0)]);
        assert_eq!(measure(&mut ctx, ids[0]), (10.0, 13.0));
    }

    #[test]
    fn test_margins_count_towards_need() {
        let mut ctx = LayoutContext::new();
        let ids = tree(&mut ctx, BoxFlags::ROW, &[(10.0, 4.0)]);
        ctx.set_margins(ids[1], Margins::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(measure(&mut ctx, ids[0]), (14.0, 10.0));
        // position is reset to the near margin
        assert_eq!(ctx.rect(ids[1]), Rect::new(1.0, 2.0, 10.0, 4.0));
    }

    #[test]
    fn test_explicit_size_wins() {
        let mut ctx = LayoutContext::new();
        let ids = tree(&mut ctx, BoxFlags::ROW, &[(10.0, 4.0), (6.0, 9.0)]);
        ctx.set_size(ids[0], 5.0, 0.0);
        assert_eq!(measure(&mut ctx, ids[0]), (5.0, 9.0));
    }

    #[test]
    fn test_wrapped_row_uses_manual_breaks() {
        let mut ctx = LayoutContext::new();
        let ids = tree(
            &mut ctx,
            BoxFlags::ROW | BoxFlags::WRAP,
            &[(10.0, 4.0), (6.0, 9.0), (7.0, 2.0), (1.0, 1.0)],
        );
        ctx.set_behave(ids[3], BehaveFlags::BREAK);
        // lines: [10, 6, 7] and [1]
        assert_eq!(measure(&mut ctx, ids[0]), (23.0, 10.0));
    }

    #[test]
    fn test_wrapped_row_height_follows_recorded_breaks() {
        let mut ctx = LayoutContext::new();
        let ids = tree(&mut ctx, BoxFlags::ROW | BoxFlags::WRAP, &[(10.0, 4.0), (6.0, 9.0)]);
        ctx.items.flags[ids[2].index()].insert(ItemFlags::AUTO_BREAK);
        // width ignores the recorded break, height counts two lines
        assert_eq!(measure(&mut ctx, ids[0]), (16.0, 13.0));
    }

    #[test]
    fn test_wrapped_column_mirrors_row() {
        let mut ctx = LayoutContext::new();
        let ids = tree(
            &mut ctx,
            BoxFlags::COLUMN | BoxFlags::WRAP,
            &[(4.0, 10.0), (9.0, 6.0), (2.0, 7.0), (1.0, 1.0)],
        );
        ctx.set_behave(ids[3], BehaveFlags::BREAK);
        assert_eq!(measure(&mut ctx, ids[0]), (10.0, 23.0));

        // recorded column breaks are not known before the vertical pass
        ctx.items.flags[ids[2].index()].insert(ItemFlags::AUTO_BREAK);
        assert_eq!(measure(&mut ctx, ids[0]), (10.0, 23.0));
    }

    #[test]
    fn test_nested_measure() {
        let mut ctx = LayoutContext::new();
        let root = ctx.create_item();
        let mid = ctx.create_item();
        let leaf = ctx.create_item();
        ctx.insert(root, mid);
        ctx.insert(mid, leaf);
        ctx.set_size(leaf, 7.0, 3.0);
        ctx.set_margins(mid, Margins::uniform(1.0));
        // mid is 7x3, plus its margins inside root
        assert_eq!(measure(&mut ctx, root), (9.0, 5.0));
    }
}
