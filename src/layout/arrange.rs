//! Space distribution (top-down).
//!
//! Runs after [`calc_size`](super::calc_size) for the same axis. The parent's
//! rect is final when its children are arranged, so every child is placed
//! inside it and then arranges its own children in turn.
//!
//! # Wrapping columns
//!
//! A wrapping column only knows its lines once the vertical axis is arranged,
//! and lines decide horizontal placement. Its horizontal pass arranges the
//! children's subtrees against their natural widths, so that wrapping rows
//! further down record their lines before any height is measured. The
//! vertical pass then places the lines, fixes the container's width and runs
//! the horizontal pass of every child subtree again inside its band.

use log::debug;

use crate::engine::LayoutContext;
use crate::engine::arrays::NO_ITEM;
use crate::types::{Anchor, Axis, ItemFlags, ItemId, Justify};

use super::measure::{calc_size_at, outer_extent};

/// Place the children of `id`, and their subtrees, along `axis`.
#[track_caller]
pub fn arrange(ctx: &mut LayoutContext, id: ItemId, axis: Axis) {
    let index = ctx.index(id);
    arrange_at(ctx, index, axis);
}

pub(crate) fn arrange_at(ctx: &mut LayoutContext, item: usize, axis: Axis) {
    let flags = ctx.items.flags[item];
    let contain = flags.contain();
    let dim = axis.index();

    match (contain.direction().main_axis(), contain.wraps()) {
        (Some(Axis::X), true) => match axis {
            Axis::X => arrange_stacked(ctx, item, axis, true),
            Axis::Y => arrange_lines(ctx, item, axis),
        },
        (Some(Axis::Y), true) => {
            // lines are only known once the main axis is arranged
            if axis == Axis::Y {
                arrange_stacked(ctx, item, axis, true);
                arrange_lines(ctx, item, axis.cross());
                rearrange_children(ctx, item, axis.cross());
            }
        }
        (Some(main), _) => {
            if main == axis {
                arrange_stacked(ctx, item, axis, false);
            } else {
                let [offset, space] = [ctx.rects[item][dim], ctx.rects[item][dim + 2]];
                let first = ctx.items.first_child[item];
                arrange_overlay_squeezed_range(ctx, axis, first, NO_ITEM, offset, space);
            }
        }
        (None, _) => arrange_overlay(ctx, item, axis),
    }

    arrange_children(ctx, item, axis);
}

fn arrange_children(ctx: &mut LayoutContext, item: usize, axis: Axis) {
    let mut child = ctx.items.first_child[item];
    while child != NO_ITEM {
        arrange_at(ctx, child as usize, axis);
        child = ctx.items.next_sibling[child as usize];
    }
}

/// Arrange the children of `item` along `axis` a second time. Their own
/// rects have just been placed; everything below them is measured again so
/// positions start from the near margins.
fn rearrange_children(ctx: &mut LayoutContext, item: usize, axis: Axis) {
    let mut child = ctx.items.first_child[item];
    while child != NO_ITEM {
        let mut grandchild = ctx.items.first_child[child as usize];
        while grandchild != NO_ITEM {
            calc_size_at(ctx, grandchild as usize, axis);
            grandchild = ctx.items.next_sibling[grandchild as usize];
        }
        child = ctx.items.next_sibling[child as usize];
    }
    arrange_children(ctx, item, axis);
}

// =============================================================================
// Stacked (main axis of rows and columns)
// =============================================================================

/// Distribute the main axis of `item` among its children, line by line.
///
/// Pass 1 collects one line: used space, filler weights and the number of
/// children that can be squeezed. Pass 2 positions the line.
fn arrange_stacked(ctx: &mut LayoutContext, item: usize, axis: Axis, wrap: bool) {
    let dim = axis.index();
    let wdim = dim + 2;
    let justify = ctx.items.flags[item].contain().justify();
    let space = ctx.rects[item][wdim];
    let max_x2 = ctx.rects[item][dim] + space;

    let mut start = ctx.items.first_child[item];
    while start != NO_ITEM {
        let mut used = 0.0_f32;
        let mut fillers = 0_usize;
        let mut grow_sum = 0.0_f32;
        let mut squeezable = 0_usize;
        let mut total = 0_usize;
        let mut hard_break = false;
        let mut end = NO_ITEM;

        // Pass 1: measure one line
        let mut child = start;
        while child != NO_ITEM {
            let c = child as usize;
            let flags = ctx.items.flags[c];
            let fill = flags.behave().anchor(axis) == Anchor::Fill;
            let rect = ctx.rects[c];
            let margin_end = ctx.items.margins[c][wdim];

            // fillers only claim their margins up front
            let extend = if fill {
                used + rect[dim] + margin_end
            } else {
                used + rect[dim] + rect[wdim] + margin_end
            };

            if wrap && total > 0 && (extend > space || flags.is_break()) {
                end = child;
                hard_break = flags.is_manual_break();
                if !hard_break && !flags.contains(ItemFlags::AUTO_BREAK) {
                    ctx.items.flags[c].insert(ItemFlags::AUTO_BREAK);
                    debug!("item {item} wraps before child {c}");
                }
                break;
            }

            if fill {
                fillers += 1;
                grow_sum += ctx.items.grow[c];
            } else if !flags.is_fixed(axis) {
                squeezable += 1;
            }
            used = extend;
            total += 1;
            child = ctx.items.next_sibling[c];
        }

        let extra_space = space - used;
        let mut filler_unit = 0.0_f32;
        let mut spacer = 0.0_f32;
        let mut extra_margin = 0.0_f32;
        let mut eater = 0.0_f32;

        if extra_space > 0.0 {
            if fillers > 0 {
                if grow_sum > 0.0 {
                    filler_unit = extra_space / grow_sum;
                }
            } else if total > 0 {
                match justify {
                    // no gaps on the last line or before a manual break
                    Justify::SpaceBetween => {
                        if total > 1 && (!wrap || (end != NO_ITEM && !hard_break)) {
                            spacer = extra_space / (total - 1) as f32;
                        }
                    }
                    Justify::Start => {}
                    Justify::End => extra_margin = extra_space,
                    Justify::Middle => extra_margin = extra_space / 2.0,
                }
            }
        } else if !wrap && squeezable > 0 {
            eater = extra_space / squeezable as f32;
            if eater < 0.0 {
                debug!("item {item} squeezes {squeezable} children by {}", -eater);
            }
        }

        // Pass 2: position the line
        let mut x = ctx.rects[item][dim];
        let mut child = start;
        while child != end {
            let c = child as usize;
            let flags = ctx.items.flags[c];
            let rect = ctx.rects[c];
            let margin_end = ctx.items.margins[c][wdim];

            x += rect[dim] + extra_margin;
            let x1 = if flags.behave().anchor(axis) == Anchor::Fill {
                x + filler_unit * ctx.items.grow[c]
            } else if flags.is_fixed(axis) {
                x + rect[wdim]
            } else {
                x + (rect[wdim] + eater).max(0.0)
            };

            // clamp to the container's far edge
            let ix1 = if wrap { (max_x2 - margin_end).min(x1).max(x) } else { x1 };

            ctx.rects[c][dim] = x;
            ctx.rects[c][wdim] = ix1 - x;
            x = x1 + margin_end;
            child = ctx.items.next_sibling[c];
            extra_margin = spacer;
        }

        start = end;
    }
}

// =============================================================================
// Overlay (free model, cross axis of rows and columns)
// =============================================================================

/// Place every child of a free-model item by its anchor, without clamping.
fn arrange_overlay(ctx: &mut LayoutContext, item: usize, axis: Axis) {
    let dim = axis.index();
    let wdim = dim + 2;
    let offset = ctx.rects[item][dim];
    let space = ctx.rects[item][wdim];

    let mut child = ctx.items.first_child[item];
    while child != NO_ITEM {
        let c = child as usize;
        let anchor = ctx.items.flags[c].behave().anchor(axis);
        let [margin_start, margin_end] = [ctx.items.margins[c][dim], ctx.items.margins[c][wdim]];
        let rect = &mut ctx.rects[c];

        match anchor {
            Anchor::Center => rect[dim] += (space - rect[wdim]) / 2.0 - margin_end,
            Anchor::End => rect[dim] += space - rect[wdim] - margin_start - margin_end,
            Anchor::Fill => rect[wdim] = (space - rect[dim] - margin_end).max(0.0),
            Anchor::Start => {}
        }
        rect[dim] += offset;
        child = ctx.items.next_sibling[c];
    }
}

/// Place the siblings `start..end` by their anchors inside a band of `space`
/// starting at `offset`, shrinking any child that does not fit.
fn arrange_overlay_squeezed_range(
    ctx: &mut LayoutContext,
    axis: Axis,
    start: u32,
    end: u32,
    offset: f32,
    space: f32,
) {
    let dim = axis.index();
    let wdim = dim + 2;

    let mut child = start;
    while child != end {
        let c = child as usize;
        let anchor = ctx.items.flags[c].behave().anchor(axis);
        let margin_end = ctx.items.margins[c][wdim];
        let rect = &mut ctx.rects[c];
        let min_size = (space - rect[dim] - margin_end).max(0.0);

        match anchor {
            Anchor::Center => {
                rect[wdim] = rect[wdim].min(min_size);
                rect[dim] += (space - rect[wdim]) / 2.0 - margin_end;
            }
            Anchor::End => {
                rect[wdim] = rect[wdim].min(min_size);
                rect[dim] = space - rect[wdim] - margin_end;
            }
            Anchor::Fill => rect[wdim] = min_size,
            Anchor::Start => rect[wdim] = rect[wdim].min(min_size),
        }
        rect[dim] += offset;
        child = ctx.items.next_sibling[c];
    }
}

/// Place the lines of a wrapping container along its cross `axis`. Unless
/// that extent is explicit, the container takes the space its lines use.
fn arrange_lines(ctx: &mut LayoutContext, item: usize, axis: Axis) {
    let end = arrange_wrapped_overlay_squeezed(ctx, item, axis);
    if !ctx.items.flags[item].is_fixed(axis) {
        let dim = axis.index();
        ctx.rects[item][dim + 2] = end - ctx.rects[item][dim];
    }
}

/// Cross axis of a wrapping container: one band per line, bands stacked from
/// the container's origin. Returns where the last band ends.
fn arrange_wrapped_overlay_squeezed(ctx: &mut LayoutContext, item: usize, axis: Axis) -> f32 {
    let mut offset = ctx.rects[item][axis.index()];
    let mut need = 0.0_f32;

    let mut start = ctx.items.first_child[item];
    let mut child = start;
    while child != NO_ITEM {
        let c = child as usize;
        if ctx.items.flags[c].is_break() {
            arrange_overlay_squeezed_range(ctx, axis, start, child, offset, need);
            offset += need;
            start = child;
            need = 0.0;
        }
        need = need.max(outer_extent(ctx, c, axis));
        child = ctx.items.next_sibling[c];
    }

    arrange_overlay_squeezed_range(ctx, axis, start, NO_ITEM, offset, need);
    offset + need
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calc_size;
    use crate::types::{BehaveFlags, BoxFlags, Margins, Rect};

    fn run(ctx: &mut LayoutContext, root: ItemId) {
        for axis in Axis::ALL {
            calc_size(ctx, root, axis);
            arrange(ctx, root, axis);
        }
    }

    fn container(ctx: &mut LayoutContext, contain: BoxFlags, w: f32, h: f32) -> ItemId {
        let id = ctx.create_item();
        ctx.set_contain(id, contain);
        ctx.set_size(id, w, h);
        id
    }

    fn child(ctx: &mut LayoutContext, parent: ItemId, w: f32, h: f32, behave: BehaveFlags) -> ItemId {
        let id = ctx.create_item();
        ctx.set_size(id, w, h);
        ctx.set_behave(id, behave);
        ctx.insert(parent, id);
        id
    }

    #[test]
    fn test_free_anchors() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::FREE, 100.0, 50.0);
        let center = child(&mut ctx, root, 10.0, 10.0, BehaveFlags::CENTER);
        let corner = child(&mut ctx, root, 10.0, 10.0, BehaveFlags::RIGHT | BehaveFlags::BOTTOM);
        let origin = child(&mut ctx, root, 10.0, 10.0, BehaveFlags::LEFT | BehaveFlags::TOP);
        let fill = child(&mut ctx, root, 0.0, 0.0, BehaveFlags::FILL);
        ctx.set_margins(fill, Margins::new(1.0, 2.0, 3.0, 4.0));

        run(&mut ctx, root);
        assert_eq!(ctx.rect(center), Rect::new(45.0, 20.0, 10.0, 10.0));
        assert_eq!(ctx.rect(corner), Rect::new(90.0, 40.0, 10.0, 10.0));
        assert_eq!(ctx.rect(origin), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(ctx.rect(fill), Rect::new(1.0, 2.0, 96.0, 44.0));
    }

    #[test]
    fn test_free_model_overflows_without_clamping() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::FREE, 10.0, 10.0);
        let big = child(&mut ctx, root, 30.0, 10.0, BehaveFlags::LEFT);
        run(&mut ctx, root);
        assert_eq!(ctx.rect(big), Rect::new(0.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn test_justify_modes() {
        let cases: [(BoxFlags, [f32; 2]); 4] = [
            (BoxFlags::START, [0.0, 10.0]),
            (BoxFlags::END, [80.0, 90.0]),
            (BoxFlags::MIDDLE, [40.0, 50.0]),
            (BoxFlags::JUSTIFY, [0.0, 90.0]),
        ];
        for (justify, xs) in cases {
            let mut ctx = LayoutContext::new();
            let root = container(&mut ctx, BoxFlags::ROW | justify, 100.0, 10.0);
            let a = child(&mut ctx, root, 10.0, 10.0, BehaveFlags::empty());
            let b = child(&mut ctx, root, 10.0, 10.0, BehaveFlags::empty());
            run(&mut ctx, root);
            assert_eq!([ctx.rect(a).x, ctx.rect(b).x], xs, "{justify:?}");
        }
    }

    #[test]
    fn test_justify_single_child_stays_at_start() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW | BoxFlags::JUSTIFY, 100.0, 10.0);
        let only = child(&mut ctx, root, 10.0, 10.0, BehaveFlags::empty());
        run(&mut ctx, root);
        assert_eq!(ctx.rect(only), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_squeeze_spares_fixed_children() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW, 30.0, 10.0);
        let fixed = child(&mut ctx, root, 20.0, 10.0, BehaveFlags::empty());
        let loose = ctx.create_item();
        let inner = child(&mut ctx, loose, 20.0, 10.0, BehaveFlags::empty());
        ctx.insert(root, loose);

        run(&mut ctx, root);
        assert_eq!(ctx.rect(fixed), Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(ctx.rect(loose), Rect::new(20.0, 0.0, 10.0, 10.0));
        // the inner item keeps its size but is centered in the squeezed parent
        assert_eq!(ctx.rect(inner), Rect::new(15.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_squeeze_never_goes_negative() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW, 10.0, 10.0);
        let small = ctx.create_item();
        child(&mut ctx, small, 2.0, 1.0, BehaveFlags::empty());
        let large = ctx.create_item();
        child(&mut ctx, large, 30.0, 1.0, BehaveFlags::empty());
        ctx.insert(root, small);
        ctx.insert(root, large);

        run(&mut ctx, root);
        // overflow of 22 is split 11/11; the small child bottoms out at zero
        assert_eq!(ctx.rect(small).width, 0.0);
        assert_eq!(ctx.rect(large), Rect::new(0.0, 0.0, 19.0, 1.0));
    }

    #[test]
    fn test_weighted_fillers() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW, 100.0, 10.0);
        let a = child(&mut ctx, root, 0.0, 10.0, BehaveFlags::HFILL);
        let b = child(&mut ctx, root, 0.0, 10.0, BehaveFlags::HFILL);
        let c = child(&mut ctx, root, 0.0, 10.0, BehaveFlags::HFILL);
        ctx.set_grow(a, 2.0);

        run(&mut ctx, root);
        assert_eq!(ctx.rect(a), Rect::new(0.0, 0.0, 50.0, 10.0));
        assert_eq!(ctx.rect(b), Rect::new(50.0, 0.0, 25.0, 10.0));
        assert_eq!(ctx.rect(c), Rect::new(75.0, 0.0, 25.0, 10.0));
    }

    #[test]
    fn test_zero_weight_fillers_get_nothing() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW, 100.0, 10.0);
        let a = child(&mut ctx, root, 0.0, 10.0, BehaveFlags::HFILL);
        let b = child(&mut ctx, root, 20.0, 10.0, BehaveFlags::empty());
        ctx.set_grow(a, 0.0);

        run(&mut ctx, root);
        // a filler is present, so no justification happens either
        assert_eq!(ctx.rect(a), Rect::new(0.0, 0.0, 0.0, 10.0));
        assert_eq!(ctx.rect(b), Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_cross_axis_is_clamped() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW, 100.0, 10.0);
        let tall = child(&mut ctx, root, 10.0, 40.0, BehaveFlags::TOP);
        let bottom = child(&mut ctx, root, 10.0, 4.0, BehaveFlags::BOTTOM);
        run(&mut ctx, root);
        assert_eq!(ctx.rect(tall).height, 10.0);
        assert_eq!(ctx.rect(bottom).y, 6.0);
    }

    #[test]
    fn test_row_wrap_records_breaks() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW | BoxFlags::WRAP | BoxFlags::START, 25.0, 0.0);
        let ids: Vec<_> = (0..5).map(|_| child(&mut ctx, root, 10.0, 5.0, BehaveFlags::empty())).collect();

        run(&mut ctx, root);
        let breaks: Vec<_> = ids.iter().map(|&id| ctx.is_line_break(id)).collect();
        assert_eq!(breaks, [false, false, true, false, true]);
        assert!(!ctx.flags(ids[2]).is_manual_break());
        assert_eq!(ctx.rect(root), Rect::new(0.0, 0.0, 25.0, 15.0));
        assert_eq!(ctx.rect(ids[3]), Rect::new(10.0, 5.0, 10.0, 5.0));
        assert_eq!(ctx.rect(ids[4]), Rect::new(0.0, 10.0, 10.0, 5.0));
    }

    #[test]
    fn test_wrap_clamps_to_far_edge() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::ROW | BoxFlags::WRAP, 8.0, 0.0);
        let wide = child(&mut ctx, root, 20.0, 5.0, BehaveFlags::empty());
        run(&mut ctx, root);
        assert_eq!(ctx.rect(wide), Rect::new(0.0, 0.0, 8.0, 5.0));
    }

    #[test]
    fn test_column_wrap_redoes_horizontal_pass() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::COLUMN | BoxFlags::WRAP, 0.0, 10.0);
        let a = child(&mut ctx, root, 5.0, 6.0, BehaveFlags::empty());
        let b = ctx.create_item();
        ctx.set_size(b, 0.0, 6.0);
        ctx.set_margins(b, Margins::new(1.0, 0.0, 0.0, 0.0));
        ctx.insert(root, b);
        let inner = child(&mut ctx, b, 3.0, 2.0, BehaveFlags::RIGHT);

        // before the lines exist, subtrees sit at their natural places
        calc_size(&mut ctx, root, Axis::X);
        arrange(&mut ctx, root, Axis::X);
        assert_eq!(ctx.rect(b).x, 1.0);
        assert_eq!(ctx.rect(inner).x, 1.0);

        run(&mut ctx, root);
        assert!(ctx.is_line_break(b));
        assert_eq!(ctx.rect(root), Rect::new(0.0, 0.0, 9.0, 10.0));
        assert_eq!(ctx.rect(a), Rect::new(0.0, 2.0, 5.0, 6.0));
        assert_eq!(ctx.rect(b), Rect::new(6.5, 2.0, 3.0, 6.0));
        // measured again, not shifted twice
        assert_eq!(ctx.rect(inner), Rect::new(6.5, 4.0, 3.0, 2.0));
    }

    #[test]
    fn test_row_wrap_height_follows_lines() {
        let mut ctx = LayoutContext::new();
        let root = container(&mut ctx, BoxFlags::COLUMN, 20.0, 40.0);
        let row = container(&mut ctx, BoxFlags::ROW | BoxFlags::WRAP, 20.0, 0.0);
        ctx.set_behave(row, BehaveFlags::VFILL);
        ctx.insert(root, row);
        for _ in 0..3 {
            child(&mut ctx, row, 10.0, 5.0, BehaveFlags::empty());
        }

        run(&mut ctx, root);
        assert_eq!(ctx.rect(row), Rect::new(0.0, 0.0, 20.0, 10.0));

        ctx.set_behave(row, BehaveFlags::empty());
        ctx.set_size(row, 20.0, 30.0);
        run(&mut ctx, root);
        assert_eq!(ctx.rect(row), Rect::new(0.0, 5.0, 20.0, 30.0));
    }
}
