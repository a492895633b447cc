//! Core types for spark-layout.
//!
//! Handles, axes, geometry and the directive vocabulary. Directives are packed
//! into a single `u32` per item (see [`ItemFlags`]) and exposed through the typed
//! views [`Direction`], [`Justify`] and [`Anchor`].

use std::fmt;

// =============================================================================
// Handles
// =============================================================================

/// Handle of an item inside one [`LayoutContext`](crate::LayoutContext).
///
/// Handles are dense indices. `0` is always the root of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// The root item.
    pub const ROOT: Self = Self(0);

    /// Wrap a raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Index into the parallel arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ItemId> for usize {
    fn from(id: ItemId) -> Self {
        id.index()
    }
}

impl From<ItemId> for u32 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

// =============================================================================
// Axis
// =============================================================================

/// One of the two layout axes.
///
/// The solver runs every pass once per axis, horizontal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal (x / width).
    X = 0,
    /// Vertical (y / height).
    Y = 1,
}

impl Axis {
    /// Both axes in solve order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A computed item rectangle.
///
/// All zero until the item has been reached by a solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Position along an axis.
    #[inline]
    pub const fn pos(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent along an axis.
    #[inline]
    pub const fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x, r.y, r.width, r.height]
    }
}

/// Space reserved around an item's box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Same margin on all four sides.
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Explicitly requested size. Zero on an axis means "derive from children".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// Typed directive views
// =============================================================================

/// How a container lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children overlay each other and are placed by their anchors.
    #[default]
    Free,
    /// Children stack left to right.
    Row,
    /// Children stack top to bottom.
    Column,
}

impl Direction {
    /// Main axis of a flex direction, `None` for the free model.
    pub const fn main_axis(self) -> Option<Axis> {
        match self {
            Direction::Free => None,
            Direction::Row => Some(Axis::X),
            Direction::Column => Some(Axis::Y),
        }
    }
}

/// Where leftover main-axis space goes when no child fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// Packed at the origin edge.
    Start,
    /// Centered. The default.
    #[default]
    Middle,
    /// Packed at the far edge.
    End,
    /// Equal gaps between consecutive children.
    SpaceBetween,
}

/// How a child is placed along one axis by its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    /// Left or top.
    Start,
    /// Right or bottom.
    End,
    /// Anchored to both edges, grows to the available space.
    Fill,
}

// =============================================================================
// Directive flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Container directives: direction, wrapping and justification.
    ///
    /// The free model, no-wrap and middle justification are the empty set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BoxFlags: u32 {
        /// Left to right.
        const ROW = 0x002;
        /// Top to bottom.
        const COLUMN = 0x003;
        /// Multi-line.
        const WRAP = 0x004;
        /// Pack at the start of the row/column.
        const START = 0x008;
        /// Pack at the end of the row/column.
        const END = 0x010;
        /// Spread leftover space between children.
        const JUSTIFY = 0x018;
    }
}

impl BoxFlags {
    /// Free layout model.
    pub const FREE: Self = Self::empty();
    /// Centered justification.
    pub const MIDDLE: Self = Self::empty();

    /// Build flags from the typed views.
    pub fn from_parts(direction: Direction, wrap: bool, justify: Justify) -> Self {
        let mut flags = match direction {
            Direction::Free => Self::FREE,
            Direction::Row => Self::ROW,
            Direction::Column => Self::COLUMN,
        };
        if wrap {
            flags |= Self::WRAP;
        }
        flags
            | match justify {
                Justify::Start => Self::START,
                Justify::Middle => Self::MIDDLE,
                Justify::End => Self::END,
                Justify::SpaceBetween => Self::JUSTIFY,
            }
    }

    pub const fn direction(self) -> Direction {
        match self.bits() & 0x003 {
            0x002 => Direction::Row,
            0x003 => Direction::Column,
            _ => Direction::Free,
        }
    }

    #[inline]
    pub const fn wraps(self) -> bool {
        self.bits() & Self::WRAP.bits() != 0
    }

    pub const fn justify(self) -> Justify {
        match self.bits() & Self::JUSTIFY.bits() {
            0x008 => Justify::Start,
            0x010 => Justify::End,
            0x018 => Justify::SpaceBetween,
            _ => Justify::Middle,
        }
    }
}

bitflags::bitflags! {
    /// Child directives: how an item is placed inside its parent.
    ///
    /// Centering on an axis is the absence of both anchors on that axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BehaveFlags: u32 {
        /// Anchor to the left edge.
        const LEFT = 0x020;
        /// Anchor to the top edge.
        const TOP = 0x040;
        /// Anchor to the right edge.
        const RIGHT = 0x080;
        /// Anchor to the bottom edge.
        const BOTTOM = 0x100;
        /// Anchor to left and right.
        const HFILL = 0x0a0;
        /// Anchor to top and bottom.
        const VFILL = 0x140;
        /// Anchor to all four edges.
        const FILL = 0x1e0;
        /// In a wrapping container, start a new line at this item.
        const BREAK = 0x200;
    }
}

impl BehaveFlags {
    pub const CENTER: Self = Self::empty();
    pub const HCENTER: Self = Self::empty();
    pub const VCENTER: Self = Self::empty();

    /// Build flags from per-axis anchors.
    pub fn from_anchors(horizontal: Anchor, vertical: Anchor) -> Self {
        Self::empty()
            .with_anchor(Axis::X, horizontal)
            .with_anchor(Axis::Y, vertical)
    }

    /// Anchor on one axis.
    pub const fn anchor(self, axis: Axis) -> Anchor {
        // Vertical anchor bits sit one position above their horizontal twins.
        match (self.bits() >> axis.index()) & Self::HFILL.bits() {
            0x020 => Anchor::Start,
            0x080 => Anchor::End,
            0x0a0 => Anchor::Fill,
            _ => Anchor::Center,
        }
    }

    /// Replace the anchor on one axis, leaving the other axis and `BREAK` alone.
    pub fn with_anchor(self, axis: Axis, anchor: Anchor) -> Self {
        let bits = (match anchor {
            Anchor::Center => 0,
            Anchor::Start => Self::LEFT.bits(),
            Anchor::End => Self::RIGHT.bits(),
            Anchor::Fill => Self::HFILL.bits(),
        }) << axis.index();
        let mask = Self::HFILL.bits() << axis.index();
        Self::from_bits_retain((self.bits() & !mask) | bits)
    }
}

bitflags::bitflags! {
    /// The packed per-item flag word.
    ///
    /// Bits 0-4 hold [`BoxFlags`], bits 5-9 hold [`BehaveFlags`], bits 10-13
    /// are bookkeeping written by the engine and bits 16-31 belong to the
    /// application.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u32 {
        /// Item sits in some child list.
        const INSERTED = 0x0400;
        /// Width was set explicitly.
        const HFIXED = 0x0800;
        /// Height was set explicitly.
        const VFIXED = 0x1000;
        /// Line break recorded by a wrapping arrangement.
        const AUTO_BREAK = 0x2000;

        const _ = !0;
    }
}

/// All container bits.
pub(crate) const BOX_MASK: u32 = 0x0000_001f;
/// All child placement bits, including `BREAK`.
pub(crate) const LAYOUT_MASK: u32 = 0x0000_03e0;
/// Application-reserved bits.
pub(crate) const USER_MASK: u32 = 0xffff_0000;
pub(crate) const USER_SHIFT: u32 = 16;

impl ItemFlags {
    #[inline]
    pub const fn contain(self) -> BoxFlags {
        BoxFlags::from_bits_retain(self.bits() & BOX_MASK)
    }

    #[inline]
    pub const fn behave(self) -> BehaveFlags {
        BehaveFlags::from_bits_retain(self.bits() & LAYOUT_MASK)
    }

    /// Application-reserved bits.
    #[inline]
    pub const fn user(self) -> u16 {
        ((self.bits() & USER_MASK) >> USER_SHIFT) as u16
    }

    #[inline]
    pub const fn is_inserted(self) -> bool {
        self.bits() & Self::INSERTED.bits() != 0
    }

    /// Explicit size set on `axis`.
    #[inline]
    pub const fn is_fixed(self, axis: Axis) -> bool {
        let bit = match axis {
            Axis::X => Self::HFIXED,
            Axis::Y => Self::VFIXED,
        };
        self.bits() & bit.bits() != 0
    }

    /// Manual `BREAK` set by the caller.
    #[inline]
    pub const fn is_manual_break(self) -> bool {
        self.bits() & BehaveFlags::BREAK.bits() != 0
    }

    /// Any line break, manual or recorded.
    #[inline]
    pub const fn is_break(self) -> bool {
        self.bits() & (BehaveFlags::BREAK.bits() | Self::AUTO_BREAK.bits()) != 0
    }

    /// Replace the bits under `mask` with `bits`.
    #[inline]
    pub(crate) const fn with_masked(self, mask: u32, bits: u32) -> Self {
        Self::from_bits_retain((self.bits() & !mask) | (bits & mask))
    }
}
