//! Parallel Arrays
//!
//! All item state lives in these arrays. Each index corresponds to one item.
//!
//! # Array Categories
//!
//! - **items**: flags, tree links, margins, explicit size, grow weight (inputs)
//! - **rects**: computed x/y/width/height (outputs)
//!
//! Both categories are always grown together, so any valid handle indexes both.
//! Slots past `count` keep whatever a previous run left in them; creating an
//! item clears its slot first.

pub mod items;
pub mod rects;

pub use items::{ChildIndices, ItemArrays};
pub use rects::RectArray;

/// Capacity of the first allocation.
pub const MIN_CAPACITY: usize = 32;

/// Multiplier applied when the arrays run out of slots.
pub const GROWTH_FACTOR: usize = 4;

/// Link value meaning "no item".
pub(crate) const NO_ITEM: u32 = u32::MAX;

/// Capacity to grow to once `current` slots are all in use.
#[inline]
pub fn next_capacity(current: usize) -> usize {
    current.saturating_mul(GROWTH_FACTOR).max(MIN_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_capacity() {
        assert_eq!(next_capacity(0), 32);
        assert_eq!(next_capacity(3), 32);
        assert_eq!(next_capacity(32), 128);
        assert_eq!(next_capacity(128), 512);
    }
}
