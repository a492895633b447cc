//! Rect Array
//!
//! Output side of the arena. Each slot is `[x, y, width, height]`, so position
//! on axis `dim` is `[dim]` and extent is `[dim + 2]`.

use std::ops::{Index, IndexMut};

use crate::types::Rect;

/// Computed rectangles, parallel to [`ItemArrays`](super::ItemArrays).
#[derive(Debug, Clone, Default)]
pub struct RectArray {
    data: Vec<[f32; 4]>,
}

impl RectArray {
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Grow to `capacity` slots. Never shrinks.
    pub fn resize(&mut self, capacity: usize) {
        if capacity > self.data.len() {
            self.data.resize(capacity, [0.0; 4]);
        }
    }

    #[inline]
    pub fn clear_at(&mut self, index: usize) {
        self.data[index] = [0.0; 4];
    }

    #[inline]
    pub fn rect(&self, index: usize) -> Rect {
        Rect::from(self.data[index])
    }
}

impl Index<usize> for RectArray {
    type Output = [f32; 4];

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for RectArray {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
