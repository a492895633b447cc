//! Layout Engine - Item arena and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Context: handle allocation, per-item directives, computed rects
//! - Tree: singly linked child lists and insertion
//! - Arrays: parallel arrays for item state
//!
//! # Architecture
//!
//! Items are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: root   (first_child=1, next_sibling=-,  size=[100, 80], contain=ROW)
//! Index 1: button (first_child=-, next_sibling=2,  size=[20, 0],   behave=VFILL)
//! Index 2: label  (first_child=-, next_sibling=-,  size=[0, 0],    behave=FILL)
//! ```
//!
//! Handles are dense, so a frame's worth of items is a handful of flat vectors
//! that get reused after [`LayoutContext::reset`].

mod context;
mod tree;
pub mod arrays;

pub use context::*;
pub use tree::*;
