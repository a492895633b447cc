//! # spark-layout
//!
//! Arena-based box layout solver for UI toolkits.
//!
//! Build a tree of rectangular items, annotate each with a size, margins and
//! directives (how a container stacks its children, how a child is anchored
//! inside its parent) and solve it. Every reachable item gets a final
//! `x, y, width, height`. Rendering, text measurement and input are left to
//! the caller.
//!
//! ## Architecture
//!
//! spark-layout uses a parallel arrays architecture where items are indices
//! into columnar arrays rather than objects. Handles are plain `u32` newtypes,
//! the tree is a set of singly linked child lists, and a whole frame's worth of
//! items is dropped in O(1) with [`LayoutContext::reset`].
//!
//! The solver is two passes per axis:
//! ```text
//! calc_size(X) → arrange(X) → calc_size(Y) → arrange(Y)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Handles, geometry and directive flags
//! - [`engine`] - Item arena, tree wiring, parallel arrays
//! - [`layout`] - Size computation and arrangement
//! - [`error`] - Contract violations reported by the `try_*` methods
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and installs no logger.

pub mod engine;
pub mod error;
pub mod layout;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{Children, LayoutContext};

pub use error::{LayoutError, Result};

pub use layout::{arrange, calc_size, solve, solve_from};
