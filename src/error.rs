//! Layout errors.
//!
//! Every error here is a contract violation by the caller. The `try_*` methods
//! on [`LayoutContext`](crate::LayoutContext) hand them back; everything else
//! goes through [`fail_fast`] and aborts at the point of misuse.

use thiserror::Error;

use crate::types::ItemId;

/// A violated precondition of the arena API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Handle outside `[0, count)`.
    #[error("item {id} is out of range, the context holds {count} items")]
    InvalidHandle { id: ItemId, count: u32 },

    /// The root item can never become somebody's child.
    #[error("the root item cannot be inserted into another item")]
    RootInsertion,

    #[error("item {0} cannot be inserted next to or into itself")]
    SelfInsertion(ItemId),

    /// Items belong to exactly one child list.
    #[error("item {0} has already been inserted")]
    AlreadyInserted(ItemId),
}

/// Convenience alias used by the `try_*` surface.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Log and abort on a contract violation.
#[cold]
#[track_caller]
pub(crate) fn fail_fast(err: LayoutError) -> ! {
    log::error!("layout contract violated: {err}");
    panic!("{err}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LayoutError::InvalidHandle { id: ItemId::new(7), count: 3 };
        assert_eq!(err.to_string(), "item 7 is out of range, the context holds 3 items");
        assert_eq!(
            LayoutError::AlreadyInserted(ItemId::new(2)).to_string(),
            "item 2 has already been inserted"
        );
    }

    #[test]
    #[should_panic(expected = "the root item cannot be inserted")]
    fn test_fail_fast_panics() {
        fail_fast(LayoutError::RootInsertion);
    }
}
