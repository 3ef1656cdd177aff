//! Error types for tree operations.

use thiserror::Error;

use crate::Key;

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by [`AvlTreeSet`](crate::AvlTreeSet).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle was declared with [`AvlTreeSet::uninit`](crate::AvlTreeSet::uninit)
    /// and never initialized.
    #[error("tree is not initialized")]
    NotInitialized,

    /// The key is already stored in the tree.
    #[error("duplicate key: {0}")]
    DuplicateKey(Key),
}
