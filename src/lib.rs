//! An ordered set of integer keys backed by an AVL tree.
//!
//! The tree is guarded by a single reader/writer lock, so an [`AvlTreeSet`]
//! can be shared between threads as is.
//!
//! ```
//! use avl_rwtree::{AvlTreeSet, Error};
//!
//! let set = AvlTreeSet::new();
//! for key in [1, 2, 3, 4, 5, 0] {
//!     set.insert(key).unwrap();
//! }
//! assert_eq!(set.inorder(), vec![0, 1, 2, 3, 4, 5]);
//! assert_eq!(set.insert(2), Err(Error::DuplicateKey(2)));
//! assert_eq!(set.len(), 6);
//!
//! assert!(set.delete(3));
//! assert!(!set.delete(3));
//! ```

mod error;
mod set;
mod tree;

pub use error::{Error, Result};
pub use set::AvlTreeSet;

/// Key type stored in the tree.
pub type Key = i64;
