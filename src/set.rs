use std::fmt;

use log::{debug, warn};
use parking_lot::{const_rwlock, RwLock};

use crate::error::{Error, Result};
use crate::tree::{self, Link};
use crate::Key;

struct Inner {
    root: Link,
    num_nodes: usize,
}

impl Inner {
    fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }
}

/// A set of integer keys stored in an AVL tree.
///
/// All operations go through one reader/writer lock: `insert`, `delete` and
/// `clear` hold it exclusively, every query holds it shared.
pub struct AvlTreeSet {
    inner: RwLock<Option<Inner>>,
}

impl AvlTreeSet {
    /// Creates an empty, initialized set.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Some(Inner::new())),
        }
    }

    /// Creates a handle that holds no tree yet, e.g. for use in a `static`.
    /// Inserting fails with [`Error::NotInitialized`] until [`init`](Self::init) is called.
    pub const fn uninit() -> Self {
        Self {
            inner: const_rwlock(None),
        }
    }

    /// Installs an empty tree if the handle has none. An existing tree is left alone.
    pub fn init(&self) {
        self.inner.write().get_or_insert_with(Inner::new);
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.inner.read().as_ref().map_or(0, |inner| inner.num_nodes)
    }

    /// Returns the height of the tree, 0 if it is empty.
    pub fn height(&self) -> usize {
        self.inner
            .read()
            .as_ref()
            .map_or(0, |inner| tree::height_of(&inner.root))
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&self) {
        if let Some(inner) = self.inner.write().as_mut() {
            inner.root = None;
            inner.num_nodes = 0;
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        self.inner
            .read()
            .as_ref()
            .map_or(false, |inner| tree::contains(&inner.root, key))
    }

    /// Inserts a key into the set.
    /// Fails with [`Error::DuplicateKey`] if the key is already present, in
    /// which case the tree is left untouched.
    pub fn insert(&self, key: Key) -> Result<()> {
        let mut guard = self.inner.write();
        let inner = match guard.as_mut() {
            Some(inner) => inner,
            None => {
                warn!("insert of {key} into uninitialized tree");
                return Err(Error::NotInitialized);
            }
        };

        let (root, result) = tree::insert(inner.root.take(), key);
        inner.root = Some(root);
        if result.is_ok() {
            inner.num_nodes += 1;
            debug!("inserted {key}, {} keys", inner.num_nodes);
        }
        result
    }

    /// Removes a key from the set.
    /// Returns whether the key was previously in the set.
    pub fn delete(&self, key: Key) -> bool {
        let mut guard = self.inner.write();
        let inner = match guard.as_mut() {
            Some(inner) if inner.num_nodes > 0 => inner,
            _ => return false,
        };

        if inner.num_nodes == 1 && inner.root.as_ref().map(|root| root.key()) == Some(key) {
            inner.root = None;
            inner.num_nodes = 0;
            debug!("deleted {key}, tree is empty");
            return true;
        }

        let (root, found) = tree::delete(inner.root.take(), key);
        inner.root = root;
        if found {
            debug_assert!(inner.num_nodes >= 1);
            inner.num_nodes -= 1;
            debug!("deleted {key}, {} keys", inner.num_nodes);
        }
        found
    }

    /// Keys in pre-order: node, left subtree, right subtree.
    pub fn preorder(&self) -> Vec<Key> {
        self.collect(tree::preorder)
    }

    /// Keys in ascending order.
    pub fn inorder(&self) -> Vec<Key> {
        self.collect(tree::inorder)
    }

    /// Keys in post-order: left subtree, right subtree, node.
    pub fn postorder(&self) -> Vec<Key> {
        self.collect(tree::postorder)
    }

    /// Keys level by level, from the root down, left to right.
    pub fn level_order(&self) -> Vec<Key> {
        self.collect(tree::level_order)
    }

    /// Renders the tree shape, one key per line, right subtree on top.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(inner) = self.inner.read().as_ref() {
            tree::render(&inner.root, &mut out);
        }
        out
    }

    /// Prints [`render`](Self::render) to stdout.
    pub fn graph(&self) {
        print!("{}", self.render());
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        if let Some(inner) = self.inner.read().as_ref() {
            let num_nodes = tree::check_consistency(&inner.root, None, None);
            assert_eq!(num_nodes, inner.num_nodes);
        }
    }

    fn collect<F>(&self, order: F) -> Vec<Key>
    where
        F: FnOnce(&Link, usize) -> Vec<Key>,
    {
        self.inner
            .read()
            .as_ref()
            .map_or_else(Vec::new, |inner| order(&inner.root, inner.num_nodes))
    }
}

impl Default for AvlTreeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AvlTreeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for AvlTreeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}
