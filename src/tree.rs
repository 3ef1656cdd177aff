use std::cmp::{self, Ordering};
use std::collections::VecDeque;

use log::trace;

use crate::error::{Error, Result};
use crate::Key;

pub(crate) type Link = Option<Box<Node>>;

pub(crate) struct Node {
    key: Key,
    left: Link,
    right: Link,
    height: usize,
}

impl Node {
    fn create(key: Key) -> Box<Node> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub(crate) fn key(&self) -> Key {
        self.key
    }
}

/// Height of the subtree behind `link`, 0 for an absent subtree.
pub(crate) fn height_of(link: &Link) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

fn adjust_height(node: &mut Node) {
    node.height = 1 + cmp::max(height_of(&node.left), height_of(&node.right));
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    match node.right.take() {
        None => node,
        Some(mut right) => {
            trace!("rotate left at {}", node.key);
            node.right = right.left.take();
            adjust_height(&mut node);
            right.left = Some(node);
            adjust_height(&mut right);
            right
        }
    }
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    match node.left.take() {
        None => node,
        Some(mut left) => {
            trace!("rotate right at {}", node.key);
            node.left = left.right.take();
            adjust_height(&mut node);
            left.right = Some(node);
            adjust_height(&mut left);
            left
        }
    }
}

fn rotate_left_right(mut node: Box<Node>) -> Box<Node> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

fn rotate_right_left(mut node: Box<Node>) -> Box<Node> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

// Recompute the height of a node whose subtrees are balanced, then restore
// the AVL condition at the node itself.
// The inner grandchild decides between single and double rotation only when
// it is strictly higher than the outer one.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    adjust_height(&mut node);
    let left_height = height_of(&node.left);
    let right_height = height_of(&node.right);
    if left_height > right_height + 1 {
        let inner_heavy = match &node.left {
            None => false,
            Some(left) => height_of(&left.right) > height_of(&left.left),
        };
        if inner_heavy {
            rotate_left_right(node)
        } else {
            rotate_right(node)
        }
    } else if right_height > left_height + 1 {
        let inner_heavy = match &node.right {
            None => false,
            Some(right) => height_of(&right.left) > height_of(&right.right),
        };
        if inner_heavy {
            rotate_right_left(node)
        } else {
            rotate_left(node)
        }
    } else {
        node
    }
}

/// Inserts `key` below `link` and returns the new subtree root.
///
/// On a duplicate key the subtree comes back exactly as it was handed in,
/// together with the error.
pub(crate) fn insert(link: Link, key: Key) -> (Box<Node>, Result<()>) {
    let mut node = match link {
        None => return (Node::create(key), Ok(())),
        Some(node) => node,
    };

    let result = match key.cmp(&node.key) {
        Ordering::Equal => return (node, Err(Error::DuplicateKey(key))),
        Ordering::Less => {
            let (left, result) = insert(node.left.take(), key);
            node.left = Some(left);
            result
        }
        Ordering::Greater => {
            let (right, result) = insert(node.right.take(), key);
            node.right = Some(right);
            result
        }
    };

    match result {
        Ok(()) => (rebalance(node), Ok(())),
        Err(err) => (node, Err(err)),
    }
}

/// Deletes `key` below `link`.
/// Returns the new subtree root and whether the key was found.
pub(crate) fn delete(link: Link, key: Key) -> (Link, bool) {
    let mut node = match link {
        None => return (None, false),
        Some(node) => node,
    };

    let found = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, found) = delete(node.left.take(), key);
            node.left = left;
            found
        }
        Ordering::Greater => {
            let (right, found) = delete(node.right.take(), key);
            node.right = right;
            found
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                // Take over the in-order successor and remove it from the right
                let successor = min_key(&right);
                node.key = successor;
                node.left = Some(left);
                node.right = delete(Some(right), successor).0;
                true
            }
            (Some(left), None) => return (Some(rebalance(left)), true),
            (None, right) => return (right.map(rebalance), true),
        },
    };

    (Some(rebalance(node)), found)
}

fn min_key(mut node: &Node) -> Key {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node.key
}

pub(crate) fn contains(link: &Link, key: Key) -> bool {
    let mut current = link.as_deref();
    while let Some(node) = current {
        current = match key.cmp(&node.key) {
            Ordering::Equal => return true,
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
        };
    }
    false
}

pub(crate) fn preorder(link: &Link, len: usize) -> Vec<Key> {
    let mut keys = Vec::with_capacity(len);
    traverse(
        link,
        &mut |node: &Node| keys.push(node.key),
        &mut |_: &Node| {},
        &mut |_: &Node| {},
    );
    keys
}

pub(crate) fn inorder(link: &Link, len: usize) -> Vec<Key> {
    let mut keys = Vec::with_capacity(len);
    traverse(
        link,
        &mut |_: &Node| {},
        &mut |node: &Node| keys.push(node.key),
        &mut |_: &Node| {},
    );
    keys
}

pub(crate) fn postorder(link: &Link, len: usize) -> Vec<Key> {
    let mut keys = Vec::with_capacity(len);
    traverse(
        link,
        &mut |_: &Node| {},
        &mut |_: &Node| {},
        &mut |node: &Node| keys.push(node.key),
    );
    keys
}

pub(crate) fn level_order(link: &Link, len: usize) -> Vec<Key> {
    let mut keys = Vec::with_capacity(len);
    let mut queue: VecDeque<&Node> = link.as_deref().into_iter().collect();
    while let Some(node) = queue.pop_front() {
        keys.push(node.key);
        queue.extend(node.left.as_deref());
        queue.extend(node.right.as_deref());
    }
    keys
}

fn traverse<Pre, In, Post>(link: &Link, preorder: &mut Pre, inorder: &mut In, postorder: &mut Post)
where
    Pre: FnMut(&Node),
    In: FnMut(&Node),
    Post: FnMut(&Node),
{
    if let Some(node) = link.as_deref() {
        preorder(node);
        traverse(&node.left, preorder, inorder, postorder);
        inorder(node);
        traverse(&node.right, preorder, inorder, postorder);
        postorder(node);
    }
}

/// Draws the subtree sideways: right subtree above its parent, left below.
pub(crate) fn render(link: &Link, out: &mut String) {
    if let Some(node) = link.as_deref() {
        render_node(node, "", true, out);
    }
}

fn render_node(node: &Node, prefix: &str, is_tail: bool, out: &mut String) {
    if let Some(right) = node.right.as_deref() {
        let right_prefix = format!("{prefix}{}", if is_tail { "│   " } else { "    " });
        render_node(right, &right_prefix, false, out);
    }

    out.push_str(prefix);
    out.push_str(if is_tail { "└── " } else { "┌── " });
    out.push_str(&node.key.to_string());
    out.push('\n');

    if let Some(left) = node.left.as_deref() {
        let left_prefix = format!("{prefix}{}", if is_tail { "    " } else { "│   " });
        render_node(left, &left_prefix, true, out);
    }
}

/// Asserts ordering, height and balance of every node strictly between the
/// given bounds. Returns the number of nodes.
#[cfg(any(test, feature = "consistency_check"))]
pub(crate) fn check_consistency(link: &Link, lower: Option<Key>, upper: Option<Key>) -> usize {
    let node = match link {
        None => return 0,
        Some(node) => node,
    };

    // Check search order
    if let Some(lower) = lower {
        assert!(node.key > lower);
    }
    if let Some(upper) = upper {
        assert!(node.key < upper);
    }

    // Check height
    let left_height = height_of(&node.left);
    let right_height = height_of(&node.right);
    assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

    // Check AVL condition (nearly balance)
    assert!(left_height <= right_height + 1);
    assert!(right_height <= left_height + 1);

    1 + check_consistency(&node.left, lower, Some(node.key))
        + check_consistency(&node.right, Some(node.key), upper)
}
