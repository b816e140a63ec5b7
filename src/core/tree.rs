//! Immutable ordered labeled tree.
//!
//! Nodes carry a raw syntactic kind, an optional value (identifier name,
//! literal text, or predefined type token), a process-unique id, and their
//! cached subtree size. Trees are built once by the extractor and never
//! mutated afterwards; the ids double as memoization keys in the
//! edit-distance engine.

use crate::core::kinds::SyntaxKind;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct TreeNode {
    kind: SyntaxKind,
    value: String,
    id: u64,
    size: usize,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Build an interior node. Subtree size is fixed here; children are
    /// immutable from this point on.
    pub fn new(kind: SyntaxKind, value: impl Into<String>, children: Vec<TreeNode>) -> Self {
        let size = 1 + children.iter().map(TreeNode::size).sum::<usize>();
        Self {
            kind,
            value: value.into(),
            id: NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed),
            size,
            children,
        }
    }

    pub fn leaf(kind: SyntaxKind) -> Self {
        Self::new(kind, "", Vec::new())
    }

    pub fn leaf_with_value(kind: SyntaxKind, value: impl Into<String>) -> Self {
        Self::new(kind, value, Vec::new())
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Unique within a process run; cheap to compare.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cached subtree size: 1 + sizes of all descendants.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Consume the node, yielding its children. Used by the extractor's
    /// block-elision normalization.
    pub fn into_children(self) -> Vec<TreeNode> {
        self.children
    }

    /// Depth-first pre-order walk.
    pub fn walk(&self, visit: &mut impl FnMut(&TreeNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
