//! Tree nodes: one directory / path segment each.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::structure::chain::MiddlewareChain;
use crate::structure::error::{BuildError, BuildResult};
use crate::structure::leaf::{join_path, LeafKind, StructureLeaf};
use crate::structure::naming::{parse_segment, HttpMethod};

/// Path of the root node.
pub const ROOT_PATH: &str = "/";

/// A child of a tree node.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(StructureLeaf),
    Tree(StructureTree),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Leaf(leaf) => leaf.name(),
            Node::Tree(tree) => tree.name(),
        }
    }
}

impl From<StructureLeaf> for Node {
    fn from(leaf: StructureLeaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<StructureTree> for Node {
    fn from(tree: StructureTree) -> Self {
        Node::Tree(tree)
    }
}

/// One directory level of the route structure.
#[derive(Debug, Clone)]
pub struct StructureTree {
    name: String,
    path: String,
    dynamic: bool,
    children: BTreeMap<String, Node>,
    chain: MiddlewareChain,
}

impl StructureTree {
    /// The root node: empty name, path `/`.
    pub fn root() -> Self {
        Self {
            name: String::new(),
            path: ROOT_PATH.to_string(),
            dynamic: false,
            children: BTreeMap::new(),
            chain: MiddlewareChain::new(),
        }
    }

    /// Create a node from a raw directory name. `[name]` becomes a dynamic
    /// segment called `name`.
    pub fn new(raw_name: &str, parent_path: &str) -> Self {
        let segment = parse_segment(raw_name);
        Self {
            path: join_path(parent_path, &segment.name),
            name: segment.name,
            dynamic: segment.dynamic,
            children: BTreeMap::new(),
            chain: MiddlewareChain::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this segment captures a path parameter named [`Self::name`].
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Ordinal a middleware without an explicit one would take.
    pub fn next_middleware_ordinal(&self) -> usize {
        self.chain.next_slot()
    }

    /// Attach a child under its name; an existing child of that name is
    /// replaced.
    ///
    /// Middleware leaves claim their ordinal; a taken ordinal fails with
    /// [`BuildError::MiddlewareOrdinalCollision`] and leaves the node
    /// unchanged.
    pub fn add_child(&mut self, child: impl Into<Node>) -> BuildResult<()> {
        let child = child.into();
        let key = child.name().to_string();
        let ordinal = match &child {
            Node::Leaf(leaf) => leaf.ordinal(),
            Node::Tree(_) => None,
        };

        if let Some(ordinal) = ordinal {
            match self.chain.holder(ordinal) {
                Some(existing) if existing != key => {
                    return Err(BuildError::MiddlewareOrdinalCollision {
                        path: self.path.clone(),
                        ordinal,
                        existing: existing.to_string(),
                        incoming: key,
                    });
                }
                _ => {}
            }
        }

        // Same-named middleware being replaced gives up its slot.
        self.chain.release(&key);
        if let Some(ordinal) = ordinal {
            self.chain.insert(ordinal, &key);
        }

        self.children.insert(key, child);
        Ok(())
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// Leaves, optionally filtered by kind.
    pub fn leaves(&self, kind: Option<LeafKind>) -> Vec<&StructureLeaf> {
        self.children
            .values()
            .filter_map(|child| match child {
                Node::Leaf(leaf) if kind.map_or(true, |k| leaf.kind() == k) => Some(leaf),
                _ => None,
            })
            .collect()
    }

    pub fn leaf(&self, name: &str) -> Option<&StructureLeaf> {
        match self.children.get(name) {
            Some(Node::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    pub fn sub_trees(&self) -> Vec<&StructureTree> {
        self.children
            .values()
            .filter_map(|child| match child {
                Node::Tree(tree) => Some(tree),
                Node::Leaf(_) => None,
            })
            .collect()
    }

    pub fn sub_tree(&self, name: &str) -> Option<&StructureTree> {
        match self.children.get(name) {
            Some(Node::Tree(tree)) => Some(tree),
            _ => None,
        }
    }

    pub fn methods(&self) -> Vec<&StructureLeaf> {
        self.leaves(Some(LeafKind::Method))
    }

    /// The leaf bound to `method`, if any.
    pub fn method(&self, method: HttpMethod) -> Option<&StructureLeaf> {
        self.leaf(method.file_name())
            .filter(|leaf| leaf.kind() == LeafKind::Method)
    }

    pub fn middleware_leaves(&self) -> Vec<&StructureLeaf> {
        self.leaves(Some(LeafKind::Middleware))
    }

    pub fn special_leaves(&self) -> Vec<&StructureLeaf> {
        self.leaves(Some(LeafKind::Special))
    }

    /// Middleware leaves in execution order (ordinal ascending, gaps skipped).
    pub fn middleware_chain(&self) -> Vec<&StructureLeaf> {
        self.chain.keys().filter_map(|key| self.leaf(key)).collect()
    }

    /// Total number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.children
            .values()
            .map(|child| match child {
                Node::Leaf(_) => 1,
                Node::Tree(tree) => tree.leaf_count(),
            })
            .sum()
    }

    /// Handler-free snapshot of the structure, for comparison and display.
    pub fn outline(&self) -> TreeOutline {
        let mut leaves = Vec::new();
        let mut children = Vec::new();
        for child in self.children.values() {
            match child {
                Node::Leaf(leaf) => leaves.push(LeafOutline {
                    name: leaf.name().to_string(),
                    kind: leaf.kind(),
                    ordinal: leaf.ordinal(),
                }),
                Node::Tree(tree) => children.push(tree.outline()),
            }
        }
        TreeOutline {
            name: self.name.clone(),
            path: self.path.clone(),
            dynamic: self.dynamic,
            leaves,
            children,
        }
    }
}

/// Structural snapshot of a [`StructureTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeOutline {
    pub name: String,
    pub path: String,
    pub dynamic: bool,
    pub leaves: Vec<LeafOutline>,
    pub children: Vec<TreeOutline>,
}

/// Structural snapshot of a [`StructureLeaf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafOutline {
    pub name: String,
    pub kind: LeafKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,
}
