//! Route structure subsystem.
//!
//! # Data Flow
//! ```text
//! directory entry name
//!     → naming.rs (strip extension, classify, parse ordinal / brackets)
//!     → leaf.rs (method / middleware / special leaf)
//!     → tree.rs (attach under parent node, claim middleware ordinal)
//!     → chain.rs (ordinal → middleware, read in ascending order)
//! ```
//!
//! # Design Decisions
//! - Children are a sum type (`Node::Leaf` / `Node::Tree`); traversal
//!   matches on it exhaustively
//! - A leaf's kind is fixed by its binding variant
//! - Trees are populated bottom-up and never mutated after the build

pub mod chain;
pub mod error;
pub mod leaf;
pub mod naming;
pub mod tree;

pub use chain::MiddlewareChain;
pub use error::{BuildError, BuildResult};
pub use leaf::{Binding, LeafKind, StructureLeaf};
pub use naming::{HttpMethod, SpecialKind};
pub use tree::{LeafOutline, Node, StructureTree, TreeOutline, ROOT_PATH};
