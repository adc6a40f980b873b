//! Tree building subsystem.
//!
//! # Data Flow
//! ```text
//! root directory
//!     → source.list_entries(dir)
//!     → for each entry:
//!         directory → populate child StructureTree (recursive), attach
//!         file      → skip `_*`, load handler, check shape,
//!                     classify, build leaf, attach
//!     → StructureTree (immutable from here on)
//! ```
//!
//! # Design Decisions
//! - Plain recursion; depth is bounded by the real directory depth
//! - Each node is fully populated before it is attached to its parent
//! - Strict mode by default: a partial route table is never produced
//!   unless lenient mode is chosen explicitly

pub mod builder;

pub use builder::{BuildMode, TreeBuilder};
