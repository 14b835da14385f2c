//! Sidebar navigation trees for documentation sites.
//!
//! This crate provides:
//! - [`NavigationNode`], [`Sidebar`], [`NavigationTree`]: the tree model
//! - [`validate`] and [`Validator`]: structural checks before handing a tree
//!   to a documentation generator
//! - [`SidebarBuilder`]: incremental construction with cycle detection
//! - [`load_file`] and friends: JSON, YAML, and TOML declarations
//!
//! # Quick Start
//!
//! ```
//! use navtree_sidebar::{NavigationNode, NavigationTree, validate};
//!
//! let mut tree = NavigationTree::new();
//! tree.insert(
//!     "docs",
//!     vec![
//!         NavigationNode::category(
//!             "A",
//!             vec![NavigationNode::leaf("x"), NavigationNode::leaf("y")],
//!         ),
//!         NavigationNode::leaf("z"),
//!     ],
//! );
//!
//! let tree = validate(tree)?;
//! assert_eq!(tree.get("docs").unwrap().leaf_ids(), vec!["x", "y", "z"]);
//! # Ok::<(), navtree_sidebar::ValidationError>(())
//! ```

mod builder;
mod load;
mod node;
mod outline;
mod tree;
mod validate;

pub use builder::{BuilderError, NodeId, SidebarBuilder};
pub use load::{Format, LoadError, load_and_validate, load_file, parse};
pub use node::{Category, Leaf, NavigationNode};
pub use outline::render_outline;
pub use tree::{NavigationTree, Sidebar};
pub use validate::{
    DEFAULT_MAX_DEPTH, Location, Report, ValidationError, ValidationWarning, Validator, validate,
};
