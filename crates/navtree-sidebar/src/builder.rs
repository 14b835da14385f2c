//! Incremental sidebar construction.
//!
//! [`SidebarBuilder`] stores nodes in a flat arena and links them by
//! [`NodeId`], so code that discovers structure piece by piece (e.g., a
//! generator walking a directory) can add children to a category after
//! creating it. Every node has at most one place in the sidebar: linking a
//! node twice fails with [`BuilderError::AlreadyLinked`], and linking a
//! category into its own subtree fails with [`BuilderError::CyclicCategory`].
//! [`SidebarBuilder::build`] then materializes the tree and runs the regular
//! [`Validator`] checks.
//!
//! # Example
//!
//! ```
//! use navtree_sidebar::SidebarBuilder;
//!
//! let mut builder = SidebarBuilder::new();
//! let guide = builder.category("Guide");
//! let setup = builder.leaf("guide/setup");
//! builder.push(guide, setup)?;
//! builder.push_root(guide)?;
//!
//! let sidebar = builder.build("docs")?;
//! assert_eq!(sidebar.leaf_ids(), vec!["guide/setup"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::node::{Category, Leaf, NavigationNode};
use crate::tree::Sidebar;
use crate::validate::{ValidationError, ValidationWarning, Validator};

/// Handle to a node owned by a [`SidebarBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Error from linking nodes.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// Id was not issued by this builder.
    #[error("unknown node id {0}")]
    UnknownNode(usize),
    /// Items can only be pushed onto categories.
    #[error("node {0} is a leaf and cannot hold items")]
    NotACategory(usize),
    /// Node already has a place in the sidebar.
    #[error("node {0} is already linked into the sidebar")]
    AlreadyLinked(usize),
    /// Category pushed into itself or one of its descendants.
    #[error("category \"{label}\" would contain itself")]
    CyclicCategory {
        /// Label of the category being pushed.
        label: String,
    },
}

enum Slot {
    Leaf(Leaf),
    Category {
        label: String,
        collapsed: bool,
        items: Vec<NodeId>,
    },
}

#[derive(Clone, Copy)]
enum Link {
    Root,
    Child(NodeId),
}

/// Arena-backed sidebar builder.
#[derive(Default)]
pub struct SidebarBuilder {
    slots: Vec<Slot>,
    links: Vec<Option<Link>>,
    roots: Vec<NodeId>,
}

impl SidebarBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf.
    pub fn leaf(&mut self, id: impl Into<String>) -> NodeId {
        self.alloc(Slot::Leaf(Leaf {
            id: id.into(),
            label: None,
        }))
    }

    /// Add a leaf with a display label override.
    pub fn labelled_leaf(&mut self, id: impl Into<String>, label: impl Into<String>) -> NodeId {
        self.alloc(Slot::Leaf(Leaf {
            id: id.into(),
            label: Some(label.into()),
        }))
    }

    /// Add an expanded category with no items yet.
    pub fn category(&mut self, label: impl Into<String>) -> NodeId {
        self.alloc(Slot::Category {
            label: label.into(),
            collapsed: false,
            items: Vec::new(),
        })
    }

    /// Set whether a category starts collapsed.
    pub fn set_collapsed(&mut self, node: NodeId, value: bool) -> Result<(), BuilderError> {
        match self.slot_mut(node)? {
            Slot::Category { collapsed, .. } => {
                *collapsed = value;
                Ok(())
            }
            Slot::Leaf(_) => Err(BuilderError::NotACategory(node.0)),
        }
    }

    /// Append `child` to the items of category `parent`.
    ///
    /// Fails if `child` is already linked or if `parent` lies inside the
    /// subtree of `child`.
    pub fn push(&mut self, parent: NodeId, child: NodeId) -> Result<(), BuilderError> {
        let child_slot = self.slot(child)?;
        if let Slot::Leaf(_) = self.slot(parent)? {
            return Err(BuilderError::NotACategory(parent.0));
        }
        if let Slot::Category { label, .. } = child_slot
            && self.is_ancestor_or_self(child, parent)
        {
            return Err(BuilderError::CyclicCategory {
                label: label.clone(),
            });
        }
        self.link(child, Link::Child(parent))?;

        if let Slot::Category { items, .. } = &mut self.slots[parent.0] {
            items.push(child);
        }
        Ok(())
    }

    /// Append `node` to the top level of the sidebar.
    pub fn push_root(&mut self, node: NodeId) -> Result<(), BuilderError> {
        self.slot(node)?;
        self.link(node, Link::Root)?;
        self.roots.push(node);
        Ok(())
    }

    /// Materialize and validate with default options.
    pub fn build(&self, name: impl Into<String>) -> Result<Sidebar, ValidationError> {
        let (sidebar, _) = self.build_with(name, &Validator::default())?;
        Ok(sidebar)
    }

    /// Materialize and validate, returning the validator's warnings.
    pub fn build_with(
        &self,
        name: impl Into<String>,
        validator: &Validator,
    ) -> Result<(Sidebar, Vec<ValidationWarning>), ValidationError> {
        let items = self.roots.iter().map(|&root| self.materialize(root)).collect();
        let sidebar = Sidebar {
            name: name.into(),
            items,
        };
        let warnings = validator.validate_sidebar(&sidebar)?;
        Ok((sidebar, warnings))
    }

    fn materialize(&self, id: NodeId) -> NavigationNode {
        match &self.slots[id.0] {
            Slot::Leaf(leaf) => NavigationNode::Leaf(leaf.clone()),
            Slot::Category {
                label,
                collapsed,
                items,
            } => NavigationNode::Category(Category {
                label: label.clone(),
                items: items.iter().map(|&child| self.materialize(child)).collect(),
                collapsed: *collapsed,
            }),
        }
    }

    /// True if `node` is `target` or one of its ancestors.
    fn is_ancestor_or_self(&self, node: NodeId, target: NodeId) -> bool {
        let mut current = target;
        loop {
            if current == node {
                return true;
            }
            match self.links[current.0] {
                Some(Link::Child(parent)) => current = parent,
                Some(Link::Root) | None => return false,
            }
        }
    }

    fn link(&mut self, node: NodeId, link: Link) -> Result<(), BuilderError> {
        let slot = &mut self.links[node.0];
        if slot.is_some() {
            return Err(BuilderError::AlreadyLinked(node.0));
        }
        *slot = Some(link);
        Ok(())
    }

    fn alloc(&mut self, slot: Slot) -> NodeId {
        self.slots.push(slot);
        self.links.push(None);
        NodeId(self.slots.len() - 1)
    }

    fn slot(&self, node: NodeId) -> Result<&Slot, BuilderError> {
        self.slots
            .get(node.0)
            .ok_or(BuilderError::UnknownNode(node.0))
    }

    fn slot_mut(&mut self, node: NodeId) -> Result<&mut Slot, BuilderError> {
        self.slots
            .get_mut(node.0)
            .ok_or(BuilderError::UnknownNode(node.0))
    }
}
