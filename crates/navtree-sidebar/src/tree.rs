//! Sidebar collections.
//!
//! A [`NavigationTree`] maps sidebar names to their top-level nodes while
//! keeping declaration order. Serde's default map types either sort keys or
//! lose order, so (de)serialization is implemented by hand over a `Vec`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::node::NavigationNode;

/// Named navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sidebar {
    /// Sidebar name (e.g., "tutorialSidebar").
    pub name: String,
    /// Top-level nodes in display order.
    pub items: Vec<NavigationNode>,
}

impl Sidebar {
    /// Create a sidebar.
    #[must_use]
    pub fn new(name: impl Into<String>, items: Vec<NavigationNode>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Leaf ids in pre-order, which is the order pages appear in the sidebar.
    #[must_use]
    pub fn leaf_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for item in &self.items {
            item.collect_leaf_ids(&mut ids);
        }
        ids
    }

    /// Depth of the deepest top-level node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.items
            .iter()
            .map(NavigationNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Ordered mapping from sidebar name to sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationTree {
    sidebars: Vec<Sidebar>,
}

impl NavigationTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sidebar, keeping the position of an existing one with the same name.
    ///
    /// Returns the replaced items if a sidebar with this name already existed.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        items: Vec<NavigationNode>,
    ) -> Option<Vec<NavigationNode>> {
        let name = name.into();
        if let Some(existing) = self.sidebars.iter_mut().find(|s| s.name == name) {
            return Some(std::mem::replace(&mut existing.items, items));
        }
        self.sidebars.push(Sidebar { name, items });
        None
    }

    /// Get sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|s| s.name == name)
    }

    /// Iterate sidebars in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sidebar> {
        self.sidebars.iter()
    }

    /// Sidebar names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sidebars.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// True if the tree has no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Leaf ids of every sidebar, in declaration order.
    #[must_use]
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.sidebars.iter().flat_map(Sidebar::leaf_ids).collect()
    }
}

impl FromIterator<Sidebar> for NavigationTree {
    fn from_iter<I: IntoIterator<Item = Sidebar>>(iter: I) -> Self {
        let mut tree = Self::new();
        for sidebar in iter {
            tree.insert(sidebar.name, sidebar.items);
        }
        tree
    }
}

impl<'a> IntoIterator for &'a NavigationTree {
    type Item = &'a Sidebar;
    type IntoIter = std::slice::Iter<'a, Sidebar>;

    fn into_iter(self) -> Self::IntoIter {
        self.sidebars.iter()
    }
}

impl IntoIterator for NavigationTree {
    type Item = Sidebar;
    type IntoIter = std::vec::IntoIter<Sidebar>;

    fn into_iter(self) -> Self::IntoIter {
        self.sidebars.into_iter()
    }
}

impl Serialize for NavigationTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sidebars.len()))?;
        for sidebar in &self.sidebars {
            map.serialize_entry(&sidebar.name, &sidebar.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NavigationTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = NavigationTree;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of sidebar names to navigation items")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut tree = NavigationTree::new();
        while let Some((name, items)) = access.next_entry::<String, Vec<NavigationNode>>()? {
            if tree.get(&name).is_some() {
                return Err(serde::de::Error::custom(format!(
                    "duplicate sidebar name: {name}"
                )));
            }
            tree.insert(name, items);
        }
        Ok(tree)
    }
}
