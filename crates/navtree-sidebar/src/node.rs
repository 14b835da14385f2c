//! Navigation node types.
//!
//! A sidebar is an ordered list of [`NavigationNode`] values. Each node is
//! either a [`Leaf`] pointing at a document by id, or a [`Category`] grouping
//! further nodes under a label.
//!
//! # Declaration shapes
//!
//! Nodes deserialize from any of these shapes:
//!
//! - `"guide/setup"`: leaf with no label override
//! - `{ "type": "doc", "id": "guide/setup", "label": "Setup" }`: leaf
//! - `{ "type": "category", "label": "Guide", "items": [...], "collapsed": true }`
//! - `{ "Guide": [...] }`: category shorthand (exactly one key)
//!
//! Serialization writes the most compact shape that round-trips: bare strings
//! for unlabelled leaves and the tagged object form for everything else.

use std::collections::HashMap;

use serde::de::IgnoredAny;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Reference to a document resolved by the documentation generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    /// Document identifier (e.g., "quickstart/dataset").
    pub id: String,
    /// Display label override. The generator uses the document title if `None`.
    pub label: Option<String>,
}

/// Named group of navigation nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Display label.
    pub label: String,
    /// Child nodes in display order.
    pub items: Vec<NavigationNode>,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
}

/// Node in a sidebar navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum NavigationNode {
    /// Document reference.
    Leaf(Leaf),
    /// Group of child nodes.
    Category(Category),
}

impl NavigationNode {
    /// Create a leaf without a label override.
    #[must_use]
    pub fn leaf(id: impl Into<String>) -> Self {
        Self::Leaf(Leaf {
            id: id.into(),
            label: None,
        })
    }

    /// Create an expanded category.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<NavigationNode>) -> Self {
        Self::Category(Category {
            label: label.into(),
            items,
            collapsed: false,
        })
    }

    /// Set the collapsed flag. No effect on leaves.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        if let Self::Category(category) = &mut self {
            category.collapsed = collapsed;
        }
        self
    }

    /// Set the display label. Replaces the category label for categories.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        match &mut self {
            Self::Leaf(leaf) => leaf.label = Some(label.into()),
            Self::Category(category) => category.label = label.into(),
        }
        self
    }

    /// Leaf id, if this node is a leaf.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.id),
            Self::Category(_) => None,
        }
    }

    /// Display label: the category label, or the leaf label override.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.label.as_deref(),
            Self::Category(category) => Some(&category.label),
        }
    }

    /// Child nodes. Empty for leaves.
    #[must_use]
    pub fn items(&self) -> &[NavigationNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Category(category) => &category.items,
        }
    }

    /// Nesting depth. Leaves are 0, a category is one more than its deepest child.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Category(category) => {
                1 + category
                    .items
                    .iter()
                    .map(NavigationNode::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Append leaf ids of this subtree in pre-order.
    pub(crate) fn collect_leaf_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(leaf) => out.push(&leaf.id),
            Self::Category(category) => {
                for item in &category.items {
                    item.collect_leaf_ids(out);
                }
            }
        }
    }
}

/// Any accepted declaration shape, before normalization.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Id(String),
    /// Unquoted numeric id in YAML or TOML (e.g., `- 404`).
    NumericId(i64),
    Typed(TypedNode),
    Shorthand(HashMap<String, Vec<NavigationNode>>),
    /// Anything else. Kept so the error can name the accepted shapes.
    Unrecognized(IgnoredAny),
}

const EXPECTED_SHAPES: &str = "expected a document id, a {type: doc, id} object, \
     a {type: category, label, items} object, or a single-key {label: [items]} object";

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TypedNode {
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    Category {
        label: String,
        items: Vec<NavigationNode>,
        #[serde(default)]
        collapsed: bool,
    },
}

impl TryFrom<RawNode> for NavigationNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        match raw {
            RawNode::Id(id) => Ok(Self::leaf(id)),
            RawNode::NumericId(id) => Ok(Self::leaf(id.to_string())),
            RawNode::Unrecognized(_) => Err(EXPECTED_SHAPES.to_owned()),
            RawNode::Typed(TypedNode::Doc { id, label }) => Ok(Self::Leaf(Leaf { id, label })),
            RawNode::Typed(TypedNode::Category {
                label,
                items,
                collapsed,
            }) => Ok(Self::Category(Category {
                label,
                items,
                collapsed,
            })),
            RawNode::Shorthand(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "category shorthand must have exactly one key, found {}",
                        map.len()
                    ));
                }
                let Some((label, items)) = map.into_iter().next() else {
                    return Err("category shorthand must have exactly one key".to_owned());
                };
                Ok(Self::category(label, items))
            }
        }
    }
}

impl Serialize for NavigationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(Leaf { id, label: None }) => serializer.serialize_str(id),
            Self::Leaf(Leaf {
                id,
                label: Some(label),
            }) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "doc")?;
                map.serialize_entry("id", id)?;
                map.serialize_entry("label", label)?;
                map.end()
            }
            Self::Category(category) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "category")?;
                map.serialize_entry("label", &category.label)?;
                map.serialize_entry("collapsed", &category.collapsed)?;
                map.serialize_entry("items", &category.items)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Result<NavigationNode, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_string_parses_as_leaf() {
        let node = parse(r#""quickstart/dataset""#).unwrap();

        assert_eq!(node, NavigationNode::leaf("quickstart/dataset"));
    }

    #[test]
    fn test_doc_object_parses_as_labelled_leaf() {
        let node = parse(r#"{"type": "doc", "id": "install", "label": "Installation"}"#).unwrap();

        assert_eq!(node.id(), Some("install"));
        assert_eq!(node.label(), Some("Installation"));
    }

    #[test]
    fn test_category_object_defaults_to_expanded() {
        let node = parse(r#"{"type": "category", "label": "Utilities", "items": ["utilities/retry"]}"#)
            .unwrap();

        assert_eq!(
            node,
            NavigationNode::category("Utilities", vec![NavigationNode::leaf("utilities/retry")])
        );
    }

    #[test]
    fn test_category_object_reads_collapsed() {
        let node =
            parse(r#"{"type": "category", "label": "A", "items": ["x"], "collapsed": true}"#)
                .unwrap();

        let NavigationNode::Category(category) = node else {
            panic!("expected category");
        };
        assert!(category.collapsed);
    }

    #[test]
    fn test_shorthand_object_parses_as_category() {
        let node = parse(r#"{"Tutorials": ["tutorials/a", "tutorials/b"]}"#).unwrap();

        assert_eq!(
            node,
            NavigationNode::category(
                "Tutorials",
                vec![
                    NavigationNode::leaf("tutorials/a"),
                    NavigationNode::leaf("tutorials/b"),
                ]
            )
        );
    }

    #[test]
    fn test_shorthand_with_two_keys_is_rejected() {
        let result = parse(r#"{"A": ["x"], "B": ["y"]}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = parse(r#"{"type": "autogenerated", "dirName": "."}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_unrecognized_shape_names_accepted_shapes() {
        let err = parse("true").unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("document id"), "got: {msg}");
        assert!(msg.contains("type: category"), "got: {msg}");
    }

    #[test]
    fn test_integer_parses_as_leaf() {
        let node: NavigationNode = serde_yaml::from_str("404").unwrap();

        assert_eq!(node, NavigationNode::leaf("404"));
    }

    #[test]
    fn test_nested_categories_keep_order() {
        let node = parse(
            r#"{"type": "category", "label": "A", "items": [
                "a1",
                {"type": "category", "label": "B", "items": ["b1", "b2"]},
                "a2"
            ]}"#,
        )
        .unwrap();

        let labels: Vec<_> = node
            .items()
            .iter()
            .map(|item| item.id().or(item.label()).unwrap())
            .collect();
        assert_eq!(labels, vec!["a1", "B", "a2"]);
        assert_eq!(node.items()[1].items().len(), 2);
    }

    #[test]
    fn test_unlabelled_leaf_serializes_as_string() {
        let json = serde_json::to_value(NavigationNode::leaf("index")).unwrap();

        assert_eq!(json, serde_json::json!("index"));
    }

    #[test]
    fn test_labelled_leaf_serializes_as_doc_object() {
        let node = NavigationNode::leaf("install").with_label("Install");

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "doc", "id": "install", "label": "Install"})
        );
    }

    #[test]
    fn test_category_serializes_with_collapsed_flag() {
        let node = NavigationNode::category("A", vec![NavigationNode::leaf("x")]).collapsed(true);

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["type"], "category");
        assert_eq!(json["label"], "A");
        assert_eq!(json["collapsed"], true);
        assert_eq!(json["items"][0], "x");
    }

    #[test]
    fn test_depth() {
        let leaf = NavigationNode::leaf("x");
        let flat = NavigationNode::category("A", vec![NavigationNode::leaf("x")]);
        let nested = NavigationNode::category(
            "A",
            vec![
                NavigationNode::leaf("x"),
                NavigationNode::category("B", vec![NavigationNode::leaf("y")]),
            ],
        );

        assert_eq!(leaf.depth(), 0);
        assert_eq!(flat.depth(), 1);
        assert_eq!(nested.depth(), 2);
        assert_eq!(NavigationNode::category("Empty", Vec::new()).depth(), 1);
    }

    #[test]
    fn test_collapsed_on_leaf_is_ignored() {
        let node = NavigationNode::leaf("x").collapsed(true);

        assert_eq!(node, NavigationNode::leaf("x"));
    }
}
