//! Structural validation of navigation trees.
//!
//! Each sidebar is checked in a fixed order:
//!
//! 1. every category has at least one item,
//! 2. every leaf id appears once (per sidebar, or across the whole tree
//!    when [`Validator::unique_across_sidebars`] is set).
//!
//! A category containing itself cannot be expressed with owned
//! [`NavigationNode`] values; [`SidebarBuilder`](crate::SidebarBuilder)
//! rejects such links when they are made.
//!
//! Nesting deeper than [`Validator::max_depth`] is reported as a
//! [`ValidationWarning`] and never fails validation.

use std::collections::HashMap;
use std::fmt;

use crate::node::NavigationNode;
use crate::tree::{NavigationTree, Sidebar};

/// Depth beyond which sidebars become hard to use.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Position of a node inside a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Sidebar name.
    pub sidebar: String,
    /// Labels of enclosing categories, outermost first.
    pub trail: Vec<String>,
    /// 1-based position within the enclosing list.
    pub position: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sidebar)?;
        for label in &self.trail {
            write!(f, " > {label}")?;
        }
        write!(f, " #{}", self.position)
    }
}

/// Structural error that rejects a sidebar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Category declared without items.
    #[error("category \"{label}\" has no items (at {location})")]
    EmptyCategory {
        /// Label of the empty category.
        label: String,
        /// Where the category is declared.
        location: Location,
    },

    /// Same document referenced twice.
    #[error("document \"{id}\" is referenced more than once (at {first} and {second})")]
    DuplicateLeafId {
        /// Repeated document id.
        id: String,
        /// First occurrence.
        first: Location,
        /// Second occurrence.
        second: Location,
    },
}

/// Non-fatal finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Top-level node nests deeper than the configured limit.
    DepthExceeded {
        /// Label of the top-level category.
        label: String,
        /// Where the category is declared.
        location: Location,
        /// Actual nesting depth.
        depth: usize,
        /// Configured limit.
        max_depth: usize,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthExceeded {
                label,
                location,
                depth,
                max_depth,
            } => write!(
                f,
                "category \"{label}\" nests {depth} levels deep, more than {max_depth} (at {location})"
            ),
        }
    }
}

/// Every finding for a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Errors in check order, grouped by sidebar.
    pub errors: Vec<ValidationError>,
    /// Warnings in declaration order.
    pub warnings: Vec<ValidationWarning>,
}

impl Report {
    /// True if no errors were found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if at least one warning was found.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validation options.
#[derive(Clone, Debug)]
pub struct Validator {
    max_depth: usize,
    unique_across_sidebars: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unique_across_sidebars: false,
        }
    }
}

impl Validator {
    /// Create a validator with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth above which a warning is raised.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Require leaf ids to be unique across all sidebars, not just within one.
    #[must_use]
    pub fn unique_across_sidebars(mut self, enabled: bool) -> Self {
        self.unique_across_sidebars = enabled;
        self
    }

    /// Configured depth limit.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate a tree, returning it unchanged on success.
    ///
    /// Stops at the first error. Depth warnings are logged.
    pub fn validate(&self, tree: NavigationTree) -> Result<NavigationTree, ValidationError> {
        let mut seen = HashMap::new();
        for sidebar in &tree {
            if !self.unique_across_sidebars {
                seen.clear();
            }
            if let Some(err) = sidebar_errors(sidebar, &mut seen).into_iter().next() {
                return Err(err);
            }
            for warning in self.depth_warnings(sidebar) {
                tracing::warn!(sidebar = %sidebar.name, "{warning}");
            }
            tracing::debug!(
                sidebar = %sidebar.name,
                leaves = sidebar.leaf_ids().len(),
                "Validated sidebar"
            );
        }
        Ok(tree)
    }

    /// Validate a single sidebar in isolation.
    ///
    /// Returns the depth warnings on success, after logging them.
    pub fn validate_sidebar(
        &self,
        sidebar: &Sidebar,
    ) -> Result<Vec<ValidationWarning>, ValidationError> {
        let mut seen = HashMap::new();
        if let Some(err) = sidebar_errors(sidebar, &mut seen).into_iter().next() {
            return Err(err);
        }
        let warnings = self.depth_warnings(sidebar);
        for warning in &warnings {
            tracing::warn!(sidebar = %sidebar.name, "{warning}");
        }
        Ok(warnings)
    }

    /// Collect every error and warning in the tree.
    #[must_use]
    pub fn check(&self, tree: &NavigationTree) -> Report {
        let mut report = Report::default();
        let mut seen = HashMap::new();
        for sidebar in tree {
            if !self.unique_across_sidebars {
                seen.clear();
            }
            let errors = sidebar_errors(sidebar, &mut seen);
            tracing::debug!(
                sidebar = %sidebar.name,
                errors = errors.len(),
                "Checked sidebar"
            );
            report.errors.extend(errors);
            report.warnings.extend(self.depth_warnings(sidebar));
        }
        report
    }

    fn depth_warnings(&self, sidebar: &Sidebar) -> Vec<ValidationWarning> {
        sidebar
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, node)| {
                let depth = node.depth();
                let NavigationNode::Category(category) = node else {
                    return None;
                };
                (depth > self.max_depth).then(|| ValidationWarning::DepthExceeded {
                    label: category.label.clone(),
                    location: Location {
                        sidebar: sidebar.name.clone(),
                        trail: Vec::new(),
                        position: i + 1,
                    },
                    depth,
                    max_depth: self.max_depth,
                })
            })
            .collect()
    }
}

/// Validate a tree with default options.
pub fn validate(tree: NavigationTree) -> Result<NavigationTree, ValidationError> {
    Validator::default().validate(tree)
}

/// All errors of one sidebar: empty categories first, then duplicate ids.
///
/// `seen` maps already visited leaf ids to their first location and is
/// updated in place.
fn sidebar_errors(
    sidebar: &Sidebar,
    seen: &mut HashMap<String, Location>,
) -> Vec<ValidationError> {
    let mut empty = Vec::new();
    let mut duplicates = Vec::new();

    let mut visit = |node: &NavigationNode, cursor: &Cursor<'_>| match node {
        NavigationNode::Category(category) if category.items.is_empty() => {
            empty.push(ValidationError::EmptyCategory {
                label: category.label.clone(),
                location: cursor.location(),
            });
        }
        NavigationNode::Leaf(leaf) => {
            if let Some(first) = seen.get(&leaf.id) {
                duplicates.push(ValidationError::DuplicateLeafId {
                    id: leaf.id.clone(),
                    first: first.clone(),
                    second: cursor.location(),
                });
            } else {
                seen.insert(leaf.id.clone(), cursor.location());
            }
        }
        NavigationNode::Category(_) => {}
    };
    walk(&sidebar.name, &sidebar.items, &mut Vec::new(), &mut visit);

    empty.extend(duplicates);
    empty
}

/// Borrowed position used during traversal.
struct Cursor<'a> {
    sidebar: &'a str,
    trail: &'a [String],
    index: usize,
}

impl Cursor<'_> {
    fn location(&self) -> Location {
        Location {
            sidebar: self.sidebar.to_owned(),
            trail: self.trail.to_vec(),
            position: self.index + 1,
        }
    }
}

/// Pre-order traversal.
fn walk<F>(sidebar: &str, items: &[NavigationNode], trail: &mut Vec<String>, visit: &mut F)
where
    F: FnMut(&NavigationNode, &Cursor<'_>),
{
    for (index, node) in items.iter().enumerate() {
        visit(
            node,
            &Cursor {
                sidebar,
                trail: trail.as_slice(),
                index,
            },
        );
        if let NavigationNode::Category(category) = node {
            trail.push(category.label.clone());
            walk(sidebar, &category.items, trail, visit);
            trail.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(id: &str) -> NavigationNode {
        NavigationNode::leaf(id)
    }

    fn category(label: &str, items: Vec<NavigationNode>) -> NavigationNode {
        NavigationNode::category(label, items)
    }

    fn tree(items: Vec<NavigationNode>) -> NavigationTree {
        let mut tree = NavigationTree::new();
        tree.insert("docs", items);
        tree
    }

    #[test]
    fn test_valid_tree_keeps_order() {
        let input = tree(vec![category("A", vec![leaf("x"), leaf("y")]), leaf("z")]);

        let validated = validate(input.clone()).unwrap();

        assert_eq!(validated, input);
        let items = &validated.get("docs").unwrap().items;
        assert_eq!(items[0].label(), Some("A"));
        assert_eq!(items[1].id(), Some("z"));
        let inner: Vec<_> = items[0].items().iter().filter_map(|n| n.id()).collect();
        assert_eq!(inner, vec!["x", "y"]);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let input = tree(vec![
            leaf("index"),
            category("Guide", vec![leaf("a"), category("Deep", vec![leaf("b")])]),
        ]);

        let once = validate(input).unwrap();
        let twice = validate(once.clone()).unwrap();

        assert_eq!(twice, once);
    }

    #[test]
    fn test_empty_category_fails() {
        let err = validate(tree(vec![category("A", Vec::new())])).unwrap_err();

        assert_eq!(
            err,
            ValidationError::EmptyCategory {
                label: "A".to_owned(),
                location: Location {
                    sidebar: "docs".to_owned(),
                    trail: Vec::new(),
                    position: 1,
                },
            }
        );
    }

    #[test]
    fn test_nested_empty_category_names_trail() {
        let err = validate(tree(vec![
            leaf("index"),
            category("Guide", vec![leaf("a"), category("Later", Vec::new())]),
        ]))
        .unwrap_err();

        let ValidationError::EmptyCategory { label, location } = err else {
            panic!("expected EmptyCategory, got {err:?}");
        };
        assert_eq!(label, "Later");
        assert_eq!(location.to_string(), "docs > Guide #2");
    }

    #[test]
    fn test_duplicate_leaf_fails_with_both_locations() {
        let err = validate(tree(vec![leaf("x"), category("B", vec![leaf("x")])])).unwrap_err();

        let ValidationError::DuplicateLeafId { id, first, second } = err else {
            panic!("expected DuplicateLeafId, got {err:?}");
        };
        assert_eq!(id, "x");
        assert_eq!(first.to_string(), "docs #1");
        assert_eq!(second.to_string(), "docs > B #1");
    }

    #[test]
    fn test_empty_category_reported_before_duplicates() {
        let err = validate(tree(vec![
            leaf("x"),
            leaf("x"),
            category("Empty", Vec::new()),
        ]))
        .unwrap_err();

        assert!(
            matches!(err, ValidationError::EmptyCategory { .. }),
            "Expected EmptyCategory, got {err:?}"
        );
    }

    #[test]
    fn test_error_message_names_offender() {
        let err = validate(tree(vec![category("QuickStart", Vec::new())])).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("QuickStart"), "got: {msg}");
        assert!(msg.contains("docs #1"), "got: {msg}");
    }

    #[test]
    fn test_same_id_in_two_sidebars_allowed_by_default() {
        let mut input = NavigationTree::new();
        input.insert("docs", vec![leaf("intro")]);
        input.insert("api", vec![leaf("intro")]);

        assert!(validate(input).is_ok());
    }

    #[test]
    fn test_same_id_in_two_sidebars_rejected_when_unique_across() {
        let mut input = NavigationTree::new();
        input.insert("docs", vec![leaf("intro")]);
        input.insert("api", vec![leaf("intro")]);

        let err = Validator::new()
            .unique_across_sidebars(true)
            .validate(input)
            .unwrap_err();

        let ValidationError::DuplicateLeafId { first, second, .. } = err else {
            panic!("expected DuplicateLeafId, got {err:?}");
        };
        assert_eq!(first.sidebar, "docs");
        assert_eq!(second.sidebar, "api");
    }

    #[test]
    fn test_deep_nesting_is_only_a_warning() {
        let deep = category(
            "L1",
            vec![category(
                "L2",
                vec![category("L3", vec![category("L4", vec![leaf("x")])])],
            )],
        );
        let input = tree(vec![deep]);

        let report = Validator::new().check(&input);

        assert!(report.is_ok());
        assert!(report.has_warnings());
        let ValidationWarning::DepthExceeded {
            label,
            depth,
            max_depth,
            ..
        } = &report.warnings[0];
        assert_eq!(label, "L1");
        assert_eq!(*depth, 4);
        assert_eq!(*max_depth, DEFAULT_MAX_DEPTH);
        assert!(validate(input).is_ok());
    }

    #[test]
    fn test_custom_max_depth() {
        let input = tree(vec![category("A", vec![category("B", vec![leaf("x")])])]);

        let report = Validator::new().with_max_depth(1).check(&input);

        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_check_collects_all_errors_across_sidebars() {
        let mut input = NavigationTree::new();
        input.insert("docs", vec![category("Empty", Vec::new()), leaf("a"), leaf("a")]);
        input.insert("api", vec![category("AlsoEmpty", Vec::new())]);

        let report = Validator::new().check(&input);

        assert_eq!(report.errors.len(), 3);
        assert!(matches!(
            &report.errors[0],
            ValidationError::EmptyCategory { label, .. } if label == "Empty"
        ));
        assert!(matches!(
            &report.errors[1],
            ValidationError::DuplicateLeafId { id, .. } if id == "a"
        ));
        assert!(matches!(
            &report.errors[2],
            ValidationError::EmptyCategory { label, .. } if label == "AlsoEmpty"
        ));
    }

    #[test]
    fn test_validate_sidebar() {
        let good = Sidebar::new("docs", vec![leaf("a"), leaf("b")]);
        let bad = Sidebar::new("docs", vec![leaf("a"), leaf("a")]);

        assert_eq!(Validator::new().validate_sidebar(&good), Ok(Vec::new()));
        assert!(Validator::new().validate_sidebar(&bad).is_err());
    }

    #[test]
    fn test_validate_sidebar_returns_depth_warnings() {
        let nested = Sidebar::new("docs", vec![category("A", vec![category("B", vec![leaf("x")])])]);

        let warnings = Validator::new()
            .with_max_depth(1)
            .validate_sidebar(&nested)
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("docs #1"));
    }

    #[test]
    fn test_empty_tree_is_valid() {
        assert!(validate(NavigationTree::new()).is_ok());
    }

    #[test]
    fn test_fixture_validates() {
        let input: NavigationTree =
            serde_json::from_str(include_str!("../testdata/sidebars.json")).unwrap();

        let report = Validator::new().check(&input);

        assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
        assert!(!report.has_warnings());
    }
}
