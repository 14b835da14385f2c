//! Plain-text outline of a sidebar for terminal output.

use crate::node::NavigationNode;
use crate::tree::Sidebar;

const INDENT: &str = "  ";

/// Render a sidebar as an indented outline.
///
/// ```text
/// docs
///   - index
///   - Guide/
///     - guide/setup
///   - Reference/ (collapsed)
///     - Settings [reference/settings]
/// ```
#[must_use]
pub fn render_outline(sidebar: &Sidebar) -> String {
    let mut out = String::new();
    out.push_str(&sidebar.name);
    out.push('\n');
    render_items(&sidebar.items, 1, &mut out);
    out
}

fn render_items(items: &[NavigationNode], level: usize, out: &mut String) {
    for node in items {
        out.push_str(&INDENT.repeat(level));
        match node {
            NavigationNode::Leaf(leaf) => match &leaf.label {
                Some(label) => out.push_str(&format!("- {label} [{}]\n", leaf.id)),
                None => out.push_str(&format!("- {}\n", leaf.id)),
            },
            NavigationNode::Category(category) => {
                out.push_str(&format!("- {}/", category.label));
                if category.collapsed {
                    out.push_str(" (collapsed)");
                }
                out.push('\n');
                render_items(&category.items, level + 1, out);
            }
        }
    }
}
