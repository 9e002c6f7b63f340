//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{FilterSpec, GroupSpec};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Render a group hierarchy as a termtree.
///
/// Leaves show their filter summary next to the name; folders show their
/// plain name. Conversion walks the hierarchy with an explicit stack by
/// building children before parents (post-order over a reversed preorder).
pub fn render_hierarchy(spec: &GroupSpec) -> Tree<String> {
    fn label(spec: &GroupSpec) -> String {
        match spec {
            GroupSpec::Folder { name, .. } => name.clone(),
            GroupSpec::Leaf { name, filter } => match filter {
                FilterSpec::NameWildcard { pattern } => {
                    format!("{name}  [name ~ {pattern}]")
                }
                FilterSpec::AttributeEquals {
                    category, property, ..
                } => format!("{name}  [{category}.{property}]"),
            },
        }
    }

    // Preorder collect, then fold back in reverse so every node's
    // subtree is complete before it is attached to its parent.
    let mut order: Vec<&GroupSpec> = Vec::new();
    let mut stack = vec![spec];
    while let Some(s) = stack.pop() {
        order.push(s);
        if let GroupSpec::Folder { children, .. } = s {
            stack.extend(children.iter());
        }
    }

    let mut built: Vec<Tree<String>> = Vec::new();
    for s in order.into_iter().rev() {
        match s {
            GroupSpec::Leaf { .. } => built.push(Tree::new(label(s))),
            GroupSpec::Folder { children, .. } => {
                let mut node = Tree::new(label(s));
                // Completed child subtrees sit on top of the stack in
                // natural order
                let taken = built.split_off(built.len() - children.len());
                node.leaves.extend(taken);
                built.push(node);
            }
        }
    }

    built.pop().unwrap_or_else(|| Tree::new(label(spec)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_hierarchy_when_rendering_then_structure_preserved() {
        let leaf = |n: &str| GroupSpec::leaf(n, FilterSpec::name_wildcard("*")).unwrap();
        let spec = GroupSpec::folder(
            "2. CLASH SETS",
            vec![GroupSpec::folder("MEP", vec![leaf("Duct"), leaf("Pipe")])],
        );

        let tree = render_hierarchy(&spec);
        let rendered = tree.to_string();

        assert!(rendered.contains("2. CLASH SETS"));
        assert!(rendered.contains("MEP"));
        let duct = rendered.find("Duct").unwrap();
        let pipe = rendered.find("Pipe").unwrap();
        assert!(duct < pipe);
    }
}
