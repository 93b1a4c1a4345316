// crates/pattern-catalog-patterns/src/structural/composite.rs
// ============================================================================
// Module: Composite Built-ins
// Description: Directory trees and grouped graphics.
// Purpose: Treat single objects and groups of objects uniformly.
// Dependencies: pattern-catalog-core, serde_json
// ============================================================================

//! ## Overview
//! A [`Node`] is either a leaf carrying a value or a branch whose value is
//! the sum of its children. Files contribute their size in bytes. Graphics
//! contribute the strokes needed to draw them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use pattern_catalog_core::Factory;
use pattern_catalog_core::PatternError;
use pattern_catalog_core::PatternInstance;
use pattern_catalog_core::Scriptable;
use pattern_catalog_core::capabilities::CompositePattern;
use pattern_catalog_core::instance::args;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Tree
// ============================================================================

/// Part/whole tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Single object.
    Leaf {
        /// Display name.
        name: String,
        /// Leaf value.
        value: u64,
    },
    /// Group of nodes.
    Branch {
        /// Display name.
        name: String,
        /// Child nodes in insertion order.
        children: Vec<Self>,
    },
}

impl Node {
    /// Creates a leaf.
    fn leaf(name: &str, value: u64) -> Self {
        Self::Leaf {
            name: name.to_string(),
            value,
        }
    }

    /// Creates a branch.
    fn branch(name: &str, children: Vec<Self>) -> Self {
        Self::Branch {
            name: name.to_string(),
            children,
        }
    }

    /// Value of the node, summed through branches.
    fn total(&self) -> u64 {
        match self {
            Self::Leaf {
                value, ..
            } => *value,
            Self::Branch {
                children, ..
            } => children.iter().map(Self::total).sum(),
        }
    }

    /// Appends leaf values depth-first.
    fn collect_leaves(&self, out: &mut Vec<u64>) {
        match self {
            Self::Leaf {
                value, ..
            } => out.push(*value),
            Self::Branch {
                children, ..
            } => children.iter().for_each(|child| child.collect_leaves(out)),
        }
    }

    /// Appends indented display lines.
    fn display(&self, labels: (&str, &str), depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Leaf {
                name,
                value,
            } => out.push(format!("{indent}{}: {name} ({value})", labels.0)),
            Self::Branch {
                name,
                children,
            } => {
                out.push(format!("{indent}{}: {name}", labels.1));
                for child in children {
                    child.display(labels, depth + 1, out);
                }
            }
        }
    }
}

/// Composite tree with display labels for leaves and branches.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Root branch.
    root: Node,
    /// Leaf and branch labels.
    labels: (&'static str, &'static str),
}

impl Scriptable for Tree {
    fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, PatternError> {
        match operation {
            "total" => Ok(json!(self.total())),
            "leaves" => Ok(json!(self.leaf_totals())),
            "add" => {
                let name = args::string(operation, args, 0)?;
                let value = args::unsigned(operation, args, 1)?;
                self.add_leaf(name, value);
                Ok(json!(self.total()))
            }
            "display" => {
                let mut lines = Vec::new();
                self.root.display(self.labels, 0, &mut lines);
                Ok(json!(lines))
            }
            other => Err(PatternError::unknown_operation(other)),
        }
    }
}

impl CompositePattern for Tree {
    fn total(&self) -> u64 {
        self.root.total()
    }

    fn leaf_totals(&self) -> Vec<u64> {
        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
    }

    fn add_leaf(&mut self, name: &str, value: u64) {
        if let Node::Branch {
            children, ..
        } = &mut self.root
        {
            children.push(Node::leaf(name, value));
        } else {
            let previous = std::mem::replace(&mut self.root, Node::branch("root", Vec::new()));
            self.root = Node::branch("root", vec![previous, Node::leaf(name, value)]);
        }
    }
}

// ============================================================================
// SECTION: Factories
// ============================================================================

/// Directory tree whose leaves are file sizes in bytes.
#[must_use]
pub fn directory() -> Factory {
    Factory::new(|| {
        let root = Node::branch(
            "root",
            vec![
                Node::leaf("file1.txt", 120),
                Node::branch("docs", vec![Node::leaf("file2.txt", 300), Node::leaf("notes.md", 80)]),
            ],
        );
        Ok(PatternInstance::composite(Tree {
            root,
            labels: ("File", "Directory"),
        }))
    })
}

/// Picture of grouped shapes whose leaves are stroke counts.
#[must_use]
pub fn graphics() -> Factory {
    Factory::new(|| {
        let root = Node::branch(
            "picture",
            vec![
                Node::leaf("line", 1),
                Node::leaf("circle", 1),
                Node::branch("house", vec![Node::leaf("square", 4), Node::leaf("triangle", 3)]),
            ],
        );
        Ok(PatternInstance::composite(Tree {
            root,
            labels: ("Graphic", "Group"),
        }))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Node;

    #[test]
    fn branch_total_sums_nested_leaves() {
        let tree = Node::branch("root", vec![Node::leaf("a", 2), Node::branch("b", vec![Node::leaf("c", 5)])]);
        assert_eq!(tree.total(), 7, "nested leaves should be summed");
        let mut leaves = Vec::new();
        tree.collect_leaves(&mut leaves);
        assert_eq!(leaves, vec![2, 5], "leaves should be collected depth-first");
    }
}
