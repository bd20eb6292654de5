//! Tree view model
//!
//! Every node starts expanded when a response loads. `TreeState` records the
//! paths the user collapsed, so collapsing a parent keeps the descendants'
//! remembered state and re-expanding restores it.

use super::classify::{scalar_kind, ScalarKind};
use crate::value::DecodedValue;
use std::collections::HashSet;
use std::fmt;

/// One step from a parent node to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Structural address of a node, e.g. `items.0.name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExpandPath(Vec<PathSegment>);

impl ExpandPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for ExpandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Per-path collapse memory plus the line cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeState {
    collapsed: HashSet<ExpandPath>,
    pub cursor: usize,
}

impl TreeState {
    pub fn is_expanded(&self, path: &ExpandPath) -> bool {
        !self.collapsed.contains(path)
    }

    pub fn toggle(&mut self, path: &ExpandPath) {
        if !self.collapsed.remove(path) {
            self.collapsed.insert(path.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Object,
    Array,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Branch {
        kind: BranchKind,
        len: usize,
        expanded: bool,
    },
    Leaf {
        text: String,
        kind: ScalarKind,
    },
}

/// One rendered line of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLine {
    pub depth: usize,
    pub path: ExpandPath,
    /// `None` only for a scalar root
    pub label: Option<String>,
    pub node: TreeNode,
}

impl TreeLine {
    pub fn is_branch(&self) -> bool {
        matches!(self.node, TreeNode::Branch { .. })
    }
}

/// Render `value` as indented lines, honoring the collapse state.
///
/// The root's own entries sit at depth 0; a scalar root is a single unlabeled leaf.
pub fn render_tree(value: &DecodedValue, state: &TreeState) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    if value.is_composite() {
        push_children(value, &ExpandPath::root(), 0, state, &mut lines);
    } else {
        lines.push(TreeLine {
            depth: 0,
            path: ExpandPath::root(),
            label: None,
            node: leaf(value),
        });
    }
    lines
}

fn push_children(
    value: &DecodedValue,
    path: &ExpandPath,
    depth: usize,
    state: &TreeState,
    out: &mut Vec<TreeLine>,
) {
    match value {
        DecodedValue::Object(entries) => {
            for (key, child) in entries {
                let child_path = path.child(PathSegment::Key(key.clone()));
                push_entry(key.clone(), child, child_path, depth, state, out);
            }
        }
        DecodedValue::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let child_path = path.child(PathSegment::Index(idx));
                push_entry(idx.to_string(), child, child_path, depth, state, out);
            }
        }
        _ => {}
    }
}

fn push_entry(
    label: String,
    value: &DecodedValue,
    path: ExpandPath,
    depth: usize,
    state: &TreeState,
    out: &mut Vec<TreeLine>,
) {
    let node = match value {
        DecodedValue::Object(entries) => TreeNode::Branch {
            kind: BranchKind::Object,
            len: entries.len(),
            expanded: state.is_expanded(&path),
        },
        DecodedValue::Array(items) => TreeNode::Branch {
            kind: BranchKind::Array,
            len: items.len(),
            expanded: state.is_expanded(&path),
        },
        _ => leaf(value),
    };

    let descend = matches!(node, TreeNode::Branch { expanded: true, .. });
    out.push(TreeLine {
        depth,
        path: path.clone(),
        label: Some(label),
        node,
    });

    if descend {
        push_children(value, &path, depth + 1, state, out);
    }
}

fn leaf(value: &DecodedValue) -> TreeNode {
    TreeNode::Leaf {
        text: value.literal(),
        kind: scalar_kind(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::parse_json;

    fn labels(lines: &[TreeLine]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                let label = line.label.clone().unwrap_or_default();
                format!("{}{}", "  ".repeat(line.depth), label)
            })
            .collect()
    }

    #[test]
    fn test_key_order_is_not_alphabetized() {
        let value = parse_json(r#"{"b":1,"a":2}"#).unwrap();
        let lines = render_tree(&value, &TreeState::default());
        assert_eq!(labels(&lines), vec!["b", "a"]);
    }

    #[test]
    fn test_everything_starts_expanded() {
        let value = parse_json(r#"{"items":[{"name":"x"}],"ok":true}"#).unwrap();
        let lines = render_tree(&value, &TreeState::default());
        assert_eq!(labels(&lines), vec!["items", "  0", "    name", "ok"]);
        assert_eq!(lines[2].path.to_string(), "items.0.name");
    }

    #[test]
    fn test_leaves_carry_literal_and_kind() {
        let value = parse_json(r#"{"s":"hi","n":3,"b":false,"z":null}"#).unwrap();
        let lines = render_tree(&value, &TreeState::default());
        let leaves: Vec<(String, ScalarKind)> = lines
            .into_iter()
            .filter_map(|line| match line.node {
                TreeNode::Leaf { text, kind } => Some((text, kind)),
                _ => None,
            })
            .collect();
        assert_eq!(
            leaves,
            vec![
                ("\"hi\"".to_string(), ScalarKind::String),
                ("3".to_string(), ScalarKind::Number),
                ("false".to_string(), ScalarKind::Boolean),
                ("null".to_string(), ScalarKind::Null),
            ]
        );
    }

    #[test]
    fn test_collapse_keeps_descendant_state() {
        let value = parse_json(r#"{"a":{"b":{"c":1}}}"#).unwrap();
        let mut state = TreeState::default();

        let b = ExpandPath::root()
            .child(PathSegment::Key("a".into()))
            .child(PathSegment::Key("b".into()));
        let a = ExpandPath::root().child(PathSegment::Key("a".into()));

        state.toggle(&b);
        assert_eq!(labels(&render_tree(&value, &state)), vec!["a", "  b"]);

        state.toggle(&a);
        assert_eq!(labels(&render_tree(&value, &state)), vec!["a"]);

        // re-expanding the parent restores the child's collapsed state
        state.toggle(&a);
        assert_eq!(labels(&render_tree(&value, &state)), vec!["a", "  b"]);
        assert!(!state.is_expanded(&b));
        assert!(state.is_expanded(&a));
    }

    #[test]
    fn test_sibling_state_is_independent() {
        let value = parse_json(r#"{"x":[1],"y":[2]}"#).unwrap();
        let mut state = TreeState::default();
        state.toggle(&ExpandPath::root().child(PathSegment::Key("x".into())));

        let lines = render_tree(&value, &state);
        assert_eq!(labels(&lines), vec!["x", "y", "  0"]);
    }

    #[test]
    fn test_scalar_root_is_single_leaf() {
        let value = parse_json("\"just text\"").unwrap();
        let lines = render_tree(&value, &TreeState::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].label.is_none());
        assert!(!lines[0].is_branch());
    }

    #[test]
    fn test_dotted_keys_do_not_collide() {
        let dotted = ExpandPath::root().child(PathSegment::Key("a.b".into()));
        let nested = ExpandPath::root()
            .child(PathSegment::Key("a".into()))
            .child(PathSegment::Key("b".into()));
        assert_eq!(dotted.to_string(), nested.to_string());
        assert_ne!(dotted, nested);
    }
}
