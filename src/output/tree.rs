//! Box-drawing rendering of a populated group hierarchy

use std::fmt::Write;

use crate::client::{Group, Project};

const BRANCH: &str = "├";
const CORNER: &str = "└";
const VERTICAL: &str = "│";
const HORIZONTAL: &str = "─";

/// A node in a rendered hierarchy.
#[derive(Debug, Clone, Copy)]
pub enum TreeNode<'a> {
    Group(&'a Group),
    Project(&'a Project),
}

impl<'a> TreeNode<'a> {
    pub fn label(&self) -> &'a str {
        match self {
            TreeNode::Group(g) => &g.name,
            TreeNode::Project(p) => &p.name,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            TreeNode::Group(g) => g.id,
            TreeNode::Project(p) => p.id,
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            TreeNode::Group(_) => "[G]",
            TreeNode::Project(_) => "[P]",
        }
    }

    /// Subgroups first, then projects. Projects have no children.
    pub fn children(&self) -> Vec<TreeNode<'a>> {
        match self {
            TreeNode::Group(g) => g
                .subgroups
                .iter()
                .map(TreeNode::Group)
                .chain(g.projects.iter().map(TreeNode::Project))
                .collect(),
            TreeNode::Project(_) => Vec::new(),
        }
    }
}

/// Render `root` as a header line followed by its tree.
///
/// ```text
///
/// platform (ID: 1)
/// ├─  infra [G] [ID=2]
/// │   └─  terraform [P] [ID=20]
/// └─  portal [P] [ID=10]
/// ```
pub fn format_hierarchy(root: &Group) -> String {
    let mut out = format!("\n{} (ID: {})\n", root.full_path, root.id);
    write_children(&mut out, TreeNode::Group(root), "");
    out
}

fn write_children(out: &mut String, node: TreeNode<'_>, prefix: &str) {
    let children = node.children();
    let last = children.len().saturating_sub(1);

    for (i, child) in children.into_iter().enumerate() {
        let is_last = i == last;
        let connector = if is_last { CORNER } else { BRANCH };
        let _ = writeln!(
            out,
            "{}{}{}  {} {} [ID={}]",
            prefix,
            connector,
            HORIZONTAL,
            child.label(),
            child.marker(),
            child.id()
        );

        if let TreeNode::Group(_) = child {
            let extension = if is_last {
                "    ".to_string()
            } else {
                format!("{}   ", VERTICAL)
            };
            write_children(out, child, &format!("{}{}", prefix, extension));
        }
    }
}
