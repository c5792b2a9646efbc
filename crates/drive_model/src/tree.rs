//! In-memory tree index over the flat node list returned by the backend.

use std::collections::{HashMap, HashSet};

use crate::node::{is_root_folder, Breadcrumb, FileNode};

#[derive(Debug, Clone, PartialEq)]
/// One visible row of the sidebar tree.
pub struct TreeRow {
    /// Node rendered by this row.
    pub node: FileNode,
    /// Nesting depth, `0` for root-level nodes.
    pub level: usize,
    /// Whether the node is a folder currently expanded.
    pub expanded: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Lookup structure built from a flat `parentId`-linked node list.
///
/// Soft-deleted nodes are dropped at construction. Server order is preserved for children.
pub struct NodeTree {
    nodes: Vec<FileNode>,
    by_id: HashMap<String, usize>,
}

impl NodeTree {
    /// Indexes `nodes`, skipping soft-deleted entries. Later duplicates of an id are ignored.
    pub fn new(nodes: Vec<FileNode>) -> Self {
        let mut kept = Vec::with_capacity(nodes.len());
        let mut by_id = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if node.is_deleted || by_id.contains_key(&node.id) {
                continue;
            }
            by_id.insert(node.id.clone(), kept.len());
            kept.push(node);
        }
        Self { nodes: kept, by_id }
    }

    /// Returns every indexed node in server order.
    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    /// Returns the number of indexed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no nodes are indexed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id.
    pub fn get(&self, id: &str) -> Option<&FileNode> {
        self.by_id.get(id).map(|idx| &self.nodes[*idx])
    }

    /// Returns `true` when `id` is indexed. The root sentinel always exists.
    pub fn contains_folder(&self, id: &str) -> bool {
        is_root_folder(id) || self.get(id).is_some_and(FileNode::is_folder)
    }

    /// Returns the direct children of `folder_id` (the root sentinel selects root-level nodes).
    pub fn children(&self, folder_id: &str) -> Vec<&FileNode> {
        self.nodes
            .iter()
            .filter(|node| node.is_child_of(folder_id))
            .collect()
    }

    /// Returns root-level nodes.
    pub fn root_nodes(&self) -> Vec<&FileNode> {
        self.nodes
            .iter()
            .filter(|node| node.parent_id.is_none())
            .collect()
    }

    /// Builds the breadcrumb trail from the top-level ancestor down to `folder_id`.
    ///
    /// Returns an empty trail for the root sentinel or unknown ids. A parent cycle stops the walk.
    pub fn breadcrumbs(&self, folder_id: &str) -> Vec<Breadcrumb> {
        let mut trail = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.get(folder_id);
        while let Some(node) = cursor {
            if !seen.insert(node.id.as_str()) {
                break;
            }
            trail.push(Breadcrumb {
                id: node.id.clone(),
                name: node.name.clone(),
            });
            cursor = node.parent_id.as_deref().and_then(|parent| self.get(parent));
        }
        trail.reverse();
        trail
    }

    /// Returns `true` when `candidate` is `ancestor` or sits anywhere below it.
    pub fn is_within(&self, candidate: &str, ancestor: &str) -> bool {
        if is_root_folder(ancestor) {
            return true;
        }
        self.breadcrumbs(candidate)
            .iter()
            .any(|crumb| crumb.id == ancestor)
    }

    /// Flattens the tree depth-first into the rows the sidebar shows.
    ///
    /// Children are emitted only below folders listed in `expanded`.
    pub fn visible_rows(&self, expanded: &[String]) -> Vec<TreeRow> {
        let expanded: HashSet<&str> = expanded.iter().map(String::as_str).collect();
        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        for node in self.root_nodes() {
            self.push_rows(node, 0, &expanded, &mut visited, &mut rows);
        }
        rows
    }

    fn push_rows<'a>(
        &'a self,
        node: &'a FileNode,
        level: usize,
        expanded: &HashSet<&str>,
        visited: &mut HashSet<&'a str>,
        rows: &mut Vec<TreeRow>,
    ) {
        if !visited.insert(node.id.as_str()) {
            return;
        }
        let is_expanded = node.is_folder() && expanded.contains(node.id.as_str());
        rows.push(TreeRow {
            node: node.clone(),
            level,
            expanded: is_expanded,
        });
        if !is_expanded {
            return;
        }
        for child in self.children(&node.id) {
            self.push_rows(child, level + 1, expanded, visited, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, ROOT_FOLDER_ID};

    fn node(id: &str, kind: NodeKind, parent: Option<&str>) -> FileNode {
        FileNode {
            id: id.to_string(),
            name: format!("{id}-name"),
            kind,
            parent_id: parent.map(str::to_string),
            content: None,
            url: None,
            size: None,
            mime_type: None,
            is_deleted: false,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn sample() -> NodeTree {
        NodeTree::new(vec![
            node("docs", NodeKind::Folder, None),
            node("readme", NodeKind::Text, None),
            node("work", NodeKind::Folder, Some("docs")),
            node("plan", NodeKind::Text, Some("work")),
            node("logo", NodeKind::Image, Some("docs")),
        ])
    }

    #[test]
    fn children_respect_root_sentinel() {
        let tree = sample();
        let root: Vec<_> = tree.children(ROOT_FOLDER_ID).iter().map(|n| n.id.clone()).collect();
        assert_eq!(root, vec!["docs", "readme"]);
        let docs: Vec<_> = tree.children("docs").iter().map(|n| n.id.clone()).collect();
        assert_eq!(docs, vec!["work", "logo"]);
        assert!(tree.children("plan").is_empty());
    }

    #[test]
    fn soft_deleted_nodes_are_hidden() {
        let mut gone = node("gone", NodeKind::Text, None);
        gone.is_deleted = true;
        let tree = NodeTree::new(vec![gone, node("kept", NodeKind::Text, None)]);
        assert_eq!(tree.len(), 1);
        assert!(tree.get("gone").is_none());
    }

    #[test]
    fn breadcrumbs_walk_from_top_to_folder() {
        let tree = sample();
        let trail: Vec<_> = tree.breadcrumbs("work").into_iter().map(|c| c.id).collect();
        assert_eq!(trail, vec!["docs", "work"]);
        assert!(tree.breadcrumbs(ROOT_FOLDER_ID).is_empty());
        assert!(tree.breadcrumbs("missing").is_empty());
    }

    #[test]
    fn breadcrumbs_stop_on_parent_cycle() {
        let tree = NodeTree::new(vec![
            node("a", NodeKind::Folder, Some("b")),
            node("b", NodeKind::Folder, Some("a")),
        ]);
        assert_eq!(tree.breadcrumbs("a").len(), 2);
    }

    #[test]
    fn visible_rows_follow_expanded_folders_only() {
        let tree = sample();
        let collapsed: Vec<_> = tree.visible_rows(&[]).into_iter().map(|r| r.node.id).collect();
        assert_eq!(collapsed, vec!["docs", "readme"]);

        let rows = tree.visible_rows(&["root".to_string(), "docs".to_string(), "work".to_string()]);
        let shape: Vec<_> = rows.iter().map(|r| (r.node.id.as_str(), r.level)).collect();
        assert_eq!(
            shape,
            vec![("docs", 0), ("work", 1), ("plan", 2), ("logo", 1), ("readme", 0)]
        );
        assert!(rows[0].expanded);
        assert!(!rows[4].expanded);
    }

    #[test]
    fn is_within_checks_ancestry() {
        let tree = sample();
        assert!(tree.is_within("plan", "docs"));
        assert!(tree.is_within("docs", "docs"));
        assert!(!tree.is_within("readme", "docs"));
        assert!(tree.is_within("readme", ROOT_FOLDER_ID));
        assert!(tree.contains_folder(ROOT_FOLDER_ID));
        assert!(!tree.contains_folder("plan"));
    }
}
