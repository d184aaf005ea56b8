//! Persistent path-keyed tree
//!
//! `PathTree<L, N>` is the one tree shape shared by the working file system
//! (`FileBlob` leaves), the ref namespace (`ObjectId` leaves) and the intermediate
//! tree rebuilt from a flat index. Nodes are either a leaf value or an ordered map
//! of named children.
//!
//! ## Persistence
//!
//! Every operation takes `&self` and returns a new tree. Internal nodes are held
//! behind `Arc`, so an edit only copies the maps along the edited path
//! (`Arc::make_mut` path copying) and every untouched subtree stays shared between
//! the old and the new tree.

use crate::artifacts::core::is_prefix;
use crate::errors::{Error, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

/// Named children of an internal node, ordered by name
pub type Children<L, N> = BTreeMap<N, TreeNode<L, N>>;

/// A node of a [`PathTree`]
///
/// The variant of a node never changes once it is created; callers tell leaves and
/// directories apart by matching, never by inspecting the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode<L, N> {
    Leaf(L),
    Internal(Arc<Children<L, N>>),
}

impl<L, N> TreeNode<L, N> {
    /// An internal node without children
    pub fn empty_dir() -> Self {
        TreeNode::Internal(Arc::new(BTreeMap::new()))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Internal(_) => None,
        }
    }

    pub fn children(&self) -> Option<&Children<L, N>> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Internal(children) => Some(children),
        }
    }
}

/// A leaf of a flattened tree along with its full path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafItem<L, N> {
    pub path: Vec<N>,
    pub value: L,
}

/// Immutable ordered tree keyed by path segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTree<L, N> {
    root: Arc<Children<L, N>>,
}

impl<L, N> Default for PathTree<L, N> {
    fn default() -> Self {
        PathTree {
            root: Arc::new(BTreeMap::new()),
        }
    }
}

pub(crate) fn render_path<N: Display>(path: &[N]) -> String {
    path.iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl<L, N> PathTree<L, N>
where
    L: Clone,
    N: Ord + Clone + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already built set of children as the root of a tree
    pub fn from_children(children: Children<L, N>) -> Self {
        PathTree {
            root: Arc::new(children),
        }
    }

    /// Children of the root node
    pub fn root(&self) -> &Children<L, N> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Get the node at `path`
    ///
    /// The empty path returns the root. Returns `None` if a segment is missing
    /// or if the path would descend into a leaf.
    pub fn get(&self, path: &[N]) -> Option<TreeNode<L, N>> {
        let Some((name, parent_path)) = path.split_last() else {
            return Some(TreeNode::Internal(self.root.clone()));
        };

        let mut children = &*self.root;
        for segment in parent_path {
            match children.get(segment)? {
                TreeNode::Internal(sub) => children = &**sub,
                TreeNode::Leaf(_) => return None,
            }
        }

        children.get(name).cloned()
    }

    /// Get the leaf value at `path`, if the path leads to a leaf
    pub fn get_leaf(&self, path: &[N]) -> Option<L> {
        match self.get(path)? {
            TreeNode::Leaf(leaf) => Some(leaf),
            TreeNode::Internal(_) => None,
        }
    }

    /// The directory at `path` as a tree of its own, sharing its nodes with `self`
    pub fn subtree(&self, path: &[N]) -> Option<Self> {
        match self.get(path)? {
            TreeNode::Internal(children) => Some(PathTree { root: children }),
            TreeNode::Leaf(_) => None,
        }
    }

    /// Insert `node` at `path`
    ///
    /// The parent of `path` must already exist as an internal node and nothing
    /// may exist at `path` itself. Intermediate directories are never created.
    pub fn insert(&self, path: &[N], node: TreeNode<L, N>) -> Result<Self> {
        self.edit_parent(path, |parent, name| {
            if parent.contains_key(name) {
                return Err(Error::AlreadyExists(render_path(path)));
            }
            parent.insert(name.clone(), node);
            Ok(())
        })
    }

    /// Remove the node (leaf or whole subtree) at `path`
    pub fn remove(&self, path: &[N]) -> Result<Self> {
        self.edit_parent(path, |parent, name| {
            parent
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| Error::PathNotFound(render_path(path)))
        })
    }

    /// Replace the node at `path` with `node`
    pub fn update(&self, path: &[N], node: TreeNode<L, N>) -> Result<Self> {
        self.edit_parent(path, |parent, name| match parent.get_mut(name) {
            Some(existing) => {
                *existing = node;
                Ok(())
            }
            None => Err(Error::PathNotFound(render_path(path))),
        })
    }

    /// Replace the value of the existing leaf at `path`
    pub fn update_leaf(&self, path: &[N], value: L) -> Result<Self> {
        self.edit_parent(path, |parent, name| match parent.get_mut(name) {
            Some(TreeNode::Leaf(leaf)) => {
                *leaf = value;
                Ok(())
            }
            Some(TreeNode::Internal(_)) => Err(Error::NotAFile(render_path(path))),
            None => Err(Error::PathNotFound(render_path(path))),
        })
    }

    /// Move (or copy, with `preserve_src`) the node at `src` to `dest`
    ///
    /// Any node already at `dest` is replaced. The parent of `dest` must be an
    /// existing directory, and a directory cannot be moved into itself.
    pub fn move_node(&self, src: &[N], dest: &[N], preserve_src: bool) -> Result<Self> {
        if src.is_empty() || dest.is_empty() {
            return Err(Error::InvalidPath(String::from(
                "cannot move the root directory",
            )));
        }
        let node = self
            .get(src)
            .ok_or_else(|| Error::PathNotFound(render_path(src)))?;
        if src == dest {
            return Ok(self.clone());
        }
        if is_prefix(dest, src) {
            return Err(Error::InvalidArgument(format!(
                "cannot move '{}' into itself",
                render_path(src)
            )));
        }

        let moved = self.edit_parent(dest, |parent, name| {
            parent.insert(name.clone(), node);
            Ok(())
        })?;

        if preserve_src {
            Ok(moved)
        } else {
            moved.remove(src)
        }
    }

    /// List the children of the internal node at `path`
    pub fn children(&self, path: &[N]) -> Result<Vec<(N, TreeNode<L, N>)>> {
        match self.get(path) {
            Some(TreeNode::Internal(children)) => Ok(children
                .iter()
                .map(|(name, node)| (name.clone(), node.clone()))
                .collect()),
            Some(TreeNode::Leaf(_)) => Err(Error::NotADirectory(render_path(path))),
            None => Err(Error::PathNotFound(render_path(path))),
        }
    }

    /// Map every leaf through `convert`, keeping the shape of the tree
    pub fn convert<L2, F>(&self, convert: F) -> PathTree<L2, N>
    where
        L2: Clone,
        F: Fn(&L) -> L2,
    {
        PathTree::from_children(convert_children(&self.root, &convert))
    }

    /// Flatten the tree into its leaves in pre-order
    ///
    /// Children at each level are visited in `compare_names` order and every
    /// returned path is prefixed with `base_path`.
    pub fn to_leaf_array<F>(&self, compare_names: F, base_path: &[N]) -> Vec<LeafItem<L, N>>
    where
        F: Fn(&N, &N) -> Ordering,
    {
        let mut leaves = Vec::new();
        collect_leaves(&self.root, &compare_names, base_path.to_vec(), &mut leaves);
        leaves
    }

    fn edit_parent<F>(&self, path: &[N], edit: F) -> Result<Self>
    where
        F: FnOnce(&mut Children<L, N>, &N) -> Result<()>,
    {
        let (name, parent_path) = path
            .split_last()
            .ok_or_else(|| Error::InvalidPath(String::from("the root cannot be edited")))?;

        let mut root = self.root.clone();
        let parent = descend_mut(&mut root, parent_path)?;
        edit(parent, name)?;

        Ok(PathTree { root })
    }
}

/// Walk down `parent_path`, copying every shared map on the way
fn descend_mut<'a, L, N>(
    mut children: &'a mut Arc<Children<L, N>>,
    parent_path: &[N],
) -> Result<&'a mut Children<L, N>>
where
    L: Clone,
    N: Ord + Clone + Display,
{
    for (depth, segment) in parent_path.iter().enumerate() {
        let current = children;
        let map = Arc::make_mut(current);
        match map.get_mut(segment) {
            Some(TreeNode::Internal(sub)) => children = sub,
            Some(TreeNode::Leaf(_)) => {
                return Err(Error::NotADirectory(render_path(&parent_path[..=depth])));
            }
            None => return Err(Error::PathNotFound(render_path(&parent_path[..=depth]))),
        }
    }

    Ok(Arc::make_mut(children))
}

fn convert_children<L, L2, N, F>(children: &Children<L, N>, convert: &F) -> Children<L2, N>
where
    N: Ord + Clone,
    F: Fn(&L) -> L2,
{
    children
        .iter()
        .map(|(name, node)| {
            let converted = match node {
                TreeNode::Leaf(leaf) => TreeNode::Leaf(convert(leaf)),
                TreeNode::Internal(sub) => {
                    TreeNode::Internal(Arc::new(convert_children(sub, convert)))
                }
            };
            (name.clone(), converted)
        })
        .collect()
}

fn collect_leaves<L, N, F>(
    children: &Children<L, N>,
    compare_names: &F,
    base_path: Vec<N>,
    leaves: &mut Vec<LeafItem<L, N>>,
) where
    L: Clone,
    N: Clone,
    F: Fn(&N, &N) -> Ordering,
{
    let mut sorted = children.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| compare_names(a.0, b.0));

    for (name, node) in sorted {
        let mut path = base_path.clone();
        path.push(name.clone());

        match node {
            TreeNode::Leaf(value) => leaves.push(LeafItem {
                path,
                value: value.clone(),
            }),
            TreeNode::Internal(sub) => collect_leaves(sub, compare_names, path, leaves),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::parse_path;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    type TestTree = PathTree<u32, String>;

    fn leaf(value: u32) -> TreeNode<u32, String> {
        TreeNode::Leaf(value)
    }

    #[fixture]
    fn sample_tree() -> TestTree {
        // dir1/file1, dir1/file2, dir1/dir2/file3, file4
        TestTree::new()
            .insert(&parse_path("dir1"), TreeNode::empty_dir())
            .and_then(|t| t.insert(&parse_path("dir1/dir2"), TreeNode::empty_dir()))
            .and_then(|t| t.insert(&parse_path("dir1/file1"), leaf(1)))
            .and_then(|t| t.insert(&parse_path("dir1/file2"), leaf(2)))
            .and_then(|t| t.insert(&parse_path("dir1/dir2/file3"), leaf(3)))
            .and_then(|t| t.insert(&parse_path("file4"), leaf(4)))
            .unwrap()
    }

    #[rstest]
    fn get_traverses_segments(sample_tree: TestTree) {
        assert_eq!(sample_tree.get_leaf(&parse_path("dir1/dir2/file3")), Some(3));
        assert_eq!(sample_tree.get_leaf(&parse_path("file4")), Some(4));
        assert!(matches!(sample_tree.get(&[]), Some(TreeNode::Internal(_))));
        assert!(matches!(
            sample_tree.get(&parse_path("dir1/dir2")),
            Some(TreeNode::Internal(_))
        ));
        assert_eq!(sample_tree.get(&parse_path("dir1/nope")), None);
        // descending into a leaf is not a valid path
        assert_eq!(sample_tree.get(&parse_path("file4/deeper")), None);
    }

    #[rstest]
    fn subtree_shares_nodes(sample_tree: TestTree) {
        let subtree = sample_tree.subtree(&parse_path("dir1")).unwrap();
        assert_eq!(subtree.get_leaf(&parse_path("dir2/file3")), Some(3));
        assert_eq!(sample_tree.subtree(&[]).unwrap(), sample_tree);
        assert_eq!(sample_tree.subtree(&parse_path("file4")), None);
    }

    #[rstest]
    fn insert_does_not_create_intermediate_directories(sample_tree: TestTree) {
        let result = sample_tree.insert(&parse_path("dir3/file5"), leaf(5));
        assert_eq!(result, Err(Error::PathNotFound(String::from("dir3"))));

        let result = sample_tree.insert(&parse_path("file4/file5"), leaf(5));
        assert_eq!(result, Err(Error::NotADirectory(String::from("file4"))));
    }

    #[rstest]
    fn insert_rejects_occupied_and_root_paths(sample_tree: TestTree) {
        assert_eq!(
            sample_tree.insert(&parse_path("dir1/file1"), leaf(9)),
            Err(Error::AlreadyExists(String::from("dir1/file1")))
        );
        assert!(matches!(
            sample_tree.insert(&[], leaf(9)),
            Err(Error::InvalidPath(_))
        ));
    }

    #[rstest]
    fn edits_leave_the_original_untouched(sample_tree: TestTree) {
        let inserted = sample_tree
            .insert(&parse_path("dir1/dir2/file5"), leaf(5))
            .unwrap();
        let removed = sample_tree.remove(&parse_path("dir1")).unwrap();

        assert_eq!(inserted.get_leaf(&parse_path("dir1/dir2/file5")), Some(5));
        assert_eq!(sample_tree.get(&parse_path("dir1/dir2/file5")), None);
        assert_eq!(removed.get(&parse_path("dir1")), None);
        assert_eq!(sample_tree.get_leaf(&parse_path("dir1/file1")), Some(1));
    }

    #[rstest]
    fn untouched_subtrees_are_shared(sample_tree: TestTree) {
        let edited = sample_tree.update_leaf(&parse_path("file4"), 40).unwrap();

        let (Some(TreeNode::Internal(before)), Some(TreeNode::Internal(after))) = (
            sample_tree.get(&parse_path("dir1")),
            edited.get(&parse_path("dir1")),
        ) else {
            panic!("dir1 should be a directory in both trees");
        };
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[rstest]
    fn remove_fails_on_root_and_missing_paths(sample_tree: TestTree) {
        assert!(matches!(sample_tree.remove(&[]), Err(Error::InvalidPath(_))));
        assert_eq!(
            sample_tree.remove(&parse_path("dir1/file9")),
            Err(Error::PathNotFound(String::from("dir1/file9")))
        );
    }

    #[rstest]
    fn update_replaces_existing_nodes_only(sample_tree: TestTree) {
        let updated = sample_tree
            .update(&parse_path("dir1/dir2"), leaf(7))
            .unwrap();
        assert_eq!(updated.get_leaf(&parse_path("dir1/dir2")), Some(7));

        assert!(sample_tree.update(&parse_path("dir9"), leaf(7)).is_err());
        assert!(sample_tree.update(&[], leaf(7)).is_err());
        assert_eq!(
            sample_tree.update_leaf(&parse_path("dir1"), 7),
            Err(Error::NotAFile(String::from("dir1")))
        );
    }

    #[rstest]
    fn move_and_copy_nodes(sample_tree: TestTree) {
        let moved = sample_tree
            .move_node(&parse_path("dir1/dir2"), &parse_path("dir2"), false)
            .unwrap();
        assert_eq!(moved.get_leaf(&parse_path("dir2/file3")), Some(3));
        assert_eq!(moved.get(&parse_path("dir1/dir2")), None);

        let copied = sample_tree
            .move_node(&parse_path("file4"), &parse_path("dir1/file1"), true)
            .unwrap();
        assert_eq!(copied.get_leaf(&parse_path("dir1/file1")), Some(4));
        assert_eq!(copied.get_leaf(&parse_path("file4")), Some(4));

        assert!(sample_tree
            .move_node(&parse_path("dir1"), &parse_path("dir1/dir2/dir1"), false)
            .is_err());
        assert_eq!(
            sample_tree
                .move_node(&parse_path("file4"), &parse_path("file4"), false)
                .unwrap(),
            sample_tree
        );
    }

    #[rstest]
    fn children_lists_internal_nodes_only(sample_tree: TestTree) {
        let names = sample_tree
            .children(&parse_path("dir1"))
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["dir2", "file1", "file2"]);

        assert!(sample_tree.children(&parse_path("file4")).is_err());
        assert!(sample_tree.children(&parse_path("nope")).is_err());
    }

    #[rstest]
    fn convert_preserves_shape(sample_tree: TestTree) {
        let converted = sample_tree.convert(|value| format!("v{value}"));
        assert_eq!(
            converted.get_leaf(&parse_path("dir1/dir2/file3")),
            Some(String::from("v3"))
        );
        assert!(matches!(
            converted.get(&parse_path("dir1/dir2")),
            Some(TreeNode::Internal(_))
        ));
    }

    #[rstest]
    fn leaf_array_is_preorder_and_sorted(sample_tree: TestTree) {
        let leaves = sample_tree.to_leaf_array(|a, b| a.cmp(b), &parse_path("base"));
        let flattened = leaves
            .into_iter()
            .map(|item| (item.path.join("/"), item.value))
            .collect::<Vec<_>>();

        assert_eq!(
            flattened,
            vec![
                (String::from("base/dir1/dir2/file3"), 3),
                (String::from("base/dir1/file1"), 1),
                (String::from("base/dir1/file2"), 2),
                (String::from("base/file4"), 4),
            ]
        );
    }

    #[rstest]
    fn leaf_array_honours_the_name_order(sample_tree: TestTree) {
        let leaves = sample_tree.to_leaf_array(|a, b| b.cmp(a), &[]);
        let values = leaves.into_iter().map(|item| item.value).collect::<Vec<_>>();
        assert_eq!(values, vec![4, 2, 1, 3]);
    }
}
