//! Reconstruction of a tree shape from the flat index
//!
//! Sorted entries are cut into runs sharing the same first segment. A run made
//! of a single entry with a one-segment path is a file; any other run becomes a
//! directory built from its entries with that first segment stripped.
//!
//! ```text
//! dir1/dir2/file3 ┐
//! dir1/file1      ├─ dir1 ─┬─ dir2 ── file3
//! dir1/file2      ┘        ├─ file1
//! file4           ── file4 └─ file2
//! ```
//!
//! A run in which one entry ends where others keep going (`dir1/file` next to
//! `dir1/file/sub`) has no valid tree shape and the whole reconstruction fails.

use crate::artifacts::core::path_string;
use crate::artifacts::index::index_entry::{IndexEntry, IndexItem};
use crate::artifacts::tree::{Children, PathTree, TreeNode};
use crate::errors::{Error, Result};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Tree shape of the index, one leaf per staged file
pub type IndexTree = PathTree<IndexEntry, String>;

struct Pending<'a> {
    rest: &'a [String],
    item: &'a IndexItem,
}

/// Build the tree described by `items`, which must be sorted by path
pub fn create_index_tree(items: &[IndexItem]) -> Result<IndexTree> {
    if items.iter().any(|item| item.key.is_empty()) {
        return Err(Error::InvalidIndexTree(String::from(
            "index entry with an empty path",
        )));
    }

    let pending = items
        .iter()
        .map(|item| Pending {
            rest: &item.key,
            item,
        })
        .collect::<Vec<_>>();

    Ok(PathTree::from_children(build_children(&pending)?))
}

fn build_children(pending: &[Pending<'_>]) -> Result<Children<IndexEntry, String>> {
    let mut children = BTreeMap::new();

    for run in pending.chunk_by(|a, b| a.rest.first() == b.rest.first()) {
        let first = &run[0];
        let Some(name) = first.rest.first() else {
            return Err(Error::InvalidIndexTree(format!(
                "'{}' is both a file and a directory",
                path_string(&first.item.key)
            )));
        };

        let node = if run.len() == 1 && first.rest.len() == 1 {
            TreeNode::Leaf(first.item.value.clone())
        } else if let Some(terminal) = run.iter().find(|pending| pending.rest.len() == 1) {
            return Err(Error::InvalidIndexTree(format!(
                "'{}' is both a file and a directory",
                path_string(&terminal.item.key)
            )));
        } else {
            let stripped = run
                .iter()
                .map(|pending| Pending {
                    rest: &pending.rest[1..],
                    item: pending.item,
                })
                .collect::<Vec<_>>();
            TreeNode::Internal(Arc::new(build_children(&stripped)?))
        };

        match children.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
            // only reachable when the input is not sorted
            Entry::Occupied(_) => {
                return Err(Error::InvalidIndexTree(format!(
                    "'{}' is listed out of order",
                    path_string(&first.item.key)
                )));
            }
        }
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::parse_path;
    use crate::artifacts::index::index_entry::compare_paths;
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::artifacts::sorted_array::SortedArrayItem;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn item(path: &str) -> IndexItem {
        SortedArrayItem::new(
            parse_path(path),
            IndexEntry::new(ObjectId::digest(path.as_bytes())),
        )
    }

    fn items(paths: &[&str]) -> Vec<IndexItem> {
        let mut items = paths.iter().map(|path| item(path)).collect::<Vec<_>>();
        items.sort_by(|a, b| compare_paths(&a.key, &b.key));
        items
    }

    #[test]
    fn builds_nested_directories() {
        let tree =
            create_index_tree(&items(&["dir1/file1", "dir1/file2", "dir1/dir2/file3", "file4"]))
                .unwrap();

        assert_eq!(
            tree.get_leaf(&parse_path("dir1/dir2/file3")),
            Some(item("dir1/dir2/file3").value)
        );
        assert!(matches!(
            tree.get(&parse_path("dir1/dir2")),
            Some(TreeNode::Internal(_))
        ));
        assert_eq!(tree.root().len(), 2);
    }

    #[test]
    fn empty_index_is_an_empty_tree() {
        assert!(create_index_tree(&[]).unwrap().is_empty());
    }

    #[rstest]
    #[case(&["dir1/file1", "dir1/file1/f"])]
    #[case(&["a", "a/b/c"])]
    #[case(&["x/y", "x/y/z", "x/w"])]
    fn rejects_files_that_are_also_directories(#[case] paths: &[&str]) {
        assert!(matches!(
            create_index_tree(&items(paths)),
            Err(Error::InvalidIndexTree(_))
        ));
    }

    #[test]
    fn rejects_empty_and_unsorted_paths() {
        assert!(create_index_tree(&[item("")]).is_err());
        assert!(create_index_tree(&[item("a/b"), item("c"), item("a/d")]).is_err());
    }

    fn segment() -> impl Strategy<Value = String> {
        prop_oneof![Just("a"), Just("b"), Just("c"), Just("a.b")].prop_map(String::from)
    }

    proptest! {
        #[test]
        fn flattening_the_tree_gives_the_index_back(
            paths in proptest::collection::btree_set(
                proptest::collection::vec(segment(), 1..4),
                0..16,
            )
        ) {
            // keep the shortest paths and drop every path extending a kept one
            let mut kept: Vec<Vec<String>> = Vec::new();
            for path in paths {
                if !kept.iter().any(|other| path.starts_with(other) || other.starts_with(&path)) {
                    kept.push(path);
                }
            }
            kept.sort();

            let items = kept
                .iter()
                .map(|path| SortedArrayItem::new(
                    path.clone(),
                    IndexEntry::new(ObjectId::digest(path.join("/").as_bytes())),
                ))
                .collect::<Vec<_>>();

            let tree = create_index_tree(&items).unwrap();
            let flattened = tree
                .to_leaf_array(|a, b| a.cmp(b), &[])
                .into_iter()
                .map(|leaf| SortedArrayItem::new(leaf.path, leaf.value))
                .collect::<Vec<_>>();

            prop_assert_eq!(flattened, items);
        }
    }
}
