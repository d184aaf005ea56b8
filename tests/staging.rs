mod common;

use common::{args, index_paths, nested_project, next};
use gitsim::areas::index::Index;
use gitsim::artifacts::core::parse_path;
use gitsim::artifacts::index::index_entry::IndexEntry;
use gitsim::artifacts::objects::object_id::ObjectId;
use gitsim::artifacts::sorted_array::SortedArrayItem;
use gitsim::{Error, Sandbox};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn re_adding_a_deleted_file_unstages_only_that_file(nested_project: Sandbox) {
    let sandbox = next(nested_project.create(&args(&["f3"])));
    let sandbox = next(sandbox.add(&args(&["dir1", "file4"])));
    assert_eq!(
        index_paths(&sandbox),
        vec!["dir1/dir2/file3", "dir1/file1", "dir1/file2", "file4"]
    );

    let sandbox = next(sandbox.rm(&args(&["dir1/file1"]), false));
    let sandbox = next(sandbox.add(&args(&["dir1/file1"])));

    assert_eq!(
        index_paths(&sandbox),
        vec!["dir1/dir2/file3", "dir1/file2", "file4"]
    );
}

#[rstest]
fn adding_the_root_stages_every_file(nested_project: Sandbox) {
    let sandbox = next(nested_project.add(&args(&["."])));
    assert_eq!(index_paths(&sandbox).len(), 4);
    assert_eq!(sandbox.repository().database().len(), 4);
}

#[rstest]
fn unknown_paths_reject_the_whole_command(nested_project: Sandbox) {
    let result = nested_project.add(&args(&["dir1", "missing"]));

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "pathspec 'missing' did not match any files");
    assert!(!err.is_fatal());
    assert!(nested_project.repository().index().is_empty());
    assert!(nested_project.repository().database().is_empty());
}

#[rstest]
fn add_needs_at_least_one_path(nested_project: Sandbox) {
    assert_eq!(
        nested_project.add(&[]).unwrap_err().to_string(),
        "missing path operand"
    );
}

#[rstest]
fn edited_files_get_a_new_blob(nested_project: Sandbox) {
    let staged = next(nested_project.add(&args(&["file4"])));
    let before = staged
        .repository()
        .index()
        .get(&parse_path("file4"))
        .unwrap()
        .cloned();

    let edited = next(staged.edit(&args(&["file4"])));
    let restaged = next(edited.add(&args(&["file4"])));
    let after = restaged
        .repository()
        .index()
        .get(&parse_path("file4"))
        .unwrap()
        .cloned();

    assert_ne!(before, after);
    assert_eq!(restaged.repository().database().len(), 2);
}

#[rstest]
fn a_directory_replacing_a_file_takes_over_its_section(nested_project: Sandbox) {
    let sandbox = next(nested_project.add(&args(&["file4"])));
    let sandbox = next(sandbox.rm(&args(&["file4"]), false));
    let sandbox = next(sandbox.mkdir(&args(&["file4"])));
    let sandbox = next(sandbox.create(&args(&["file4/inner"])));

    let sandbox = next(sandbox.add(&args(&["file4"])));
    assert_eq!(index_paths(&sandbox), vec!["file4/inner"]);
}

#[test]
fn out_of_order_section_overwrite_leaves_the_index_alone() {
    let item = |path: &str, name: &str| {
        SortedArrayItem::new(parse_path(path), IndexEntry::new(ObjectId::digest(name.as_bytes())))
    };
    let index = Index::from_items(vec![item("a", "a"), item("c/x", "x"), item("d", "d")]).unwrap();
    let sub_index = Index::from_items(vec![item("e", "e")]).unwrap();

    let result = index.overwrite_section(&parse_path("c"), &sub_index);

    assert!(matches!(result, Err(Error::SectionMismatch(_))));
    assert_eq!(index.len(), 3);
    assert!(index.get(&parse_path("c/x")).unwrap().is_some());
}
