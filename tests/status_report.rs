mod common;

use common::{args, committed_project, nested_project, next, random_file_name};
use gitsim::Sandbox;
use gitsim::artifacts::core::path_string;
use gitsim::artifacts::diff::tree_diff::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn short_status(sandbox: &Sandbox) -> Vec<String> {
    sandbox.status().unwrap().short_lines()
}

#[rstest]
fn nothing_to_report_after_a_commit(committed_project: Sandbox) {
    let status = committed_project.status().unwrap();

    assert!(status.is_clean());
    assert_eq!(status.branch, Some(String::from("main")));
    assert!(status.long_format().contains("nothing to commit, working tree clean"));
}

#[rstest]
fn before_the_first_commit_everything_staged_is_added(nested_project: Sandbox) {
    let sandbox = next(nested_project.add(&args(&["dir1"])));

    assert_eq!(
        short_status(&sandbox),
        vec![
            "A  dir1/dir2/file3",
            "A  dir1/file1",
            "A  dir1/file2",
            "?? file4",
        ]
    );
}

#[rstest]
fn edits_show_up_unstaged_then_staged(committed_project: Sandbox) {
    let edited = next(committed_project.edit(&args(&["dir1/file1"])));
    assert_eq!(short_status(&edited), vec![" M dir1/file1"]);

    let staged = next(edited.add(&args(&["dir1/file1"])));
    let status = staged.status().unwrap();
    assert_eq!(status.staged.len(), 1);
    assert_eq!(status.staged[0].kind, ChangeKind::Modified);
    assert_eq!(path_string(&status.staged[0].path), "dir1/file1");
    assert!(status.unstaged.is_empty());
}

#[rstest]
fn deleted_directories_list_every_file(committed_project: Sandbox) {
    let sandbox = next(committed_project.rm(&args(&["dir1"]), true));
    assert_eq!(
        short_status(&sandbox),
        vec![" D dir1/dir2/file3", " D dir1/file1", " D dir1/file2"]
    );

    let sandbox = next(sandbox.add(&args(&["dir1"])));
    assert_eq!(
        short_status(&sandbox),
        vec!["D  dir1/dir2/file3", "D  dir1/file1", "D  dir1/file2"]
    );
}

#[rstest]
fn untracked_directories_are_listed_once(committed_project: Sandbox) {
    let name = random_file_name();
    let sandbox = next(committed_project.mkdir(&args(&["dir3", "dir3/dir4", "empty"])));
    let sandbox = next(sandbox.create(&[format!("dir3/dir4/{name}"), String::from("dir1/file9")]));

    assert_eq!(short_status(&sandbox), vec!["?? dir1/file9", "?? dir3/"]);
}

#[rstest]
fn status_after_a_detached_checkout_has_no_branch(committed_project: Sandbox) {
    let commit_id = common::head_commit(&committed_project);
    let sandbox = next(committed_project.checkout(commit_id.as_ref()));

    let status = sandbox.status().unwrap();
    assert_eq!(status.branch, None);
    assert!(status.long_format().starts_with("HEAD detached"));
}
