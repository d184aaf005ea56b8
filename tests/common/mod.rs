#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use fake::Fake;
use fake::faker::lorem::en::Word;
use gitsim::artifacts::core::{parse_path, path_string};
use gitsim::artifacts::objects::object_id::ObjectId;
use gitsim::{CommitOptions, Sandbox, SandboxConfig, Transition};
use rstest::fixture;

pub fn args(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| path.to_string()).collect()
}

/// Unwrap a transition into its sandbox
pub fn next(result: gitsim::Result<Transition>) -> Sandbox {
    match result {
        Ok(transition) => transition.sandbox,
        Err(err) => panic!("command failed: {err}"),
    }
}

pub fn random_file_name() -> String {
    format!("{}.txt", Word().fake::<String>())
}

#[fixture]
pub fn sandbox() -> Sandbox {
    colored::control::set_override(false);

    let config = SandboxConfig {
        commit_date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
        ..SandboxConfig::default()
    };
    Sandbox::new(config)
}

/// `dir1/file1`, `dir1/file2`, `dir1/dir2/file3` and `file4`, nothing staged
#[fixture]
pub fn nested_project(sandbox: Sandbox) -> Sandbox {
    let sandbox = next(sandbox.mkdir(&args(&["dir1", "dir1/dir2"])));
    next(sandbox.create(&args(&["dir1/file1", "dir1/file2", "dir1/dir2/file3", "file4"])))
}

/// The nested project with everything committed as "a"
#[fixture]
pub fn committed_project(nested_project: Sandbox) -> Sandbox {
    let sandbox = next(nested_project.add(&args(&["."])));
    commit(&sandbox, "a")
}

pub fn commit(sandbox: &Sandbox, message: &str) -> Sandbox {
    next(sandbox.commit(&CommitOptions::new(message.to_string())))
}

pub fn head_commit(sandbox: &Sandbox) -> ObjectId {
    let repository = sandbox.repository();
    match repository.head().resolve(repository.refs()) {
        Ok(Some(oid)) => oid,
        other => panic!("HEAD does not name a commit: {other:?}"),
    }
}

pub fn index_paths(sandbox: &Sandbox) -> Vec<String> {
    sandbox
        .repository()
        .index()
        .entries()
        .map(|item| path_string(&item.key))
        .collect()
}

pub fn workspace_files(sandbox: &Sandbox) -> Vec<String> {
    sandbox
        .workspace()
        .tree()
        .to_leaf_array(|a, b| a.cmp(b), &[])
        .into_iter()
        .map(|leaf| path_string(&leaf.path))
        .collect()
}

pub fn exists(sandbox: &Sandbox, path: &str) -> bool {
    sandbox.workspace().get(&parse_path(path)).is_some()
}
