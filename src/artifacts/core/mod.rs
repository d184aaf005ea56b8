//! Core utilities and shared types
//!
//! Paths in the simulator are sequences of segment names, never OS paths.
//! The helpers here convert between the slash-separated form users type and
//! the segment form every area works with.

/// A path inside the working file system, the index or the ref namespace
pub type FilePath = Vec<String>;

/// Parse a slash-separated path into its segments
///
/// Surrounding whitespace is ignored and an empty string maps to the root path.
/// Empty segments (as in `a//b` or a trailing `/`) and `.` segments are dropped,
/// so `.` names the root as well.
pub fn parse_path(path: &str) -> FilePath {
    path.trim()
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .map(String::from)
        .collect()
}

/// Render a segment path in its slash-separated form
pub fn path_string<N: AsRef<str>>(path: &[N]) -> String {
    path.iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check whether `prefix` is a prefix of `full_path`, including the case where both are equal
pub fn is_prefix<N: PartialEq>(full_path: &[N], prefix: &[N]) -> bool {
    full_path.len() >= prefix.len() && full_path[..prefix.len()] == *prefix
}

/// Split a path into its parent path and final segment
///
/// Returns `None` for the root path.
pub fn split_last<N>(path: &[N]) -> Option<(&[N], &N)> {
    path.split_last().map(|(last, parent)| (parent, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("  ", vec![])]
    #[case("file4", vec!["file4"])]
    #[case("dir1/dir2/file3", vec!["dir1", "dir2", "file3"])]
    #[case(" dir1/file1/ ", vec!["dir1", "file1"])]
    #[case(".", vec![])]
    #[case("./dir1/./file1", vec!["dir1", "file1"])]
    fn parses_slash_separated_paths(#[case] raw: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_path(raw), expected);
    }

    #[test]
    fn renders_paths_back() {
        assert_eq!(path_string(&parse_path("dir1/dir2/file3")), "dir1/dir2/file3");
        assert_eq!(path_string::<String>(&[]), "");
    }

    #[test]
    fn detects_prefixes() {
        let path = parse_path("dir1/dir2/file3");
        assert!(is_prefix(&path, &parse_path("dir1")));
        assert!(is_prefix(&path, &path));
        assert!(is_prefix(&path, &[] as &[String]));
        assert!(!is_prefix(&path, &parse_path("dir1/file1")));
        assert!(!is_prefix(&parse_path("dir1"), &path));
    }
}
