use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::artifacts::core::{FilePath, parse_path, path_string};
use crate::errors::{Error, Result};

/// Validated branch name
///
/// A name maps onto a path in the ref namespace: `feature/login` is the leaf
/// `login` inside the `feature` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidBranchName(String::from(
                "branch name cannot be empty",
            )));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|err| Error::InvalidBranchName(format!("{name}: {err}")))?;

        if re.is_match(&name) {
            Err(Error::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }

    /// Rebuild a name from its ref path
    pub fn from_ref_path(path: &[String]) -> Result<Self> {
        Self::try_parse(path_string(path))
    }

    pub fn ref_path(&self) -> FilePath {
        parse_path(&self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("main")]
    #[case("feature/login")]
    #[case("release-1.2")]
    #[case("user_name/fix.3")]
    fn accepts_valid_names(#[case] name: &str) {
        assert_eq!(BranchName::try_parse(name).unwrap().as_ref(), name);
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("a/.b")]
    #[case("a..b")]
    #[case("/abs")]
    #[case("trailing/")]
    #[case("name.lock")]
    #[case("at@{brace")]
    #[case("with space")]
    #[case("star*")]
    #[case("colon:")]
    #[case("tilde~1")]
    #[case("caret^")]
    fn rejects_invalid_names(#[case] name: &str) {
        assert!(matches!(
            BranchName::try_parse(name),
            Err(Error::InvalidBranchName(_))
        ));
    }

    #[test]
    fn maps_to_ref_paths() {
        let name = BranchName::try_parse("feature/login").unwrap();
        assert_eq!(name.ref_path(), vec!["feature", "login"]);
        assert_eq!(BranchName::from_ref_path(&name.ref_path()).unwrap(), name);
    }
}
