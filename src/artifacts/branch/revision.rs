use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, HEAD_REF_NAME, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

/// Shortest abbreviated object ID accepted as a revision
const MIN_OID_PREFIX: usize = 4;

/// A revision naming a commit
///
/// Supported forms:
/// - `HEAD` (or its alias `@`)
/// - branch names: `main`, `feature/login`
/// - full or abbreviated (4+ hex digits) commit IDs, tried when no branch has that name
/// - parent notation: `<revision>^`
/// - ancestor notation: `<revision>~<n>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    /// A branch, or possibly an object ID (decided while resolving)
    Ref(BranchName),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> Result<Revision> {
        let revision = revision.trim();

        let parent = regex::Regex::new(PARENT_REGEX)
            .map_err(|err| Error::InvalidArgument(format!("invalid parent regex: {err}")))?;
        if let Some(caps) = parent.captures(revision) {
            return Ok(Revision::Parent(Box::new(Self::try_parse(&caps[1])?)));
        }

        let ancestor = regex::Regex::new(ANCESTOR_REGEX)
            .map_err(|err| Error::InvalidArgument(format!("invalid ancestor regex: {err}")))?;
        if let Some(caps) = ancestor.captures(revision) {
            let generations = caps[2].parse::<usize>().map_err(|err| {
                Error::InvalidArgument(format!("'{revision}': bad generation count: {err}"))
            })?;
            return Ok(Revision::Ancestor(
                Box::new(Self::try_parse(&caps[1])?),
                generations,
            ));
        }

        let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
        if resolved_name == HEAD_REF_NAME {
            Ok(Revision::Head)
        } else {
            Ok(Revision::Ref(BranchName::try_parse(resolved_name)?))
        }
    }

    /// Resolve to the ID of a stored commit
    pub fn resolve(&self, repository: &Repository) -> Result<ObjectId> {
        match self {
            Revision::Head => repository
                .head()
                .resolve(repository.refs())?
                .ok_or_else(|| Error::InvalidArgument(String::from("HEAD has no commits yet"))),
            Revision::Ref(name) => match repository.refs().read_leaf(&name.ref_path()) {
                Ok(oid) => Ok(oid),
                Err(_) if Self::looks_like_oid(name.as_ref()) => {
                    Self::resolve_oid(name.as_ref(), repository)
                }
                Err(_) => Err(Error::InvalidArgument(format!(
                    "'{name}': unknown revision"
                ))),
            },
            Revision::Parent(base) => Self::parent_of(&base.resolve(repository)?, repository),
            Revision::Ancestor(base, generations) => {
                let mut oid = base.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::parent_of(&oid, repository)?;
                }
                Ok(oid)
            }
        }
    }

    fn parent_of(oid: &ObjectId, repository: &Repository) -> Result<ObjectId> {
        repository
            .database()
            .load_commit(oid)?
            .parent()
            .cloned()
            .ok_or_else(|| {
                Error::InvalidArgument(format!("'{}' has no parent", oid.to_short_oid()))
            })
    }

    fn resolve_oid(prefix: &str, repository: &Repository) -> Result<ObjectId> {
        let database = repository.database();
        let commits = database
            .find_by_prefix(prefix)
            .into_iter()
            .filter(|oid| database.read_commit(oid).is_some())
            .collect::<Vec<_>>();

        match commits.as_slice() {
            [oid] => Ok(oid.clone()),
            [] => Err(Error::InvalidArgument(format!(
                "'{prefix}': invalid commit address"
            ))),
            candidates => Err(Error::InvalidArgument(format!(
                "short object ID {prefix} is ambiguous: {}",
                candidates
                    .iter()
                    .map(ObjectId::to_short_oid)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        s.len() >= MIN_OID_PREFIX && s.len() <= 40 && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}
