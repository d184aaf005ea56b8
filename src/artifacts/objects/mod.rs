//! Stored object types and their content hashes
//!
//! The store keeps three kinds of objects, each identified by the SHA-1 of a
//! canonical serialization of its fields:
//!
//! - **Blob**: `"<content token> <version>"`
//! - **Tree**: `"<name>|<child id>"` for every entry, concatenated in ascending name order
//! - **Commit**: message, parent id (or nothing), work tree id and the RFC 3339
//!   timestamp with millisecond precision, concatenated in that order
//!
//! Identical fields always produce the identical ID; the serialization carries
//! no type header, so the formats above are the whole contract.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form shown to users
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
