//! Simulated file content and the blob object storing it
//!
//! There are no bytes in the simulated file system. A file's content is an
//! opaque token minted when the file is created, plus a version counter bumped
//! on every edit; two files hold the same content iff both fields match.

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use uuid::Uuid;

/// Content of a file in the working file system
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct FileBlob {
    content_token: String,
    version: u64,
}

impl FileBlob {
    /// Content for a freshly created file, distinct from every other file
    pub fn generate() -> Self {
        FileBlob {
            content_token: Uuid::new_v4().to_string(),
            version: 0,
        }
    }

    /// Same token, next version
    pub fn bump(&self) -> Self {
        FileBlob {
            content_token: self.content_token.clone(),
            version: self.version + 1,
        }
    }

    pub fn content_token(&self) -> &str {
        &self.content_token
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl std::fmt::Display for FileBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (v{})", self.content_token, self.version)
    }
}

/// Blob object wrapping the content of one file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct GitBlob {
    file_data: FileBlob,
}

impl GitBlob {
    pub fn file_data(&self) -> &FileBlob {
        &self.file_data
    }
}

impl Packable for GitBlob {
    fn serialize(&self) -> Bytes {
        Bytes::from(format!(
            "{} {}",
            self.file_data.content_token, self.file_data.version
        ))
    }
}

impl Object for GitBlob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        self.file_data.to_string()
    }
}
