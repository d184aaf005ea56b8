//! Tree object
//!
//! A tree maps child names to object IDs, one level of a committed directory.
//! Children are either blobs or other trees; a tree pointing at a commit is a
//! corrupted graph.
//!
//! ## Format
//!
//! `<name>|<oid>` for every child, concatenated in ascending name order with
//! no separator between entries.

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct GitTree {
    items: BTreeMap<String, ObjectId>,
}

impl GitTree {
    pub fn items(&self) -> &BTreeMap<String, ObjectId> {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.items.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Packable for GitTree {
    fn serialize(&self) -> Bytes {
        let mut content = String::new();
        for (name, oid) in &self.items {
            content.push_str(name);
            content.push('|');
            content.push_str(oid.as_ref());
        }
        Bytes::from(content)
    }
}

impl Object for GitTree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.items
            .iter()
            .map(|(name, oid)| format!("{oid}\t{name}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
