// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory definition catalog.
//!
//! Fixture-backed catalog for tests and embedders that carry their own
//! definition store. Supports checksum-less entries to exercise the fatal
//! resolution path.

use std::collections::HashMap;

use crate::catalog::{Definition, DefinitionCatalog};
use crate::core::{ConvertError, Result};

#[derive(Debug, Clone)]
struct Entry {
    msgdef: String,
    md5sum: Option<String>,
}

/// Definition catalog backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: HashMap<String, Entry>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a complete definition for a type.
    pub fn insert(
        &mut self,
        msgtype: impl Into<String>,
        msgdef: impl Into<String>,
        md5sum: impl Into<String>,
    ) {
        self.entries.insert(
            msgtype.into(),
            Entry {
                msgdef: msgdef.into(),
                md5sum: Some(md5sum.into()),
            },
        );
    }

    /// Insert schema text without a checksum artifact.
    ///
    /// Resolving such a type fails with
    /// [`crate::ConvertError::MissingChecksum`].
    pub fn insert_without_checksum(
        &mut self,
        msgtype: impl Into<String>,
        msgdef: impl Into<String>,
    ) {
        self.entries.insert(
            msgtype.into(),
            Entry {
                msgdef: msgdef.into(),
                md5sum: None,
            },
        );
    }

    /// Get the number of stored types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DefinitionCatalog for MemoryCatalog {
    fn resolve(&mut self, msgtype: &str) -> Result<Option<Definition>> {
        match self.entries.get(msgtype) {
            None => Ok(None),
            Some(Entry {
                md5sum: None, ..
            }) => Err(ConvertError::missing_checksum(msgtype)),
            Some(Entry {
                msgdef,
                md5sum: Some(md5sum),
            }) => Ok(Some(Definition {
                msgdef: msgdef.clone(),
                md5sum: md5sum.clone(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_found() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert("std_msgs/msg/String", "string data", "992ce8a1");

        let def = catalog.resolve("std_msgs/msg/String").unwrap().unwrap();
        assert_eq!(def.msgdef, "string data");
        assert_eq!(def.md5sum, "992ce8a1");
    }

    #[test]
    fn test_resolve_missing_is_soft() {
        let mut catalog = MemoryCatalog::new();
        assert_eq!(catalog.resolve("unknown/Type").unwrap(), None);
    }

    #[test]
    fn test_resolve_without_checksum_is_fatal() {
        let mut catalog = MemoryCatalog::new();
        catalog.insert_without_checksum("std_msgs/msg/String", "string data");

        let result = catalog.resolve("std_msgs/msg/String");
        assert!(matches!(
            result,
            Err(ConvertError::MissingChecksum { .. })
        ));
    }

    #[test]
    fn test_len() {
        let mut catalog = MemoryCatalog::new();
        assert!(catalog.is_empty());
        catalog.insert("a/A", "int32 x", "11");
        catalog.insert("b/B", "int32 y", "22");
        assert_eq!(catalog.len(), 2);
    }
}
