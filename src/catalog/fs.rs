// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Filesystem-backed definition catalog.
//!
//! Store layout, one directory per type in rosbag1 naming:
//!
//! ```text
//! <root>/std_msgs/Header/msgdef.txt
//! <root>/std_msgs/Header/md5sum.txt
//! ```
//!
//! Only the first line of `md5sum.txt` is significant.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::catalog::{Definition, DefinitionCatalog};
use crate::core::{ConvertError, Result};
use crate::schema::denormalize_msgtype;

/// Definition catalog backed by a directory tree.
///
/// Caches every resolution for the lifetime of the catalog value, misses
/// included, so each type touches the store at most once per run.
pub struct FsCatalog {
    root: PathBuf,
    cache: HashMap<String, Option<Definition>>,
}

impl FsCatalog {
    /// Create a catalog rooted at the given store directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    /// Get the store root directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn type_dir(&self, msgtype: &str) -> PathBuf {
        self.root.join(denormalize_msgtype(msgtype))
    }

    fn load(&self, msgtype: &str) -> Result<Option<Definition>> {
        let dir = self.type_dir(msgtype);

        let msgdef = match fs::read_to_string(dir.join("msgdef.txt")) {
            Ok(text) => text,
            Err(err) => {
                // No usable schema text: soft miss, the type is skipped.
                warn!(
                    msgtype,
                    path = %dir.join("msgdef.txt").display(),
                    error = %err,
                    "No schema definition in catalog, skipping type"
                );
                return Ok(None);
            }
        };

        // Schema text exists; from here a missing checksum is fatal.
        let md5sum = fs::read_to_string(dir.join("md5sum.txt"))
            .map_err(|_| ConvertError::missing_checksum(msgtype))?;
        let md5sum = md5sum.lines().next().unwrap_or("").trim().to_string();
        if md5sum.is_empty() {
            return Err(ConvertError::missing_checksum(msgtype));
        }

        Ok(Some(Definition { msgdef, md5sum }))
    }
}

impl DefinitionCatalog for FsCatalog {
    fn resolve(&mut self, msgtype: &str) -> Result<Option<Definition>> {
        if let Some(cached) = self.cache.get(msgtype) {
            return Ok(cached.clone());
        }

        let resolved = self.load(msgtype)?;
        self.cache.insert(msgtype.to_string(), resolved.clone());
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> PathBuf {
        let random = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        let dir = std::env::temp_dir().join(format!(
            "rebag_fs_catalog_test_{}_{}",
            std::process::id(),
            random
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_type(root: &PathBuf, dir_name: &str, msgdef: Option<&str>, md5sum: Option<&str>) {
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(text) = msgdef {
            fs::write(dir.join("msgdef.txt"), text).unwrap();
        }
        if let Some(text) = md5sum {
            fs::write(dir.join("md5sum.txt"), text).unwrap();
        }
    }

    #[test]
    fn test_resolve_found() {
        let root = temp_store();
        write_type(
            &root,
            "std_msgs/String",
            Some("string data"),
            Some("992ce8a1687cec8c8bd883ec73ca41d1\n"),
        );

        let mut catalog = FsCatalog::new(&root);
        let def = catalog.resolve("std_msgs/msg/String").unwrap().unwrap();
        assert_eq!(def.msgdef, "string data");
        assert_eq!(def.md5sum, "992ce8a1687cec8c8bd883ec73ca41d1");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_first_line_of_checksum() {
        let root = temp_store();
        write_type(
            &root,
            "std_msgs/String",
            Some("string data"),
            Some("992ce8a1687cec8c8bd883ec73ca41d1\ngenerated 2021-03-01\n"),
        );

        let mut catalog = FsCatalog::new(&root);
        let def = catalog.resolve("std_msgs/String").unwrap().unwrap();
        assert_eq!(def.md5sum, "992ce8a1687cec8c8bd883ec73ca41d1");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_missing_definition_is_soft() {
        let root = temp_store();

        let mut catalog = FsCatalog::new(&root);
        assert_eq!(catalog.resolve("unknown_msgs/msg/Nothing").unwrap(), None);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_missing_checksum_is_fatal() {
        let root = temp_store();
        write_type(&root, "std_msgs/String", Some("string data"), None);

        let mut catalog = FsCatalog::new(&root);
        let result = catalog.resolve("std_msgs/msg/String");
        assert!(matches!(
            result,
            Err(ConvertError::MissingChecksum { .. })
        ));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_empty_checksum_is_fatal() {
        let root = temp_store();
        write_type(&root, "std_msgs/String", Some("string data"), Some("\n"));

        let mut catalog = FsCatalog::new(&root);
        let result = catalog.resolve("std_msgs/String");
        assert!(matches!(
            result,
            Err(ConvertError::MissingChecksum { .. })
        ));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_caches_hits_and_misses() {
        let root = temp_store();
        write_type(
            &root,
            "std_msgs/String",
            Some("string data"),
            Some("992ce8a1687cec8c8bd883ec73ca41d1\n"),
        );

        let mut catalog = FsCatalog::new(&root);
        assert!(catalog.resolve("std_msgs/String").unwrap().is_some());
        assert!(catalog.resolve("unknown/Type").unwrap().is_none());

        // Remove the store; cached answers must survive.
        fs::remove_dir_all(&root).unwrap();
        assert!(catalog.resolve("std_msgs/String").unwrap().is_some());
        assert!(catalog.resolve("unknown/Type").unwrap().is_none());
    }

    #[test]
    fn test_type_dir_uses_ros1_naming() {
        let catalog = FsCatalog::new("/store");
        assert_eq!(
            catalog.type_dir("sensor_msgs/msg/LaserScan"),
            PathBuf::from("/store/sensor_msgs/LaserScan")
        );
    }
}
