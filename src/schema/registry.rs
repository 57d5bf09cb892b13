// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-run registry of parsed message schemas.
//!
//! All registrations happen during connection mapping (phase 1); the
//! streaming loop (phase 2) only performs lookups and never parses.

use std::collections::HashMap;

use crate::core::{ConvertError, Result};
use crate::schema::ast::MessageSchema;
use crate::schema::parser::parse_schema;

struct RegisteredType {
    /// Raw schema text as registered, for conflict detection
    msgdef: String,
    schema: MessageSchema,
}

/// Registry of parsed schemas for one conversion run.
///
/// Registration is idempotent: registering the same type with identical
/// schema text is a no-op; registering it with different text is a fatal
/// conflict.
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<String, RegisteredType>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a type with its schema text, parsing it into a field layout.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::SchemaConflict`] if the type is already registered
    ///   with different schema text.
    /// - [`ConvertError::ParseError`] if the schema text does not parse.
    pub fn register(&mut self, msgtype: &str, msgdef: &str) -> Result<()> {
        if let Some(existing) = self.entries.get(msgtype) {
            if existing.msgdef == msgdef {
                return Ok(());
            }
            return Err(ConvertError::schema_conflict(msgtype));
        }

        let schema = parse_schema(msgtype, msgdef)?;
        self.entries.insert(
            msgtype.to_string(),
            RegisteredType {
                msgdef: msgdef.to_string(),
                schema,
            },
        );
        Ok(())
    }

    /// Get a registered schema by type name.
    pub fn get(&self, msgtype: &str) -> Option<&MessageSchema> {
        self.entries.get(msgtype).map(|entry| &entry.schema)
    }

    /// Check if a type is registered.
    pub fn contains(&self, msgtype: &str) -> bool {
        self.entries.contains_key(msgtype)
    }

    /// Get all registered type names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = TypeRegistry::new();
        registry.register("std_msgs/msg/String", "string data").unwrap();

        assert!(registry.contains("std_msgs/msg/String"));
        assert_eq!(registry.len(), 1);

        let schema = registry.get("std_msgs/msg/String").unwrap();
        assert!(schema.get_type("std_msgs/msg/String").is_some());
    }

    #[test]
    fn test_register_idempotent() {
        let mut registry = TypeRegistry::new();
        registry.register("std_msgs/msg/String", "string data").unwrap();
        registry.register("std_msgs/msg/String", "string data").unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_conflict() {
        let mut registry = TypeRegistry::new();
        registry.register("std_msgs/msg/String", "string data").unwrap();

        let result = registry.register("std_msgs/msg/String", "int32 data");
        assert!(matches!(
            result,
            Err(ConvertError::SchemaConflict { .. })
        ));
        // Original registration survives
        assert!(registry.get("std_msgs/msg/String").is_some());
    }

    #[test]
    fn test_register_parse_failure() {
        let mut registry = TypeRegistry::new();
        let result = registry.register("bad/Type", "int32");
        assert!(matches!(result, Err(ConvertError::ParseError { .. })));
        assert!(!registry.contains("bad/Type"));
    }

    #[test]
    fn test_get_missing() {
        let registry = TypeRegistry::new();
        assert!(registry.get("unknown/Type").is_none());
        assert!(registry.is_empty());
    }
}
