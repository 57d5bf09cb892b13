// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AST types for parsed ROS .msg schemas.

use std::collections::HashMap;

/// A parsed ROS message schema.
///
/// Holds the main type plus every dependency type found in the same
/// schema text (the `MSG:` blocks of a concatenated definition).
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchema {
    /// Schema name (e.g., "sensor_msgs/msg/LaserScan")
    pub name: String,
    /// Package name (e.g., "sensor_msgs")
    pub package: Option<String>,
    /// All types defined in this schema (main type + nested types)
    pub types: HashMap<String, MessageType>,
}

/// A message type definition with its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageType {
    /// Type name including package if available
    pub name: String,
    /// Ordered list of fields
    pub fields: Vec<Field>,
}

/// A field in a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field type
    pub type_name: FieldType,
}

/// Field type - can be primitive, array, or nested message.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Primitive type
    Primitive(PrimitiveType),
    /// Array type
    Array {
        /// Base type (element type)
        base_type: Box<FieldType>,
        /// Array size (None = dynamic, Some(N) = fixed)
        size: Option<usize>,
    },
    /// Nested message type
    Nested(String),
}

/// Primitive ROS types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// String
    String,
    /// Byte (alias for UInt8)
    Byte,
    /// Char (alias for Int8 in genmsg)
    Char,
    /// Time (sec: uint32, nsec: uint32)
    Time,
    /// Duration (sec: int32, nsec: int32)
    Duration,
}

impl PrimitiveType {
    /// Get the CDR alignment requirement for this primitive type.
    pub fn alignment(self) -> usize {
        match self {
            PrimitiveType::Bool
            | PrimitiveType::Int8
            | PrimitiveType::UInt8
            | PrimitiveType::Byte
            | PrimitiveType::Char => 1,
            PrimitiveType::Int16 | PrimitiveType::UInt16 => 2,
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => 4,
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => 8,
            // Length prefix is 4-byte aligned
            PrimitiveType::String => 4,
            // Two 4-byte components
            PrimitiveType::Time | PrimitiveType::Duration => 4,
        }
    }

    /// Get the size in bytes for this primitive type, if fixed.
    pub fn size(self) -> Option<usize> {
        match self {
            PrimitiveType::Bool
            | PrimitiveType::Int8
            | PrimitiveType::UInt8
            | PrimitiveType::Byte
            | PrimitiveType::Char => Some(1),
            PrimitiveType::Int16 | PrimitiveType::UInt16 => Some(2),
            PrimitiveType::Int32 | PrimitiveType::UInt32 | PrimitiveType::Float32 => Some(4),
            PrimitiveType::Int64 | PrimitiveType::UInt64 | PrimitiveType::Float64 => Some(8),
            PrimitiveType::String => None,
            PrimitiveType::Time | PrimitiveType::Duration => Some(8),
        }
    }

    /// Parse a primitive type from a string.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" | "boolean" => Some(PrimitiveType::Bool),
            "int8" => Some(PrimitiveType::Int8),
            "int16" => Some(PrimitiveType::Int16),
            "int32" => Some(PrimitiveType::Int32),
            "int64" => Some(PrimitiveType::Int64),
            "uint8" => Some(PrimitiveType::UInt8),
            "uint16" => Some(PrimitiveType::UInt16),
            "uint32" => Some(PrimitiveType::UInt32),
            "uint64" => Some(PrimitiveType::UInt64),
            "float32" | "float" => Some(PrimitiveType::Float32),
            "float64" | "double" => Some(PrimitiveType::Float64),
            "string" => Some(PrimitiveType::String),
            "byte" => Some(PrimitiveType::Byte),
            "char" => Some(PrimitiveType::Char),
            "time" => Some(PrimitiveType::Time),
            "duration" => Some(PrimitiveType::Duration),
            _ => None,
        }
    }
}

impl FieldType {
    /// Check if this field type is a single-byte primitive.
    ///
    /// Arrays of these decode through the bytes fast path.
    pub fn is_byte_sized(&self) -> bool {
        matches!(
            self,
            FieldType::Primitive(PrimitiveType::UInt8 | PrimitiveType::Byte)
        )
    }
}

impl MessageSchema {
    /// Create an empty schema.
    pub fn new(name: String) -> Self {
        Self {
            package: extract_package(&name),
            name,
            types: HashMap::new(),
        }
    }

    /// Register a type in this schema.
    pub fn add_type(&mut self, msg_type: MessageType) {
        self.types.insert(msg_type.name.clone(), msg_type);
    }

    /// Look up a type by name.
    pub fn get_type(&self, name: &str) -> Option<&MessageType> {
        self.types.get(name)
    }

    /// Look up a type by name with variant resolution.
    ///
    /// Tries multiple resolution strategies:
    /// - Exact match
    /// - With /msg/ infix (e.g., "std_msgs/Header" → "std_msgs/msg/Header")
    /// - Without /msg/ infix (e.g., "std_msgs/msg/Header" → "std_msgs/Header")
    /// - Short name match (e.g., "Header" → "std_msgs/Header")
    pub fn get_type_variants(&self, name: &str) -> Option<&MessageType> {
        if let Some(t) = self.types.get(name) {
            return Some(t);
        }

        if !name.contains("/msg/") {
            let with_msg = name.replacen('/', "/msg/", 1);
            if let Some(t) = self.types.get(&with_msg) {
                return Some(t);
            }
        }

        if name.contains("/msg/") {
            let without_msg = name.replace("/msg/", "/");
            if let Some(t) = self.types.get(&without_msg) {
                return Some(t);
            }
        }

        // Short name match
        if !name.contains('/') {
            for (full_name, msg_type) in &self.types {
                if full_name.ends_with(&format!("/{name}"))
                    || full_name.ends_with(&format!("/msg/{name}"))
                {
                    return Some(msg_type);
                }
            }
        }

        None
    }
}

impl MessageType {
    /// Create a new message type.
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Add a field to this message type.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }
}

/// Extract package name from a fully-qualified type name.
fn extract_package(name: &str) -> Option<String> {
    name.split('/')
        .next()
        .filter(|pkg| !pkg.is_empty() && name.contains('/'))
        .map(|pkg| pkg.to_string())
}
