// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded value type system.
//!
//! Provides a unified value representation for message payloads decoded
//! from either wire format (CDR or ROS1). The transcoder decodes into
//! these values and re-encodes them unchanged, so every variant must be
//! representable losslessly in both encodings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type alias for a decoded message as field name -> value mapping.
///
/// Field order during re-encode comes from the schema, not from this map.
pub type DecodedMessage = HashMap<String, FieldValue>;

/// Unified value type for decoded message fields.
///
/// Time and duration keep their `(sec, nsec)` pair representation instead
/// of collapsing to nanoseconds; the pair survives a decode/encode cycle
/// bit-identically even for denormalized inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Boolean
    Bool(bool),

    /// 8-bit signed integer
    Int8(i8),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),

    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 64-bit unsigned integer
    UInt64(u64),

    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),

    /// UTF-8 string
    String(String),

    /// Binary blob (fast path for `uint8[]` fields: images, point clouds)
    Bytes(Vec<u8>),

    /// ROS time: unsigned seconds + nanoseconds
    Time {
        /// Seconds component
        sec: u32,
        /// Nanoseconds component
        nsec: u32,
    },

    /// ROS duration: signed seconds + nanoseconds
    Duration {
        /// Seconds component
        sec: i32,
        /// Nanoseconds component
        nsec: i32,
    },

    /// Array of values
    Array(Vec<FieldValue>),

    /// Nested message
    Struct(DecodedMessage),
}

impl FieldValue {
    /// Get a short name for the contained type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int8(_) => "int8",
            FieldValue::Int16(_) => "int16",
            FieldValue::Int32(_) => "int32",
            FieldValue::Int64(_) => "int64",
            FieldValue::UInt8(_) => "uint8",
            FieldValue::UInt16(_) => "uint16",
            FieldValue::UInt32(_) => "uint32",
            FieldValue::UInt64(_) => "uint64",
            FieldValue::Float32(_) => "float32",
            FieldValue::Float64(_) => "float64",
            FieldValue::String(_) => "string",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Time { .. } => "time",
            FieldValue::Duration { .. } => "duration",
            FieldValue::Array(_) => "array",
            FieldValue::Struct(_) => "struct",
        }
    }

    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldValue::Int8(_)
                | FieldValue::Int16(_)
                | FieldValue::Int32(_)
                | FieldValue::Int64(_)
                | FieldValue::UInt8(_)
                | FieldValue::UInt16(_)
                | FieldValue::UInt32(_)
                | FieldValue::UInt64(_)
                | FieldValue::Float32(_)
                | FieldValue::Float64(_)
        )
    }

    /// Get the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a nested message, if it is a struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            FieldValue::Struct(m) => Some(m),
            _ => None,
        }
    }

    /// Get the value as an array slice, if it is an array.
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the value as raw bytes, if it is a byte blob.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the value as an i64, if it is any integer type.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int8(v) => Some(*v as i64),
            FieldValue::Int16(v) => Some(*v as i64),
            FieldValue::Int32(v) => Some(*v as i64),
            FieldValue::Int64(v) => Some(*v),
            FieldValue::UInt8(v) => Some(*v as i64),
            FieldValue::UInt16(v) => Some(*v as i64),
            FieldValue::UInt32(v) => Some(*v as i64),
            FieldValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Get the value as an f64, if it is a float type.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float32(v) => Some(*v as f64),
            FieldValue::Float64(v) => Some(*v),
            _ => None,
        }
    }
}
