// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout rebag.
//!
//! This module provides the foundational types for the library:
//! - [`ConvertError`] - Unified error handling with phase labels
//! - [`FieldValue`] - Decoded value representation
//! - [`WireFormat`] - Wire encoding identifier

pub mod error;
pub mod value;

pub use error::{ConvertError, ConvertPhase, Result};
pub use value::{DecodedMessage, FieldValue};

/// Wire encoding identifier.
///
/// The converter moves payloads from [`WireFormat::Cdr`] (rosbag2) to
/// [`WireFormat::Ros1`] (rosbag1); both directions are supported by the
/// encoding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// CDR (Common Data Representation), the rosbag2 payload encoding:
    /// 4-byte encapsulation header, natural alignment, NUL-terminated
    /// length-prefixed strings.
    Cdr,
    /// ROS1 serialization, the rosbag1 payload encoding: headerless,
    /// little-endian, packed, strings without terminator.
    Ros1,
}

/// Error returned when parsing a `WireFormat` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseWireFormatError {
    _private: (),
}

impl std::fmt::Display for ParseWireFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid wire format name, expected 'cdr' or 'ros1'")
    }
}

impl std::error::Error for ParseWireFormatError {}

impl std::str::FromStr for WireFormat {
    type Err = ParseWireFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cdr" | "ros2" => Ok(WireFormat::Cdr),
            "ros1" | "ros1msg" => Ok(WireFormat::Ros1),
            _ => Err(ParseWireFormatError { _private: () }),
        }
    }
}

impl WireFormat {
    /// Check if this format carries a 4-byte encapsulation header.
    pub fn has_encapsulation(&self) -> bool {
        matches!(self, WireFormat::Cdr)
    }

    /// Check if this format packs fields without alignment padding.
    pub fn is_packed(&self) -> bool {
        matches!(self, WireFormat::Ros1)
    }

    /// Check if strings carry a trailing NUL inside their length prefix.
    pub fn strings_nul_terminated(&self) -> bool {
        matches!(self, WireFormat::Cdr)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::Cdr => "cdr",
            WireFormat::Ros1 => "ros1",
        }
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_from_str() {
        assert_eq!("cdr".parse::<WireFormat>(), Ok(WireFormat::Cdr));
        assert_eq!("CDR".parse::<WireFormat>(), Ok(WireFormat::Cdr));
        assert_eq!("ros2".parse::<WireFormat>(), Ok(WireFormat::Cdr));
        assert_eq!("ros1".parse::<WireFormat>(), Ok(WireFormat::Ros1));
        assert_eq!("ros1msg".parse::<WireFormat>(), Ok(WireFormat::Ros1));
        assert!("json".parse::<WireFormat>().is_err());
    }

    #[test]
    fn test_wire_format_predicates() {
        assert!(WireFormat::Cdr.has_encapsulation());
        assert!(!WireFormat::Cdr.is_packed());
        assert!(WireFormat::Cdr.strings_nul_terminated());

        assert!(!WireFormat::Ros1.has_encapsulation());
        assert!(WireFormat::Ros1.is_packed());
        assert!(!WireFormat::Ros1.strings_nul_terminated());
    }

    #[test]
    fn test_wire_format_as_str() {
        assert_eq!(WireFormat::Cdr.as_str(), "cdr");
        assert_eq!(WireFormat::Ros1.as_str(), "ros1");
    }
}
