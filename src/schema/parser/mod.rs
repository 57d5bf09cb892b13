// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parsers.
//!
//! The definition catalog stores genmsg `.msg` text, so the MSG parser is
//! the only parser this crate carries.

pub mod msg_parser;

use crate::core::Result as CoreResult;
use crate::schema::ast::MessageSchema;

/// Parse a `.msg` schema definition into a [`MessageSchema`].
///
/// # Arguments
///
/// * `name` - The name of the message type (e.g., "sensor_msgs/msg/LaserScan")
/// * `definition` - The schema file contents
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use rebag::schema::parse_schema;
///
/// let schema = parse_schema("std_msgs/Header", "uint32 seq\ntime stamp\nstring frame_id")?;
/// assert!(schema.get_type("std_msgs/Header").is_some());
/// # Ok(())
/// # }
/// ```
pub fn parse_schema(name: impl AsRef<str>, definition: &str) -> CoreResult<MessageSchema> {
    msg_parser::parse(name.as_ref(), definition)
}
