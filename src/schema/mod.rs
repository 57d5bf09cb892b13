// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema parsing and type-name handling for ROS message definitions.
//!
//! This module provides:
//! - The `.msg` schema AST and Pest-based parser
//! - The per-run [`TypeRegistry`]
//! - Type-name normalization between rosbag2 and rosbag1 conventions

pub mod ast;
pub mod parser;
pub mod registry;

pub use ast::{Field, FieldType, MessageSchema, MessageType, PrimitiveType};
pub use parser::parse_schema;
pub use registry::TypeRegistry;

/// Convert a rosbag1-style type name to the rosbag2 convention.
///
/// `std_msgs/Header` → `std_msgs/msg/Header`. Names already carrying the
/// `/msg/` infix, and bare names without a package, are returned unchanged.
pub fn normalize_msgtype(msgtype: &str) -> String {
    if msgtype.contains("/msg/") || !msgtype.contains('/') {
        msgtype.to_string()
    } else {
        msgtype.replacen('/', "/msg/", 1)
    }
}

/// Convert a rosbag2-style type name to the rosbag1 convention.
///
/// `std_msgs/msg/Header` → `std_msgs/Header`. Used for catalog store
/// paths, which are laid out in the rosbag1 naming.
pub fn denormalize_msgtype(msgtype: &str) -> String {
    msgtype.replacen("/msg/", "/", 1)
}
