// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MSG format parser using Pest.
//!
//! This module handles parsing of ROS .msg format schema text as stored
//! in the definition catalog (genmsg concatenated format).
//!
//! The format supports:
//! - Simple field lists (root message)
//! - Dependency blocks with "MSG: TypeName" headers after `===` separators
//! - Array types: T[] (dynamic) or T[n] (fixed)
//! - Nested types: package/MessageName
//! - Comments (# style) and constant declarations (skipped)
//! - Indented inline sub-definitions (converted to dependency blocks)

use crate::core::ConvertError;
use crate::core::Result as CoreResult;
use crate::schema::ast::{Field, FieldType, MessageSchema, MessageType, PrimitiveType};
use pest::Parser;
use pest_derive::Parser;

/// Pest parser for ROS .msg schema files.
#[derive(Parser)]
#[grammar = "schema/parser/msg_parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// Parse ROS .msg format schema text into a [`MessageSchema`].
pub fn parse(name: &str, definition: &str) -> CoreResult<MessageSchema> {
    // Schemas with === separators are already in the concatenated format;
    // anything else may carry indented inline sub-definitions.
    let definition = if definition.contains("===") {
        definition.trim_end().to_string()
    } else {
        preprocess_indented_schema(definition)
    };

    let pairs = MsgParser::parse(Rule::schema, &definition)
        .map_err(|e| ConvertError::parse("msg schema", format!("{e}")))?;

    let mut schema = MessageSchema::new(name.to_string());

    for pair in pairs {
        // schema = SOI ~ root_msg ~ (separator ~ dependency_msg)* ~ EOI
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::EOI => {}
                Rule::root_msg => {
                    let mut msg_type = MessageType::new(name.to_string());
                    for field_item in item.into_inner() {
                        if let Some(field) = parse_msg_line(field_item) {
                            msg_type.add_field(field);
                        }
                    }
                    schema.add_type(msg_type);
                }
                Rule::dependency_msg => {
                    // dependency_msg = blank* ~ dependency_header ~ msg_item*
                    let mut current: Option<MessageType> = None;
                    for dep_item in item.into_inner() {
                        match dep_item.as_rule() {
                            Rule::dependency_header => {
                                let header = dep_item.as_str().trim();
                                let type_name =
                                    header.strip_prefix("MSG:").unwrap_or(header).trim();
                                if !type_name.is_empty() {
                                    current = Some(MessageType::new(type_name.to_string()));
                                }
                            }
                            _ => {
                                if let (Some(msg_type), Some(field)) =
                                    (current.as_mut(), parse_msg_line(dep_item))
                                {
                                    msg_type.add_field(field);
                                }
                            }
                        }
                    }
                    if let Some(msg_type) = current {
                        schema.add_type(msg_type);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(schema)
}

/// Preprocess schema to convert indented inline type definitions to the
/// concatenated MSG format.
///
/// Converts:
/// ```text
/// geometry_msgs/Vector3 linear
///   float64 x
///   float64 y
///   float64 z
/// ```
///
/// To:
/// ```text
/// geometry_msgs/Vector3 linear
/// ===
/// MSG: geometry_msgs/Vector3
/// float64 x
/// float64 y
/// float64 z
/// ```
fn preprocess_indented_schema(definition: &str) -> String {
    let mut root_lines: Vec<String> = Vec::new();
    let mut nested_types: Vec<(String, Vec<String>)> = Vec::new();
    let mut current_nested_type: Option<String> = None;

    for line in definition.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            if current_nested_type.is_none() {
                root_lines.push(line.trim_end().to_string());
            }
            continue;
        }

        let is_indented = line.starts_with(' ') || line.starts_with('\t');

        if is_indented {
            if let Some(ref type_name) = current_nested_type {
                match nested_types.iter_mut().find(|(name, _)| name == type_name) {
                    Some((_, fields)) => fields.push(trimmed.to_string()),
                    None => nested_types.push((type_name.clone(), vec![trimmed.to_string()])),
                }
            }
        } else {
            current_nested_type = None;
            root_lines.push(line.trim_end().to_string());

            if let Some(nested_type) = extract_nested_type(trimmed) {
                current_nested_type = Some(nested_type);
            }
        }
    }

    let mut result = root_lines.join("\n");

    for (type_name, fields) in nested_types {
        if !fields.is_empty() {
            result.push_str("\n===\nMSG: ");
            result.push_str(&type_name);
            result.push('\n');
            result.push_str(&fields.join("\n"));
        }
    }

    result.trim_end().to_string()
}

/// Extract nested type name from a field declaration, if any.
/// Returns None for primitive types and constants.
fn extract_nested_type(line: &str) -> Option<String> {
    // Constants contain '='
    if line.contains('=') {
        return None;
    }

    let type_part = line.split_whitespace().next()?;
    let base_type = type_part.split('[').next().unwrap_or(type_part);

    if PrimitiveType::try_from_str(base_type).is_some() {
        None
    } else {
        Some(base_type.to_string())
    }
}

/// Parse a single msg_line into a Field, if possible.
///
/// Constant declarations (lines containing '=') and non-field rules
/// yield None.
fn parse_msg_line(pair: pest::iterators::Pair<Rule>) -> Option<Field> {
    if pair.as_rule() != Rule::msg_line {
        return None;
    }

    // msg_line is atomic, so extract from the string directly.
    let content = pair.as_str().trim();

    if content.contains('=') {
        // Constant declaration
        return None;
    }

    let space_pos = content.find(|c: char| c.is_whitespace())?;
    let type_part = &content[..space_pos];

    let (base_type_str, is_array, array_size) = if let Some(bracket_pos) = type_part.find('[') {
        let base = &type_part[..bracket_pos];
        let digits: String = type_part[bracket_pos..]
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let size = if digits.is_empty() {
            None
        } else {
            digits.parse().ok()
        };
        (base, true, size)
    } else {
        (type_part, false, None)
    };

    let after_type = content[space_pos..].trim_start();
    let field_end = after_type
        .find(|c: char| c.is_whitespace())
        .unwrap_or(after_type.len());
    let field_name = after_type[..field_end].to_string();
    if field_name.is_empty() {
        return None;
    }

    Some(Field {
        name: field_name,
        type_name: build_field_type(base_type_str, is_array, array_size),
    })
}

/// Build a FieldType from a base type string and array info.
fn build_field_type(base_type_str: &str, is_array: bool, array_size: Option<usize>) -> FieldType {
    let base_type_str = base_type_str.trim();
    let base = if let Some(prim) = PrimitiveType::try_from_str(base_type_str) {
        FieldType::Primitive(prim)
    } else {
        // Nested type (e.g., "std_msgs/Header")
        FieldType::Nested(base_type_str.to_string())
    };

    if is_array {
        FieldType::Array {
            base_type: Box::new(base),
            size: array_size,
        }
    } else {
        base
    }
}
