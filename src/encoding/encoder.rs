// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven payload encoder.
//!
//! Re-serializes a [`DecodedMessage`] into either wire format. Field
//! order comes from the schema; the message map only supplies values.

use crate::core::{ConvertError, DecodedMessage, FieldValue, Result, WireFormat};
use crate::schema::{FieldType, MessageSchema, PrimitiveType};

use super::sink::WireSink;

/// Encode field values into a serialized payload.
pub fn encode_message(
    schema: &MessageSchema,
    type_name: &str,
    message: &DecodedMessage,
    format: WireFormat,
) -> Result<Vec<u8>> {
    let mut sink = WireSink::new(format);
    encode_struct(schema, type_name, message, &mut sink)?;
    Ok(sink.finish())
}

fn encode_struct(
    schema: &MessageSchema,
    type_name: &str,
    message: &DecodedMessage,
    sink: &mut WireSink,
) -> Result<()> {
    let msg_type = schema
        .get_type_variants(type_name)
        .ok_or_else(|| ConvertError::type_not_found(type_name))?;

    for field in &msg_type.fields {
        let value = message.get(&field.name).ok_or_else(|| {
            ConvertError::encode(
                "wire",
                format!("missing field '{}' in '{}'", field.name, msg_type.name),
            )
        })?;
        encode_field(schema, &field.type_name, value, sink).map_err(|e| match e {
            err @ ConvertError::EncodeError { .. } => err,
            other => ConvertError::encode(
                "wire",
                format!("field '{}' of '{}': {}", field.name, msg_type.name, other),
            ),
        })?;
    }
    Ok(())
}

fn encode_field(
    schema: &MessageSchema,
    field_type: &FieldType,
    value: &FieldValue,
    sink: &mut WireSink,
) -> Result<()> {
    match field_type {
        FieldType::Primitive(prim) => encode_primitive(*prim, value, sink),
        FieldType::Array { base_type, size } => match value {
            FieldValue::Bytes(bytes) => {
                if !base_type.is_byte_sized() {
                    return Err(type_mismatch("array", value));
                }
                write_array_length(*size, bytes.len(), sink)?;
                sink.write_bytes(bytes)
            }
            FieldValue::Array(items) => {
                write_array_length(*size, items.len(), sink)?;
                for item in items {
                    encode_field(schema, base_type, item, sink)?;
                }
                Ok(())
            }
            other => Err(type_mismatch("array", other)),
        },
        FieldType::Nested(name) => match value {
            FieldValue::Struct(nested) => encode_struct(schema, name, nested, sink),
            other => Err(type_mismatch("struct", other)),
        },
    }
}

/// Validate a fixed array length or emit the dynamic length prefix.
fn write_array_length(size: Option<usize>, count: usize, sink: &mut WireSink) -> Result<()> {
    match size {
        Some(fixed) => {
            if count != fixed {
                return Err(ConvertError::encode(
                    "wire",
                    format!("fixed array expects {fixed} elements, got {count}"),
                ));
            }
            Ok(())
        }
        None => sink.write_u32(count as u32),
    }
}

fn encode_primitive(prim: PrimitiveType, value: &FieldValue, sink: &mut WireSink) -> Result<()> {
    match (prim, value) {
        (PrimitiveType::Bool, FieldValue::Bool(v)) => sink.write_bool(*v),
        (PrimitiveType::Int8 | PrimitiveType::Char, FieldValue::Int8(v)) => sink.write_i8(*v),
        (PrimitiveType::Int16, FieldValue::Int16(v)) => sink.write_i16(*v),
        (PrimitiveType::Int32, FieldValue::Int32(v)) => sink.write_i32(*v),
        (PrimitiveType::Int64, FieldValue::Int64(v)) => sink.write_i64(*v),
        (PrimitiveType::UInt8 | PrimitiveType::Byte, FieldValue::UInt8(v)) => sink.write_u8(*v),
        (PrimitiveType::UInt16, FieldValue::UInt16(v)) => sink.write_u16(*v),
        (PrimitiveType::UInt32, FieldValue::UInt32(v)) => sink.write_u32(*v),
        (PrimitiveType::UInt64, FieldValue::UInt64(v)) => sink.write_u64(*v),
        (PrimitiveType::Float32, FieldValue::Float32(v)) => sink.write_f32(*v),
        (PrimitiveType::Float64, FieldValue::Float64(v)) => sink.write_f64(*v),
        (PrimitiveType::String, FieldValue::String(v)) => sink.write_string(v),
        (PrimitiveType::Time, FieldValue::Time { sec, nsec }) => {
            sink.write_u32(*sec)?;
            sink.write_u32(*nsec)
        }
        (PrimitiveType::Duration, FieldValue::Duration { sec, nsec }) => {
            sink.write_i32(*sec)?;
            sink.write_i32(*nsec)
        }
        (_, other) => Err(type_mismatch(primitive_name(prim), other)),
    }
}

fn primitive_name(prim: PrimitiveType) -> &'static str {
    match prim {
        PrimitiveType::Bool => "bool",
        PrimitiveType::Int8 => "int8",
        PrimitiveType::Int16 => "int16",
        PrimitiveType::Int32 => "int32",
        PrimitiveType::Int64 => "int64",
        PrimitiveType::UInt8 => "uint8",
        PrimitiveType::UInt16 => "uint16",
        PrimitiveType::UInt32 => "uint32",
        PrimitiveType::UInt64 => "uint64",
        PrimitiveType::Float32 => "float32",
        PrimitiveType::Float64 => "float64",
        PrimitiveType::String => "string",
        PrimitiveType::Byte => "byte",
        PrimitiveType::Char => "char",
        PrimitiveType::Time => "time",
        PrimitiveType::Duration => "duration",
    }
}

fn type_mismatch(expected: &str, got: &FieldValue) -> ConvertError {
    ConvertError::encode(
        "wire",
        format!("expected {expected} value, got {}", got.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema;

    fn msg(pairs: &[(&str, FieldValue)]) -> DecodedMessage {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_encode_primitives_ros1_packed() {
        let schema = parse_schema("test/Msg", "uint8 a\nint32 b").unwrap();
        let message = msg(&[
            ("a", FieldValue::UInt8(7)),
            ("b", FieldValue::Int32(-5)),
        ]);

        let data = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1).unwrap();
        let mut expected = vec![0x07];
        expected.extend_from_slice(&(-5i32).to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_primitives_cdr_aligned() {
        let schema = parse_schema("test/Msg", "uint8 a\nint32 b").unwrap();
        let message = msg(&[
            ("a", FieldValue::UInt8(7)),
            ("b", FieldValue::Int32(-5)),
        ]);

        let data = encode_message(&schema, "test/Msg", &message, WireFormat::Cdr).unwrap();
        let mut expected = vec![0x00, 0x01, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00];
        expected.extend_from_slice(&(-5i32).to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_string_ros1() {
        let schema = parse_schema("std_msgs/String", "string data").unwrap();
        let message = msg(&[("data", FieldValue::String("hello".into()))]);

        let data = encode_message(&schema, "std_msgs/String", &message, WireFormat::Ros1).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&5u32.to_le_bytes());
        expected.extend_from_slice(b"hello");
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_dynamic_array_prefix() {
        let schema = parse_schema("test/Msg", "int16[] v").unwrap();
        let message = msg(&[(
            "v",
            FieldValue::Array(vec![FieldValue::Int16(1), FieldValue::Int16(2)]),
        )]);

        let data = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.extend_from_slice(&1i16.to_le_bytes());
        expected.extend_from_slice(&2i16.to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_fixed_array_no_prefix() {
        let schema = parse_schema("test/Msg", "uint8[3] v").unwrap();
        let message = msg(&[("v", FieldValue::Bytes(vec![1, 2, 3]))]);

        let data = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_encode_fixed_array_wrong_len() {
        let schema = parse_schema("test/Msg", "uint8[3] v").unwrap();
        let message = msg(&[("v", FieldValue::Bytes(vec![1, 2]))]);

        let result = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1);
        assert!(matches!(result, Err(ConvertError::EncodeError { .. })));
    }

    #[test]
    fn test_encode_missing_field() {
        let schema = parse_schema("test/Msg", "int32 a\nint32 b").unwrap();
        let message = msg(&[("a", FieldValue::Int32(1))]);

        let result = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1);
        assert!(matches!(result, Err(ConvertError::EncodeError { .. })));
    }

    #[test]
    fn test_encode_type_mismatch() {
        let schema = parse_schema("test/Msg", "int32 a").unwrap();
        let message = msg(&[("a", FieldValue::String("nope".into()))]);

        let result = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1);
        assert!(matches!(result, Err(ConvertError::EncodeError { .. })));
    }

    #[test]
    fn test_encode_time_ros1() {
        let schema = parse_schema("test/Msg", "time stamp").unwrap();
        let message = msg(&[("stamp", FieldValue::Time { sec: 10, nsec: 20 })]);

        let data = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&10u32.to_le_bytes());
        expected.extend_from_slice(&20u32.to_le_bytes());
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_nested_struct() {
        let msg_def = "geometry_msgs/Point position\n\
                       ===\n\
                       MSG: geometry_msgs/Point\nfloat64 x\nfloat64 y\nfloat64 z\n";
        let schema = parse_schema("test/Msg", msg_def).unwrap();

        let point = msg(&[
            ("x", FieldValue::Float64(1.0)),
            ("y", FieldValue::Float64(2.0)),
            ("z", FieldValue::Float64(3.0)),
        ]);
        let message = msg(&[("position", FieldValue::Struct(point))]);

        let data = encode_message(&schema, "test/Msg", &message, WireFormat::Ros1).unwrap();
        assert_eq!(data.len(), 24);
        assert_eq!(&data[0..8], &1.0f64.to_le_bytes());
    }
}
