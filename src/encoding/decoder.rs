// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven payload decoder.
//!
//! Decodes a serialized payload into a [`DecodedMessage`] using a parsed
//! schema, in either wire format.

use crate::core::{ConvertError, DecodedMessage, FieldValue, Result, WireFormat};
use crate::schema::{FieldType, MessageSchema, PrimitiveType};

use super::cursor::WireCursor;

/// Maximum allowed array length to prevent OOM on corrupt length prefixes.
const MAX_ARRAY_LENGTH: usize = 10_000_000;

/// Decode a serialized payload into field values.
///
/// Returns the decoded message and the number of payload bytes consumed
/// (header and alignment padding included); callers that require the
/// whole payload to be accounted for compare this against the payload
/// length.
pub fn decode_message(
    schema: &MessageSchema,
    type_name: &str,
    data: &[u8],
    format: WireFormat,
) -> Result<(DecodedMessage, usize)> {
    let mut cursor = WireCursor::new(data, format)?;
    let message = decode_struct(schema, type_name, &mut cursor)?;
    Ok((message, cursor.position()))
}

fn decode_struct(
    schema: &MessageSchema,
    type_name: &str,
    cursor: &mut WireCursor<'_>,
) -> Result<DecodedMessage> {
    let msg_type = schema
        .get_type_variants(type_name)
        .ok_or_else(|| ConvertError::type_not_found(type_name))?;

    let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
    for field in &msg_type.fields {
        let value = decode_field(schema, &field.type_name, cursor).map_err(|e| {
            ConvertError::parse(
                format!("field '{}' of '{}'", field.name, msg_type.name),
                e.to_string(),
            )
        })?;
        message.insert(field.name.clone(), value);
    }
    Ok(message)
}

fn decode_field(
    schema: &MessageSchema,
    field_type: &FieldType,
    cursor: &mut WireCursor<'_>,
) -> Result<FieldValue> {
    match field_type {
        FieldType::Primitive(prim) => decode_primitive(*prim, cursor),
        FieldType::Array { base_type, size } => {
            let count = match size {
                Some(n) => *n,
                None => cursor.read_u32()? as usize,
            };
            if count > MAX_ARRAY_LENGTH {
                return Err(ConvertError::length_exceeded(
                    count,
                    cursor.position(),
                    cursor.position() + cursor.remaining(),
                ));
            }

            // Fast path: uint8/byte arrays become a blob
            if base_type.is_byte_sized() {
                return Ok(FieldValue::Bytes(cursor.read_bytes(count)?.to_vec()));
            }

            // Lower bound of one byte per element keeps corrupt counts
            // from pre-allocating unbounded memory.
            if count > cursor.remaining() {
                return Err(ConvertError::length_exceeded(
                    count,
                    cursor.position(),
                    cursor.position() + cursor.remaining(),
                ));
            }

            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_field(schema, base_type, cursor)?);
            }
            Ok(FieldValue::Array(items))
        }
        FieldType::Nested(name) => Ok(FieldValue::Struct(decode_struct(schema, name, cursor)?)),
    }
}

fn decode_primitive(prim: PrimitiveType, cursor: &mut WireCursor<'_>) -> Result<FieldValue> {
    Ok(match prim {
        PrimitiveType::Bool => FieldValue::Bool(cursor.read_bool()?),
        PrimitiveType::Int8 | PrimitiveType::Char => FieldValue::Int8(cursor.read_i8()?),
        PrimitiveType::Int16 => FieldValue::Int16(cursor.read_i16()?),
        PrimitiveType::Int32 => FieldValue::Int32(cursor.read_i32()?),
        PrimitiveType::Int64 => FieldValue::Int64(cursor.read_i64()?),
        PrimitiveType::UInt8 | PrimitiveType::Byte => FieldValue::UInt8(cursor.read_u8()?),
        PrimitiveType::UInt16 => FieldValue::UInt16(cursor.read_u16()?),
        PrimitiveType::UInt32 => FieldValue::UInt32(cursor.read_u32()?),
        PrimitiveType::UInt64 => FieldValue::UInt64(cursor.read_u64()?),
        PrimitiveType::Float32 => FieldValue::Float32(cursor.read_f32()?),
        PrimitiveType::Float64 => FieldValue::Float64(cursor.read_f64()?),
        PrimitiveType::String => FieldValue::String(cursor.read_string()?),
        PrimitiveType::Time => {
            let sec = cursor.read_u32()?;
            let nsec = cursor.read_u32()?;
            FieldValue::Time { sec, nsec }
        }
        PrimitiveType::Duration => {
            let sec = cursor.read_i32()?;
            let nsec = cursor.read_i32()?;
            FieldValue::Duration { sec, nsec }
        }
    })
}
