// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Payload transcoder between wire formats.
//!
//! Decodes a payload with the schema registered for its type and
//! immediately re-encodes it in the other wire format. Field values are
//! carried through unchanged; only framing, alignment, and string
//! conventions differ between the two encodings.

use crate::core::{ConvertError, Result, WireFormat};
use crate::schema::TypeRegistry;

use super::decoder::decode_message;
use super::encoder::encode_message;

/// CDR payloads may end on up to 3 bytes of alignment padding.
const CDR_TRAILING_PADDING: usize = 3;

/// Transcoder over the schemas registered for one conversion run.
///
/// Holds no per-message state; every call decodes and re-encodes exactly
/// one payload.
pub struct PayloadTranscoder<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> PayloadTranscoder<'a> {
    /// Create a transcoder over a registry.
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Transcode one payload between wire formats.
    ///
    /// The type must have been registered before streaming starts; the
    /// topic is carried for error context only.
    pub fn transcode(
        &self,
        payload: &[u8],
        msgtype: &str,
        topic: &str,
        from: WireFormat,
        to: WireFormat,
    ) -> Result<Vec<u8>> {
        let schema = self
            .registry
            .get(msgtype)
            .ok_or_else(|| ConvertError::type_not_found(msgtype))?;

        let (message, consumed) = decode_message(schema, msgtype, payload, from)
            .map_err(|e| ConvertError::transcode(msgtype, topic, e.to_string()))?;

        // A payload longer than its schema predicts is corrupt, modulo
        // the trailing alignment padding CDR encoders may emit.
        let tolerated = if from.has_encapsulation() {
            CDR_TRAILING_PADDING
        } else {
            0
        };
        let trailing = payload.len() - consumed;
        if trailing > tolerated {
            return Err(ConvertError::transcode(
                msgtype,
                topic,
                format!("payload has {trailing} bytes beyond the schema layout"),
            ));
        }

        encode_message(schema, msgtype, &message, to)
            .map_err(|e| ConvertError::transcode(msgtype, topic, e.to_string()))
    }

    /// Transcode a CDR payload (rosbag2) into ROS1 serialization (rosbag1).
    pub fn cdr_to_ros1(&self, payload: &[u8], msgtype: &str, topic: &str) -> Result<Vec<u8>> {
        self.transcode(payload, msgtype, topic, WireFormat::Cdr, WireFormat::Ros1)
    }

    /// Transcode a ROS1 payload (rosbag1) into CDR (rosbag2).
    pub fn ros1_to_cdr(&self, payload: &[u8], msgtype: &str, topic: &str) -> Result<Vec<u8>> {
        self.transcode(payload, msgtype, topic, WireFormat::Ros1, WireFormat::Cdr)
    }
}
