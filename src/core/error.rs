// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rebag.
//!
//! One unified error covers the whole conversion pipeline:
//! - Catalog resolution and schema registration
//! - Wire-format decoding and encoding
//! - Reader/Writer collaborator failures, wrapped with a phase label

use std::fmt;
use std::path::PathBuf;

/// Conversion phase used to label fatal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    /// Reading connections or messages from the source bag
    ReadingSource,
    /// Transcoding a message payload between wire formats
    ConvertingMessage,
    /// Writing connections or messages to the destination bag
    WritingDestination,
}

impl ConvertPhase {
    /// Get the human-readable phase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConvertPhase::ReadingSource => "reading source bag",
            ConvertPhase::ConvertingMessage => "converting message",
            ConvertPhase::WritingDestination => "writing destination bag",
        }
    }
}

impl fmt::Display for ConvertPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during a bag conversion run.
///
/// Every variant is fatal to the run except where the caller explicitly
/// models a soft outcome (a missing schema definition is reported as
/// `Ok(None)` by the catalog, not as an error).
#[derive(Debug, Clone)]
pub enum ConvertError {
    /// Schema text exists in the catalog but its checksum artifact is
    /// missing or unusable.
    MissingChecksum {
        /// Normalized message type name
        msgtype: String,
    },

    /// The same type was registered twice with different schema text.
    SchemaConflict {
        /// Normalized message type name
        msgtype: String,
    },

    /// Parse error in schema text.
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Type not found in the registry.
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Buffer too short for requested read.
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the error occurred
        position: usize,
    },

    /// Array or sequence length exceeded data bounds.
    LengthExceeded {
        /// Length that was read
        length: usize,
        /// Position in buffer
        position: usize,
        /// Buffer length
        buffer_len: usize,
    },

    /// Encoding error while writing a payload.
    EncodeError {
        /// Wire format context (e.g. "CDR", "ROS1")
        codec: String,
        /// Error message
        message: String,
    },

    /// A message payload did not match what its schema predicts.
    TranscodeFailed {
        /// Normalized message type name
        msgtype: String,
        /// Topic the message was recorded on
        topic: String,
        /// Underlying cause
        cause: String,
    },

    /// The destination path already exists.
    DestinationExists {
        /// Offending path
        path: PathBuf,
    },

    /// I/O failure from a collaborator or the catalog store.
    Io {
        /// What was being accessed
        context: String,
        /// Error message
        message: String,
    },

    /// A fatal error wrapped with the conversion phase it occurred in.
    Phase {
        /// Conversion phase label
        phase: ConvertPhase,
        /// Underlying error
        cause: Box<ConvertError>,
    },

    /// Other error
    Other(String),
}

impl ConvertError {
    /// Create a missing-checksum error.
    pub fn missing_checksum(msgtype: impl Into<String>) -> Self {
        ConvertError::MissingChecksum {
            msgtype: msgtype.into(),
        }
    }

    /// Create a schema-conflict error.
    pub fn schema_conflict(msgtype: impl Into<String>) -> Self {
        ConvertError::SchemaConflict {
            msgtype: msgtype.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        ConvertError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        ConvertError::BufferTooShort {
            requested,
            available,
            position,
        }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, position: usize, buffer_len: usize) -> Self {
        ConvertError::LengthExceeded {
            length,
            position,
            buffer_len,
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a transcode failure carrying message context.
    pub fn transcode(
        msgtype: impl Into<String>,
        topic: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        ConvertError::TranscodeFailed {
            msgtype: msgtype.into(),
            topic: topic.into(),
            cause: cause.into(),
        }
    }

    /// Create a destination-exists error.
    pub fn destination_exists(path: impl Into<PathBuf>) -> Self {
        ConvertError::DestinationExists { path: path.into() }
    }

    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::Io {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Wrap this error with a conversion phase label.
    ///
    /// Wrapping an already-wrapped error keeps the innermost label.
    pub fn with_phase(self, phase: ConvertPhase) -> Self {
        match self {
            ConvertError::Phase { .. } => self,
            other => ConvertError::Phase {
                phase,
                cause: Box::new(other),
            },
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ConvertError::MissingChecksum { msgtype } => vec![("type", msgtype.clone())],
            ConvertError::SchemaConflict { msgtype } => vec![("type", msgtype.clone())],
            ConvertError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            ConvertError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            ConvertError::BufferTooShort {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            ConvertError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            ConvertError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            ConvertError::TranscodeFailed {
                msgtype,
                topic,
                cause,
            } => vec![
                ("type", msgtype.clone()),
                ("topic", topic.clone()),
                ("cause", cause.clone()),
            ],
            ConvertError::DestinationExists { path } => {
                vec![("path", path.display().to_string())]
            }
            ConvertError::Io { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            ConvertError::Phase { phase, cause } => {
                let mut fields = vec![("phase", phase.as_str().to_string())];
                fields.extend(cause.log_fields());
                fields
            }
            ConvertError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MissingChecksum { msgtype } => {
                write!(f, "Missing checksum artifact for type '{msgtype}'")
            }
            ConvertError::SchemaConflict { msgtype } => {
                write!(
                    f,
                    "Conflicting schema registration for type '{msgtype}': schema text differs"
                )
            }
            ConvertError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            ConvertError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            ConvertError::BufferTooShort {
                requested,
                available,
                position,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available"
            ),
            ConvertError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => write!(
                f,
                "Length {length} exceeds buffer at position {position} (buffer length: {buffer_len})"
            ),
            ConvertError::EncodeError { codec, message } => {
                write!(f, "{codec} encode error: {message}")
            }
            ConvertError::TranscodeFailed {
                msgtype,
                topic,
                cause,
            } => write!(
                f,
                "Failed to transcode message on '{topic}' ({msgtype}): {cause}"
            ),
            ConvertError::DestinationExists { path } => {
                write!(f, "Output path '{}' exists already", path.display())
            }
            ConvertError::Io { context, message } => {
                write!(f, "I/O error in {context}: {message}")
            }
            ConvertError::Phase { phase, cause } => {
                write!(f, "Error while {phase}: {cause}")
            }
            ConvertError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io {
            context: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for rebag operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
