// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Rebag
//!
//! Offline converter for rosbag2 recordings into rosbag1 format.
//!
//! The conversion keeps topics, timestamps, and message order intact and
//! re-encodes every payload from CDR to ROS1 serialization using schema
//! text resolved from a local definition catalog.
//!
//! ## Architecture
//!
//! The library is organized by layer:
//! - `catalog/` - message definition resolution (filesystem or in-memory)
//! - `schema/` - `.msg` schema AST, Pest parser, and the per-run registry
//! - `encoding/` - wire cursors and the CDR ↔ ROS1 payload transcoder
//! - `convert/` - connection mapping and the two-phase conversion engine
//! - `io/` - Reader/Writer collaborator traits for the container formats
//!
//! A run has two phases: first every source connection is resolved
//! against the catalog, deduplicated, and its type registered; then
//! messages stream through one at a time, transcoded and written in
//! source order. A type without schema text in the catalog is skipped
//! (with all its messages); every other failure aborts the run.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rebag::catalog::MemoryCatalog;
//! use rebag::convert::{BagConverter, SourceConnection};
//! use rebag::io::{MemoryBag, MemorySink};
//!
//! let mut catalog = MemoryCatalog::new();
//! catalog.insert(
//!     "std_msgs/msg/String",
//!     "string data",
//!     "992ce8a1687cec8c8bd883ec73ca41d1",
//! );
//!
//! let mut source = MemoryBag::new();
//! source.add_connection(SourceConnection::new(0, "/chatter", "std_msgs/msg/String", ""));
//! source.push_message(0, 1_000, {
//!     let mut payload = vec![0x00, 0x01, 0x00, 0x00];
//!     payload.extend_from_slice(&3u32.to_le_bytes());
//!     payload.extend_from_slice(b"hi\0");
//!     payload
//! });
//!
//! let mut sink = MemorySink::new();
//! let stats = BagConverter::new(catalog).convert(&mut source, &mut sink)?;
//! assert_eq!(stats.messages_written, 1);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{ConvertError, ConvertPhase, DecodedMessage, FieldValue, Result, WireFormat};

// Definition catalog
pub mod catalog;

pub use catalog::{Definition, DefinitionCatalog, FsCatalog, MemoryCatalog};

// Schema parsing and registry
pub mod schema;

pub use schema::{parse_schema, MessageSchema, TypeRegistry};

// Wire-format encoding/decoding
pub mod encoding;

pub use encoding::PayloadTranscoder;

// Conversion pipeline
pub mod convert;

pub use convert::{
    resolve_destination, BagConverter, ConnectionMapper, ConvertStats, SourceConnection,
    TargetConnection,
};

// Container I/O seam
pub mod io;

pub use io::{BagSink, BagSource, MemoryBag, MemorySink, MessageRecord};
