// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core traits for the container Reader/Writer collaborators.
//!
//! Container file parsing, chunked storage, and on-disk indexing live
//! behind these traits; the conversion pipeline only ever sees
//! enumerated connections and a message stream.

use crate::convert::{SourceConnection, TargetConnection};
use crate::core::Result;

/// One recorded message, produced by the source reader.
///
/// Transient: the streaming loop never holds more than one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Source connection id this message was recorded on
    pub connection_id: u32,
    /// Receive timestamp in nanoseconds
    pub timestamp: u64,
    /// Serialized payload bytes
    pub payload: Vec<u8>,
}

impl MessageRecord {
    /// Create a message record.
    pub fn new(connection_id: u32, timestamp: u64, payload: Vec<u8>) -> Self {
        Self {
            connection_id,
            timestamp,
            payload,
        }
    }
}

/// Iterator over source messages in file-recorded order.
pub type MessageStream<'a> = Box<dyn Iterator<Item = Result<MessageRecord>> + 'a>;

/// Trait for reading a source container.
pub trait BagSource {
    /// Enumerate all connections in the container.
    fn connections(&self) -> &[SourceConnection];

    /// Produce the finite message sequence in file-recorded order.
    ///
    /// Called once per conversion run, after connection enumeration.
    fn messages(&mut self) -> Result<MessageStream<'_>>;
}

/// Trait for writing the destination container.
pub trait BagSink {
    /// Persist a newly created target connection.
    ///
    /// The connection id was already allocated by the mapper's per-run
    /// counter; implementations must store it as-is.
    fn add_connection(&mut self, connection: &TargetConnection) -> Result<()>;

    /// Write one message against a previously added connection.
    fn write(
        &mut self,
        connection: &TargetConnection,
        timestamp: u64,
        payload: &[u8],
    ) -> Result<()>;
}
