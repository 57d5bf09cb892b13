// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-memory container implementations.
//!
//! Back the Reader/Writer collaborator traits with plain vectors, for
//! tests and for embedders that assemble recordings in memory.

use crate::convert::{SourceConnection, TargetConnection};
use crate::core::Result;

use super::traits::{BagSink, BagSource, MessageRecord, MessageStream};

/// In-memory source container.
#[derive(Debug, Clone, Default)]
pub struct MemoryBag {
    connections: Vec<SourceConnection>,
    messages: Vec<MessageRecord>,
}

impl MemoryBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection record.
    pub fn add_connection(&mut self, connection: SourceConnection) {
        self.connections.push(connection);
    }

    /// Append a message in recorded order.
    pub fn push_message(&mut self, connection_id: u32, timestamp: u64, payload: Vec<u8>) {
        self.messages
            .push(MessageRecord::new(connection_id, timestamp, payload));
    }

    /// Get the number of recorded messages.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl BagSource for MemoryBag {
    fn connections(&self) -> &[SourceConnection] {
        &self.connections
    }

    fn messages(&mut self) -> Result<MessageStream<'_>> {
        Ok(Box::new(self.messages.iter().cloned().map(Ok)))
    }
}

/// In-memory destination container.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    connections: Vec<TargetConnection>,
    messages: Vec<(u32, u64, Vec<u8>)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the persisted target connections, in creation order.
    pub fn connections(&self) -> &[TargetConnection] {
        &self.connections
    }

    /// Get the written messages as `(connection id, timestamp, payload)`,
    /// in write order.
    pub fn messages(&self) -> &[(u32, u64, Vec<u8>)] {
        &self.messages
    }
}

impl BagSink for MemorySink {
    fn add_connection(&mut self, connection: &TargetConnection) -> Result<()> {
        self.connections.push(connection.clone());
        Ok(())
    }

    fn write(
        &mut self,
        connection: &TargetConnection,
        timestamp: u64,
        payload: &[u8],
    ) -> Result<()> {
        self.messages
            .push((connection.id, timestamp, payload.to_vec()));
        Ok(())
    }
}
