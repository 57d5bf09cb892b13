// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Source-to-target connection mapping.
//!
//! Maps each source connection to a deduplicated target connection using
//! catalog lookups, and records the outcome in the per-run mapping table
//! consumed by the streaming phase.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::catalog::DefinitionCatalog;
use crate::convert::connection::{ConnectionKey, SourceConnection, TargetConnection};
use crate::core::Result;

/// Outcome of mapping one source connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    /// Mapped onto a target connection (index into [`ConnectionMapper::targets`]).
    Retained {
        /// Index of the target connection
        index: usize,
        /// Whether this call created the target connection
        created: bool,
    },
    /// No schema definition for the type; the connection and all its
    /// messages are skipped.
    Skipped,
}

/// Mapping-table entry for one source connection id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEntry {
    /// Messages flow to the target connection at this index.
    Retained(usize),
    /// Messages are dropped.
    Skipped,
}

/// Maps source connections to deduplicated target connections.
///
/// Owns the per-run monotonic id counter (fresh ids start at 0) and the
/// mapping table. One mapper per conversion run; never share across runs.
#[derive(Debug, Default)]
pub struct ConnectionMapper {
    targets: Vec<TargetConnection>,
    dedup: HashMap<ConnectionKey, usize>,
    mapping: HashMap<u32, MapEntry>,
    next_id: u32,
}

impl ConnectionMapper {
    /// Create a mapper with a fresh id counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map one source connection, in source iteration order.
    ///
    /// Resolves the schema through the catalog; a missing definition
    /// skips the connection (soft), a missing checksum aborts the run.
    pub fn map<C: DefinitionCatalog>(
        &mut self,
        catalog: &mut C,
        source: &SourceConnection,
    ) -> Result<MapOutcome> {
        let definition = match catalog.resolve(&source.msgtype)? {
            Some(definition) => definition,
            None => {
                warn!(
                    topic = %source.topic,
                    msgtype = %source.msgtype,
                    "No definition for type, skipping connection"
                );
                self.mapping.insert(source.id, MapEntry::Skipped);
                return Ok(MapOutcome::Skipped);
            }
        };

        // Any declared QoS profile text is treated as intent to latch.
        let latching = !source.qos_profiles.is_empty();

        let candidate = TargetConnection {
            id: self.next_id,
            topic: source.topic.clone(),
            msgtype: source.msgtype.clone(),
            msgdef: definition.msgdef,
            md5sum: definition.md5sum,
            caller_id: None,
            latching,
        };

        let key = ConnectionKey::of(&candidate);
        let (index, created) = match self.dedup.get(&key) {
            Some(&index) => (index, false),
            None => {
                let index = self.targets.len();
                self.next_id += 1;
                self.dedup.insert(key, index);
                self.targets.push(candidate);
                (index, true)
            }
        };

        info!(
            topic = %source.topic,
            msgtype = %source.msgtype,
            target_id = self.targets[index].id,
            created,
            "Mapped connection"
        );

        self.mapping.insert(source.id, MapEntry::Retained(index));
        Ok(MapOutcome::Retained { index, created })
    }

    /// Look up the mapping-table entry for a source connection id.
    pub fn lookup(&self, source_id: u32) -> Option<MapEntry> {
        self.mapping.get(&source_id).copied()
    }

    /// Get a target connection by index.
    pub fn target(&self, index: usize) -> &TargetConnection {
        &self.targets[index]
    }

    /// Get all created target connections, in creation order.
    pub fn targets(&self) -> &[TargetConnection] {
        &self.targets
    }
}
