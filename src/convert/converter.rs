// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Two-phase bag conversion orchestrator.
//!
//! Phase 1 maps every source connection and registers every retained
//! type's schema; phase 2 streams messages one at a time, transcoding
//! and writing in source order. The phase separation guarantees the
//! streaming loop performs no catalog I/O and no schema parsing.
//!
//! There is no partial-success state: a run either completes or aborts,
//! and on abort the destination container is invalid and must be
//! discarded by the caller.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalog::DefinitionCatalog;
use crate::convert::mapper::{ConnectionMapper, MapEntry, MapOutcome};
use crate::core::{ConvertError, ConvertPhase, Result, WireFormat};
use crate::encoding::PayloadTranscoder;
use crate::io::{BagSink, BagSource};
use crate::schema::TypeRegistry;

/// Statistics from one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Source connections enumerated
    pub source_connections: u64,
    /// Source connections skipped for lack of a schema definition
    pub connections_skipped: u64,
    /// Deduplicated target connections created
    pub target_connections: u64,
    /// Messages read from the source
    pub messages_read: u64,
    /// Messages written to the destination
    pub messages_written: u64,
    /// Messages dropped because their connection was skipped
    pub messages_skipped: u64,
}

/// Apply the destination default and the exists pre-flight check.
///
/// The default destination is the source path with its container-format
/// suffix removed. Runs before any I/O against the source; an existing
/// destination is fatal.
pub fn resolve_destination(src: &Path, dst: Option<&Path>) -> Result<PathBuf> {
    let dst = match dst {
        Some(path) => path.to_path_buf(),
        None => src.with_extension(""),
    };
    if dst.exists() {
        return Err(ConvertError::destination_exists(dst));
    }
    Ok(dst)
}

/// Converts one source bag into one destination bag.
///
/// Owns all per-run state: the definition catalog cache, the type
/// registry, the connection mapper with its id counter, and the
/// statistics. One active conversion per value; state resets on each
/// [`BagConverter::convert`] call.
pub struct BagConverter<C> {
    catalog: C,
    registry: TypeRegistry,
    mapper: ConnectionMapper,
    stats: ConvertStats,
}

impl<C: DefinitionCatalog> BagConverter<C> {
    /// Create a converter over a definition catalog.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            registry: TypeRegistry::new(),
            mapper: ConnectionMapper::new(),
            stats: ConvertStats::default(),
        }
    }

    /// Run the full two-phase conversion.
    pub fn convert<S: BagSource, W: BagSink>(
        &mut self,
        source: &mut S,
        sink: &mut W,
    ) -> Result<ConvertStats> {
        self.registry = TypeRegistry::new();
        self.mapper = ConnectionMapper::new();
        self.stats = ConvertStats::default();

        self.map_connections(source, sink)?;
        self.stream_messages(source, sink)?;

        info!(
            connections = self.stats.source_connections,
            skipped = self.stats.connections_skipped,
            written = self.stats.messages_written,
            "Conversion complete"
        );
        Ok(self.stats.clone())
    }

    /// Get the target connections created so far, in creation order.
    pub fn target_connections(&self) -> &[crate::convert::TargetConnection] {
        self.mapper.targets()
    }

    /// Phase 1: map connections and register schemas.
    fn map_connections<S: BagSource, W: BagSink>(
        &mut self,
        source: &S,
        sink: &mut W,
    ) -> Result<()> {
        info!("Mapping source connections");
        for sconn in source.connections() {
            self.stats.source_connections += 1;
            match self.mapper.map(&mut self.catalog, sconn)? {
                MapOutcome::Retained { index, created } => {
                    let target = self.mapper.target(index);
                    self.registry.register(&target.msgtype, &target.msgdef)?;
                    if created {
                        sink.add_connection(target)
                            .map_err(|e| e.with_phase(ConvertPhase::WritingDestination))?;
                        self.stats.target_connections += 1;
                    }
                }
                MapOutcome::Skipped => {
                    self.stats.connections_skipped += 1;
                }
            }
        }
        Ok(())
    }

    /// Phase 2: stream, transcode, and write messages in source order.
    fn stream_messages<S: BagSource, W: BagSink>(
        &mut self,
        source: &mut S,
        sink: &mut W,
    ) -> Result<()> {
        info!("Streaming messages");
        let transcoder = PayloadTranscoder::new(&self.registry);

        let stream = source
            .messages()
            .map_err(|e| e.with_phase(ConvertPhase::ReadingSource))?;

        for item in stream {
            let record = item.map_err(|e| e.with_phase(ConvertPhase::ReadingSource))?;
            self.stats.messages_read += 1;

            let entry = self.mapper.lookup(record.connection_id).ok_or_else(|| {
                ConvertError::io(
                    "source bag",
                    format!(
                        "message references unknown connection {}",
                        record.connection_id
                    ),
                )
                .with_phase(ConvertPhase::ReadingSource)
            })?;

            let index = match entry {
                MapEntry::Skipped => {
                    self.stats.messages_skipped += 1;
                    continue;
                }
                MapEntry::Retained(index) => index,
            };

            let target = self.mapper.target(index);
            let payload = transcoder
                .transcode(
                    &record.payload,
                    &target.msgtype,
                    &target.topic,
                    WireFormat::Cdr,
                    WireFormat::Ros1,
                )
                .map_err(|e| e.with_phase(ConvertPhase::ConvertingMessage))?;

            sink.write(target, record.timestamp, &payload)
                .map_err(|e| e.with_phase(ConvertPhase::WritingDestination))?;
            self.stats.messages_written += 1;
        }
        Ok(())
    }
}
