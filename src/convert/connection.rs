// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Connection records for both container formats.
//!
//! A connection binds one topic to one message type within a container.
//! Source connections come from the rosbag2 reader; target connections
//! are generated during mapping and persisted by the rosbag1 writer.

/// A topic+type binding read from the source container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConnection {
    /// Connection id, unique within the source container
    pub id: u32,
    /// Topic name
    pub topic: String,
    /// Normalized message type name (e.g., "sensor_msgs/msg/LaserScan")
    pub msgtype: String,
    /// Offered QoS profiles as recorded; empty means none declared
    pub qos_profiles: String,
}

impl SourceConnection {
    /// Create a source connection record.
    pub fn new(
        id: u32,
        topic: impl Into<String>,
        msgtype: impl Into<String>,
        qos_profiles: impl Into<String>,
    ) -> Self {
        Self {
            id,
            topic: topic.into(),
            msgtype: msgtype.into(),
            qos_profiles: qos_profiles.into(),
        }
    }
}

/// A topic+type binding generated for the destination container.
///
/// Ids come from the per-run monotonic counter owned by the mapper,
/// starting at 0. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConnection {
    /// Connection id, allocated per run starting at 0
    pub id: u32,
    /// Topic name, copied verbatim from the source connection
    pub topic: String,
    /// Message type name, copied verbatim from the source connection
    pub msgtype: String,
    /// Resolved schema text
    pub msgdef: String,
    /// Resolved schema checksum
    pub md5sum: String,
    /// Publisher caller id; always absent on generated connections
    pub caller_id: Option<String>,
    /// Latching flag, derived from the source QoS profiles
    pub latching: bool,
}

/// Attribute tuple identifying equivalent target connections.
///
/// Two candidates with equal keys collapse to one output connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionKey {
    topic: String,
    msgtype: String,
    msgdef: String,
    md5sum: String,
    caller_id: Option<String>,
    latching: bool,
}

impl ConnectionKey {
    /// Build the dedup key for a target connection.
    pub fn of(conn: &TargetConnection) -> Self {
        Self {
            topic: conn.topic.clone(),
            msgtype: conn.msgtype.clone(),
            msgdef: conn.msgdef.clone(),
            md5sum: conn.md5sum.clone(),
            caller_id: conn.caller_id.clone(),
            latching: conn.latching,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, latching: bool) -> TargetConnection {
        TargetConnection {
            id,
            topic: "/scan".to_string(),
            msgtype: "sensor_msgs/msg/LaserScan".to_string(),
            msgdef: "float32[] ranges".to_string(),
            md5sum: "abcd".to_string(),
            caller_id: None,
            latching,
        }
    }

    #[test]
    fn test_connection_key_ignores_id() {
        let a = target(0, true);
        let b = target(7, true);
        assert_eq!(ConnectionKey::of(&a), ConnectionKey::of(&b));
    }

    #[test]
    fn test_connection_key_distinguishes_latching() {
        let a = target(0, true);
        let b = target(0, false);
        assert_ne!(ConnectionKey::of(&a), ConnectionKey::of(&b));
    }

    #[test]
    fn test_source_connection_new() {
        let conn = SourceConnection::new(3, "/scan", "sensor_msgs/msg/LaserScan", "");
        assert_eq!(conn.id, 3);
        assert!(conn.qos_profiles.is_empty());
    }
}
