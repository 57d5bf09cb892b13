// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Filesystem catalog tests.
//!
//! Runs the conversion pipeline against a definition store on disk,
//! covering the store layout, checksum first-line handling, and the
//! missing-artifact behaviors.

mod common;

use std::fs;
use std::path::Path;

use rebag::catalog::FsCatalog;
use rebag::convert::{BagConverter, SourceConnection};
use rebag::io::{MemoryBag, MemorySink};
use rebag::ConvertError;

use common::*;

fn write_store_type(root: &Path, dir_name: &str, msgdef: Option<&str>, md5sum: Option<&str>) {
    let dir = root.join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    if let Some(text) = msgdef {
        fs::write(dir.join("msgdef.txt"), text).unwrap();
    }
    if let Some(text) = md5sum {
        fs::write(dir.join("md5sum.txt"), text).unwrap();
    }
}

#[test]
fn test_conversion_with_fs_store() {
    let root = temp_dir("fs_store");
    let _guard = CleanupGuard(root.clone());
    // Store paths use rosbag1 type naming, without the /msg/ infix.
    write_store_type(
        &root,
        "std_msgs/String",
        Some(STD_MSGS_STRING_DEF),
        Some(&format!("{STD_MSGS_STRING_MD5}\n")),
    );

    let mut source = MemoryBag::new();
    source.add_connection(SourceConnection::new(0, "/chatter", "std_msgs/msg/String", ""));
    source.push_message(0, 100, cdr_string_payload("from disk"));

    let mut sink = MemorySink::new();
    let stats = BagConverter::new(FsCatalog::new(&root))
        .convert(&mut source, &mut sink)
        .unwrap();

    assert_eq!(stats.messages_written, 1);
    assert_eq!(sink.connections()[0].md5sum, STD_MSGS_STRING_MD5);
    assert_eq!(sink.messages()[0].2, ros1_string_payload("from disk"));
}

#[test]
fn test_checksum_first_line_only() {
    let root = temp_dir("fs_store_multiline");
    let _guard = CleanupGuard(root.clone());
    write_store_type(
        &root,
        "std_msgs/String",
        Some(STD_MSGS_STRING_DEF),
        Some(&format!("{STD_MSGS_STRING_MD5}\ngenerated by gendeps\n")),
    );

    let mut source = MemoryBag::new();
    source.add_connection(SourceConnection::new(0, "/chatter", "std_msgs/msg/String", ""));

    let mut sink = MemorySink::new();
    BagConverter::new(FsCatalog::new(&root))
        .convert(&mut source, &mut sink)
        .unwrap();

    assert_eq!(sink.connections()[0].md5sum, STD_MSGS_STRING_MD5);
}

#[test]
fn test_store_missing_type_skips() {
    let root = temp_dir("fs_store_missing");
    fs::create_dir_all(&root).unwrap();
    let _guard = CleanupGuard(root.clone());

    let mut source = MemoryBag::new();
    source.add_connection(SourceConnection::new(
        0,
        "/mystery",
        "unknown_msgs/msg/Thing",
        "",
    ));
    source.push_message(0, 10, vec![0x00, 0x01, 0x00, 0x00]);

    let mut sink = MemorySink::new();
    let stats = BagConverter::new(FsCatalog::new(&root))
        .convert(&mut source, &mut sink)
        .unwrap();

    assert_eq!(stats.connections_skipped, 1);
    assert_eq!(stats.messages_skipped, 1);
    assert!(sink.connections().is_empty());
    assert!(sink.messages().is_empty());
}

#[test]
fn test_store_missing_checksum_aborts() {
    let root = temp_dir("fs_store_nosum");
    let _guard = CleanupGuard(root.clone());
    write_store_type(&root, "std_msgs/String", Some(STD_MSGS_STRING_DEF), None);

    let mut source = MemoryBag::new();
    source.add_connection(SourceConnection::new(0, "/chatter", "std_msgs/msg/String", ""));

    let mut sink = MemorySink::new();
    let result = BagConverter::new(FsCatalog::new(&root)).convert(&mut source, &mut sink);

    assert!(matches!(
        result,
        Err(ConvertError::MissingChecksum { .. })
    ));
    assert!(sink.connections().is_empty());
}

#[test]
fn test_store_with_dependency_schema() {
    let root = temp_dir("fs_store_scan");
    let _guard = CleanupGuard(root.clone());
    write_store_type(
        &root,
        "sensor_msgs/LaserScan",
        Some(LASER_SCAN_DEF),
        Some(&format!("{LASER_SCAN_MD5}\n")),
    );

    let mut source = MemoryBag::new();
    source.add_connection(SourceConnection::new(
        0,
        "/scan",
        "sensor_msgs/msg/LaserScan",
        "",
    ));
    source.push_message(0, 50, cdr_laser_scan_payload(5, "laser", &[2.5]));

    let mut sink = MemorySink::new();
    let stats = BagConverter::new(FsCatalog::new(&root))
        .convert(&mut source, &mut sink)
        .unwrap();

    assert_eq!(stats.messages_written, 1);
    assert_eq!(
        sink.messages()[0].2,
        ros1_laser_scan_payload(5, "laser", &[2.5])
    );
}
