//! Snapshot encodings: JSON for save files, bincode for compact storage.
//!
//! Decoding never touches a live match. Pair a decode with
//! [`TurnEngine::import_state`] to restore one.

use std::io::{Read, Write};

use super::snapshot::MatchSnapshot;
use crate::core::error::SnapshotError;
use crate::rules::TurnEngine;

pub fn to_json(snapshot: &MatchSnapshot) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| SnapshotError::Encode(e.to_string()))
}

pub fn from_json(json: &str) -> Result<MatchSnapshot, SnapshotError> {
    serde_json::from_str(json).map_err(|e| SnapshotError::Decode(e.to_string()))
}

pub fn to_bytes(snapshot: &MatchSnapshot) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(snapshot).map_err(|e| SnapshotError::Encode(e.to_string()))
}

pub fn from_bytes(bytes: &[u8]) -> Result<MatchSnapshot, SnapshotError> {
    bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
}

/// Write a snapshot as JSON.
pub fn write_json<W: Write>(snapshot: &MatchSnapshot, mut writer: W) -> Result<(), SnapshotError> {
    serde_json::to_writer_pretty(&mut writer, snapshot).map_err(|e| SnapshotError::Encode(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Read a JSON snapshot.
pub fn read_json<R: Read>(mut reader: R) -> Result<MatchSnapshot, SnapshotError> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    from_json(&json)
}

/// Save a running match as JSON.
pub fn save_match<W: Write>(engine: &TurnEngine, writer: W) -> Result<(), SnapshotError> {
    write_json(&engine.export_state(), writer)
}

/// Decode a JSON snapshot and restore it into `engine`.
///
/// A decode or validation failure leaves `engine` untouched.
pub fn load_match<R: Read>(engine: &mut TurnEngine, reader: R) -> Result<(), SnapshotError> {
    let snapshot = read_json(reader).map_err(|err| {
        log::warn!("snapshot load failed: {err}");
        err
    })?;
    engine.import_state(&snapshot)
}
