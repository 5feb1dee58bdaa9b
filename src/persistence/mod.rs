//! Persistence adapter.
//!
//! The engine exposes a pure [`MatchSnapshot`] through
//! `TurnEngine::export_state` / `TurnEngine::import_state`. This module owns
//! the data contract and its encodings:
//! - JSON via `serde_json` (save files, human-readable)
//! - binary via `bincode` (compact storage)
//!
//! ```
//! use ludo_engine::core::MatchConfig;
//! use ludo_engine::persistence::{from_json, to_json};
//! use ludo_engine::rules::TurnEngine;
//!
//! let engine = TurnEngine::new(MatchConfig::classic(2).unwrap());
//! let json = to_json(&engine.export_state()).unwrap();
//!
//! let mut restored = TurnEngine::new(MatchConfig::classic(2).unwrap());
//! restored.import_state(&from_json(&json).unwrap()).unwrap();
//! assert_eq!(restored.export_state(), engine.export_state());
//! ```

mod codec;
mod snapshot;

pub use codec::{from_bytes, from_json, load_match, read_json, save_match, to_bytes, to_json, write_json};
pub use snapshot::{MatchSnapshot, ThrowLog, TokenSnapshot, SNAPSHOT_VERSION};
