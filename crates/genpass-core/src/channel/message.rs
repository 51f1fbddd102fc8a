//! Channel message shapes.

use serde::Serialize;
use serde_json::Value;

use crate::config::lenient_uint;

/// Outcome of handling one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// Known noise; no state change.
    Ignored,
    /// Not a protocol message; no state change.
    Dropped,
    /// The sender is now the current peer.
    Handshake {
        version: Option<u64>,
        /// Sender runs an older bookmarklet than this build ships.
        outdated: bool,
    },
}

/// Messages sent to the peer, encoded as `{"height": N}` / `{"result": S}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outbound {
    Height(u32),
    Result(String),
}

/// Parse an inbound payload. `None` when it is not a JSON object; otherwise
/// the announced version, if any. Unknown keys are ignored.
pub(super) fn parse_inbound(data: &str) -> Option<Option<u64>> {
    match serde_json::from_str::<Value>(data).ok()? {
        Value::Object(map) => Some(map.get("version").and_then(lenient_uint)),
        _ => None,
    }
}
