//! Bookmarklet channel.
//!
//! JSON string messages exchanged with the bookmarklet running in the page
//! the user is visiting:
//!
//! | direction | payload          | meaning                                        |
//! |-----------|------------------|------------------------------------------------|
//! | inbound   | `{"version": N}` | handshake; the sender becomes the current peer |
//! | inbound   | `process-tick`   | noise from the async backend; ignored          |
//! | outbound  | `{"height": N}`  | document height so the page can resize         |
//! | outbound  | `{"result": S}`  | derived password                               |
//!
//! Nothing is ever sent before a handshake established a peer, and nothing is
//! broadcast: outbound messages go to the last handshake sender only.
//! Malformed inbound payloads are dropped without error.

mod message;

pub use message::{Inbound, Outbound};

use message::parse_inbound;

/// Bookmarklet version this build ships. Older handshakes get an update notice.
pub const DEFAULT_LATEST_VERSION: u64 = 20140715;

/// Payload the async backend leaks onto the message channel.
pub const PROCESS_TICK: &str = "process-tick";

/// A message target in the embedding context.
pub trait MessagePort {
    fn post_message(&self, payload: &str, target_origin: &str);
}

/// The embedding context we talk to.
#[derive(Debug, Clone)]
pub struct Peer<P> {
    pub source: P,
    pub origin: String,
}

/// Channel state: the current peer and the version we compare handshakes to.
#[derive(Debug)]
pub struct Channel<P> {
    peer: Option<Peer<P>>,
    latest_version: u64,
}

impl<P> Default for Channel<P> {
    fn default() -> Self {
        Self::new(DEFAULT_LATEST_VERSION)
    }
}

impl<P> Channel<P> {
    pub fn new(latest_version: u64) -> Self {
        Self {
            peer: None,
            latest_version,
        }
    }

    pub fn peer(&self) -> Option<&Peer<P>> {
        self.peer.as_ref()
    }

    pub fn latest_version(&self) -> u64 {
        self.latest_version
    }

    /// Handle an inbound message from `source` at `origin`.
    ///
    /// Only a well-formed message from a non-empty origin replaces the peer.
    pub fn receive(&mut self, source: P, origin: &str, data: &str) -> Inbound {
        if data == PROCESS_TICK {
            return Inbound::Ignored;
        }
        if origin.is_empty() {
            tracing::debug!("message without origin dropped");
            return Inbound::Dropped;
        }
        let Some(version) = parse_inbound(data) else {
            tracing::debug!(origin, "malformed message dropped");
            return Inbound::Dropped;
        };

        self.peer = Some(Peer {
            source,
            origin: origin.to_string(),
        });
        let outdated = version.is_some_and(|v| v < self.latest_version);
        tracing::debug!(origin, ?version, outdated, "bookmarklet handshake");
        Inbound::Handshake { version, outdated }
    }
}

impl<P: MessagePort> Channel<P> {
    /// Post `message` to the current peer. Returns false when there is none.
    pub fn send(&self, message: &Outbound) -> bool {
        let Some(peer) = &self.peer else {
            return false;
        };
        match serde_json::to_string(message) {
            Ok(payload) => {
                peer.source.post_message(&payload, &peer.origin);
                true
            }
            Err(err) => {
                tracing::warn!("outbound message not encodable: {err}");
                false
            }
        }
    }

    pub fn send_height(&self, height: u32) -> bool {
        self.send(&Outbound::Height(height))
    }

    pub fn send_result(&self, password: &str) -> bool {
        self.send(&Outbound::Result(password.to_string()))
    }
}
