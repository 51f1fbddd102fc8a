//! Per-domain configuration persistence.
//!
//! Settings used for a successful derivation are remembered per canonical
//! domain and as the global `"default"` record, in a flat key -> JSON string
//! map. Loading merges, field by field:
//! built-in default < stored `"default"` < stored domain record.
//!
//! Persistence is best-effort: a missing, unreadable or full store never
//! blocks a derivation.

mod record;
mod storage;
mod store;

pub use record::{ConfigOverlay, ConfigRecord};
pub(crate) use record::lenient_uint;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{ConfigStore, DEFAULT_KEY};
