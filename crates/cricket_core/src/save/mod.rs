// Match history persistence
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod migration;
pub mod store;

pub use error::SaveError;
pub use format::{
    decompress_and_deserialize, serialize_and_compress, HistoryFile, MatchRecord,
};
pub use migration::migrate_history;
pub use store::{FileHistoryStore, HistoryStore, InMemoryHistoryStore, DEFAULT_NAMESPACE};

pub const HISTORY_VERSION: u32 = 1;
