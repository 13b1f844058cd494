use super::error::SaveError;
use super::HISTORY_VERSION;
use crate::config::MatchConfig;
use crate::models::TeamInnings;
use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Everything persisted under one history namespace
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryFile {
    /// Format version for migration
    pub version: u32,

    /// Last write (unix milliseconds)
    pub timestamp: u64,

    /// Completed matches, oldest first
    pub matches: Vec<MatchRecord>,

    /// Match format the scorer last chose
    #[serde(default)]
    pub settings: Option<MatchConfig>,
}

impl Default for HistoryFile {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryFile {
    pub fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            timestamp: current_timestamp(),
            matches: Vec::new(),
            settings: None,
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        let mut ids = std::collections::HashSet::new();
        for record in &self.matches {
            if !ids.insert(&record.id) {
                return Err(SaveError::Corrupted);
            }
        }
        Ok(())
    }
}

/// One finished match as shown in the history table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: String,
    pub team1_name: String,
    /// "R/W"
    pub team1_score: String,
    /// "O.B"
    pub team1_overs: String,
    pub team1_extras: u32,
    pub team2_name: String,
    /// "R/W", or "DNB" when the side never batted
    pub team2_score: String,
    pub team2_overs: String,
    pub team2_extras: u32,
    pub result: String,
    pub date: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(team1: &TeamInnings, team2: &TeamInnings, result: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            team1_name: team1.name.clone(),
            team1_score: team1.score_line(),
            team1_overs: team1.overs_display(),
            team1_extras: team1.extras,
            team2_name: team2.name.clone(),
            team2_score: team2.score_line(),
            team2_overs: team2.overs_display(),
            team2_extras: team2.extras,
            result: result.into(),
            date: Utc::now(),
        }
    }
}

/// Serialize and compress history data
pub fn serialize_and_compress(file: &HistoryFile) -> Result<Vec<u8>, SaveError> {
    file.validate()?;

    // 1. Serialize to MessagePack with field names
    let msgpack = to_vec_named(file).map_err(SaveError::Serialization)?;

    // 2. Compress with LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. Add SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize history data
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<HistoryFile, SaveError> {
    // Size header + checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    let file: HistoryFile = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    if file.version > HISTORY_VERSION {
        return Err(SaveError::VersionMismatch { found: file.version, expected: HISTORY_VERSION });
    }

    Ok(file)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
