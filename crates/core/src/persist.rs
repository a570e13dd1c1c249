//! Tower persistence - JSON encode/decode of the placed stack
//!
//! The wire format is an ordered list of `{position, scale, color}` records
//! with the colour as a `#RRGGBB` string. Decoding fails soft: malformed
//! input logs a warning and yields no tower; bad hex falls back to white.
//! Core types stay serde-free; the records below mirror them.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::tower::Block;
use stack_tower_types::{Rgba, Vec3};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("tower serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Vec3Record {
    x: f32,
    y: f32,
    z: f32,
}

impl From<Vec3> for Vec3Record {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(r: Vec3Record) -> Self {
        Vec3::new(r.x, r.y, r.z)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlockRecord {
    position: Vec3Record,
    scale: Vec3Record,
    color: String,
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        Self {
            position: block.position.into(),
            scale: block.scale.into(),
            color: block.color.to_hex(),
        }
    }
}

impl From<BlockRecord> for Block {
    fn from(record: BlockRecord) -> Self {
        let color = Rgba::from_hex(&record.color).unwrap_or(Rgba::WHITE);
        Block::new(record.position.into(), record.scale.into(), color)
    }
}

/// Serialize the surviving blocks (scored flag unset or true) as JSON.
pub fn encode(blocks: &[Block]) -> Result<String, PersistError> {
    let records: Vec<BlockRecord> = blocks
        .iter()
        .filter(|b| b.survives_save())
        .map(BlockRecord::from)
        .collect();
    Ok(serde_json::to_string(&records)?)
}

/// Deserialize a stored tower. Absent or malformed data is "no tower",
/// never an error to the caller.
pub fn decode(json: &str) -> Option<Vec<Block>> {
    if json.is_empty() {
        return None;
    }
    match serde_json::from_str::<Vec<BlockRecord>>(json) {
        Ok(records) => Some(records.into_iter().map(Block::from).collect()),
        Err(e) => {
            warn!(error = %e, "discarding malformed persisted tower");
            None
        }
    }
}
