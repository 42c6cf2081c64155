//! Shared value types for the lumen workspace: positions, block ids and directions.

pub mod direction;
pub mod math;
pub mod types;

pub use direction::{Direction, Sides};
pub use types::{
    BlockId, BlockPos, CHUNK_MASK, CHUNK_SHIFT, CHUNK_SIZE, CHUNK_VOLUME, ChunkPos,
};
