//! Errors raised by the light engine.

use lumen_utils::{BlockId, ChunkPos};
use thiserror::Error;

/// Misuse of the light engine by its caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LightError {
    /// A neighbourhood was built from the wrong number of chunks.
    #[error("expected a neighbourhood of {expected} chunks, got {found}")]
    NeighborhoodSize {
        /// Required slot count.
        expected: usize,
        /// Provided slot count.
        found: usize,
    },
    /// A neighbourhood slot was left empty.
    #[error("neighbourhood slot {index} is empty")]
    MissingChunk {
        /// The empty slot.
        index: usize,
    },
    /// A chunk sits in the slot of another position.
    #[error("neighbourhood slot {index} holds chunk {found:?}, expected {expected:?}")]
    MisplacedChunk {
        /// The offending slot.
        index: usize,
        /// Position the slot stands for.
        expected: ChunkPos,
        /// Position of the chunk found there.
        found: ChunkPos,
    },
    /// A chunk the operation needs is not loaded.
    #[error("chunk {0:?} is not loaded")]
    ChunkNotLoaded(ChunkPos),
    /// A block id the registry does not know.
    #[error("unknown block id {0:?}")]
    UnknownBlock(BlockId),
}
