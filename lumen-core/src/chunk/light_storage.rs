//! Per-voxel storage for one light channel of a chunk.
//!
//! Values are stored one byte per block, so the same storage serves channels whose
//! ceiling exceeds a nibble (sunlight regeneration goes up to 31).

use lumen_utils::{CHUNK_SIZE, CHUNK_VOLUME};

/// Storage for one light channel of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightStorage {
    /// All blocks in the chunk have the same value.
    Homogeneous(u8),
    /// Blocks have different values, indexed `y * 256 + z * 16 + x`.
    Heterogeneous(Box<[u8; CHUNK_VOLUME]>),
}

#[inline]
const fn index(x: usize, y: usize, z: usize) -> usize {
    (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
}

impl LightStorage {
    /// Creates a new homogeneous storage with every block at `value`.
    #[must_use]
    pub fn new_filled(value: u8) -> Self {
        Self::Homogeneous(value)
    }

    /// Creates a new empty (dark) storage.
    #[must_use]
    pub fn new_empty() -> Self {
        Self::Homogeneous(0)
    }

    /// Gets the value at the given chunk-local position.
    #[must_use]
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> u8 {
        debug_assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE,
            "Coordinates must be 0-15"
        );

        match self {
            Self::Homogeneous(value) => *value,
            Self::Heterogeneous(data) => data[index(x, y, z)],
        }
    }

    /// Sets the value at the given chunk-local position.
    ///
    /// If currently homogeneous and setting a different value, upgrades to heterogeneous.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) {
        debug_assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE,
            "Coordinates must be 0-15"
        );

        match self {
            Self::Homogeneous(current) => {
                if value == *current {
                    return;
                }
                let mut data = Box::new([*current; CHUNK_VOLUME]);
                data[index(x, y, z)] = value;
                *self = Self::Heterogeneous(data);
            }
            Self::Heterogeneous(data) => data[index(x, y, z)] = value,
        }
    }

    /// Overwrites every block with `value`.
    pub fn fill(&mut self, value: u8) {
        *self = Self::Homogeneous(value);
    }

    /// Collapses heterogeneous storage holding a single value back to homogeneous.
    ///
    /// Returns true if the storage was compacted.
    pub fn deflate(&mut self) -> bool {
        let Self::Heterogeneous(data) = self else {
            return false;
        };
        let first = data[0];
        if data.iter().all(|value| *value == first) {
            *self = Self::Homogeneous(first);
            true
        } else {
            false
        }
    }

    /// Whether every block holds the same value.
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        matches!(self, Self::Homogeneous(_))
    }

    /// The largest stored value.
    #[must_use]
    pub fn max_value(&self) -> u8 {
        match self {
            Self::Homogeneous(value) => *value,
            Self::Heterogeneous(data) => data.iter().copied().max().unwrap_or(0),
        }
    }
}

impl Default for LightStorage {
    fn default() -> Self {
        Self::new_empty()
    }
}
