//! Flat terrain generation for demos, tests and benchmarks.

use lumen_registry::vanilla::ids;
use lumen_utils::{BlockId, CHUNK_SIZE, ChunkPos};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::level_chunk::Chunk;

/// A chunk generator that generates a flat world with scattered torches.
pub struct FlatChunkGenerator {
    /// The block id for bedrock.
    pub bedrock: BlockId,
    /// The block id for stone.
    pub stone: BlockId,
    /// The block id for dirt.
    pub dirt: BlockId,
    /// The block id for grass blocks.
    pub grass: BlockId,
    /// The block id for torches.
    pub torch: BlockId,
    /// World height of the first air block above the surface.
    pub ground_level: i32,
    /// World height of the bedrock floor; everything below is bedrock too.
    pub bedrock_level: i32,
    /// Chance for each surface column to get a torch.
    pub torch_chance: f64,
    seed: u64,
}

impl FlatChunkGenerator {
    /// Creates a generator using the built-in blocks.
    #[must_use]
    pub fn new(seed: u64, ground_level: i32) -> Self {
        Self {
            bedrock: ids::BEDROCK,
            stone: ids::STONE,
            dirt: ids::DIRT,
            grass: ids::GRASS_BLOCK,
            torch: ids::TORCH,
            ground_level,
            bedrock_level: ground_level - 32,
            torch_chance: 0.0,
            seed,
        }
    }

    /// Sets the chance for a surface column to get a torch.
    #[must_use]
    pub fn with_torch_chance(mut self, torch_chance: f64) -> Self {
        self.torch_chance = torch_chance.clamp(0.0, 1.0);
        self
    }

    /// Terrain block at a world height, ignoring torches.
    #[must_use]
    pub fn block_at_height(&self, y: i32) -> BlockId {
        // Layers, from the top:
        // ground-1: Grass block
        // ground-3..ground-2: Dirt
        // down to bedrock: Stone
        if y >= self.ground_level {
            ids::AIR
        } else if y == self.ground_level - 1 {
            self.grass
        } else if y >= self.ground_level - 3 {
            self.dirt
        } else if y > self.bedrock_level {
            self.stone
        } else {
            self.bedrock
        }
    }

    /// Generates the blocks of one chunk. Light channels are left dark.
    #[must_use]
    pub fn generate(&self, pos: ChunkPos) -> Chunk {
        let origin = pos.block_origin();
        let bottom = self.block_at_height(origin.0.y);
        let top = self.block_at_height(origin.0.y + CHUNK_SIZE as i32 - 1);

        let mut chunk = Chunk::new_filled(pos, top);
        if bottom != top {
            for y in 0..CHUNK_SIZE {
                let block = self.block_at_height(origin.0.y + y as i32);
                if block == top {
                    continue;
                }
                for z in 0..CHUNK_SIZE {
                    for x in 0..CHUNK_SIZE {
                        chunk.set_block(x, y, z, block);
                    }
                }
            }
        }

        let torch_y = self.ground_level - origin.0.y;
        if self.torch_chance > 0.0 && (0..CHUNK_SIZE as i32).contains(&torch_y) {
            let mut rng = StdRng::seed_from_u64(self.column_seed(pos));
            for z in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    if rng.random_bool(self.torch_chance) {
                        chunk.set_block(x, torch_y as usize, z, self.torch);
                    }
                }
            }
        }

        chunk
    }

    fn column_seed(&self, pos: ChunkPos) -> u64 {
        self.seed
            ^ (pos.0.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (pos.0.z as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers() {
        let generator = FlatChunkGenerator::new(0, 4);
        let chunk = generator.generate(ChunkPos::new(0, 0, 0));

        assert_eq!(chunk.block(0, 0, 0), ids::STONE);
        assert_eq!(chunk.block(3, 1, 7), ids::DIRT);
        assert_eq!(chunk.block(3, 2, 7), ids::DIRT);
        assert_eq!(chunk.block(3, 3, 7), ids::GRASS_BLOCK);
        assert_eq!(chunk.block(3, 4, 7), ids::AIR);
        assert_eq!(chunk.block(15, 15, 15), ids::AIR);
    }

    #[test]
    fn test_chunks_far_from_the_surface_stay_homogeneous() {
        let generator = FlatChunkGenerator::new(0, 4);
        let sky = generator.generate(ChunkPos::new(0, 3, 0));
        let deep = generator.generate(ChunkPos::new(0, -5, 0));

        assert!(matches!(sky.blocks(), crate::chunk::BlockStorage::Homogeneous(id) if *id == ids::AIR));
        assert!(matches!(deep.blocks(), crate::chunk::BlockStorage::Homogeneous(id) if *id == ids::BEDROCK));
    }

    #[test]
    fn test_torches_are_deterministic() {
        let generator = FlatChunkGenerator::new(42, 4).with_torch_chance(0.25);
        let first = generator.generate(ChunkPos::new(2, 0, -1));
        let second = generator.generate(ChunkPos::new(2, 0, -1));

        let torches = |chunk: &Chunk| {
            (0..CHUNK_SIZE * CHUNK_SIZE)
                .filter(|index| chunk.block(index % CHUNK_SIZE, 4, index / CHUNK_SIZE) == ids::TORCH)
                .count()
        };
        assert_eq!(torches(&first), torches(&second));
        assert!(torches(&first) > 0);
    }
}
