//! The built-in block set.

use lumen_utils::Sides;

use crate::{Block, BlockRegistry, RegistryExt};

/// Raw ids of the built-in blocks.
#[allow(missing_docs)]
pub mod ids {
    use lumen_utils::BlockId;

    pub const AIR: BlockId = BlockId(0);
    pub const STONE: BlockId = BlockId(1);
    pub const DIRT: BlockId = BlockId(2);
    pub const GRASS_BLOCK: BlockId = BlockId(3);
    pub const BEDROCK: BlockId = BlockId(4);
    pub const GLASS: BlockId = BlockId(5);
    pub const WATER: BlockId = BlockId(6);
    pub const LAVA: BlockId = BlockId(7);
    pub const TORCH: BlockId = BlockId(8);
    pub const GLOWSTONE: BlockId = BlockId(9);
    pub const LANTERN: BlockId = BlockId(10);
    pub const SMOOTH_STONE_SLAB: BlockId = BlockId(11);
}

/// Open air.
pub const AIR: Block = Block::clear(ids::AIR, "air");
/// Stone.
pub const STONE: Block = Block::solid(ids::STONE, "stone");
/// Dirt.
pub const DIRT: Block = Block::solid(ids::DIRT, "dirt");
/// Grass block.
pub const GRASS_BLOCK: Block = Block::solid(ids::GRASS_BLOCK, "grass_block");
/// Bedrock.
pub const BEDROCK: Block = Block::solid(ids::BEDROCK, "bedrock");
/// Glass lets every channel through.
pub const GLASS: Block = Block::clear(ids::GLASS, "glass");
/// Water is translucent but stops sunlight regeneration.
pub const WATER: Block = Block::clear(ids::WATER, "water").as_liquid();
/// Lava.
pub const LAVA: Block = Block::clear(ids::LAVA, "lava")
    .with_luminance(15)
    .as_liquid();
/// Torch.
pub const TORCH: Block = Block::clear(ids::TORCH, "torch").with_luminance(14);
/// Glowstone.
pub const GLOWSTONE: Block = Block::clear(ids::GLOWSTONE, "glowstone").with_luminance(15);
/// Lantern.
pub const LANTERN: Block = Block::clear(ids::LANTERN, "lantern").with_luminance(15);
/// A bottom slab: only its bottom face blocks light.
pub const SMOOTH_STONE_SLAB: Block =
    Block::clear(ids::SMOOTH_STONE_SLAB, "smooth_stone_slab").with_full_sides(Sides::DOWN);

/// Every built-in block, ordered by id.
pub const BLOCKS: [Block; 12] = [
    AIR,
    STONE,
    DIRT,
    GRASS_BLOCK,
    BEDROCK,
    GLASS,
    WATER,
    LAVA,
    TORCH,
    GLOWSTONE,
    LANTERN,
    SMOOTH_STONE_SLAB,
];

/// Registers every built-in block.
pub fn register_blocks(registry: &mut BlockRegistry) {
    for block in BLOCKS {
        registry.register(block);
    }
}

/// Creates a frozen registry holding the built-in blocks.
#[must_use]
pub fn registry() -> BlockRegistry {
    let mut registry = BlockRegistry::new();
    register_blocks(&mut registry);
    registry.freeze();
    registry
}
