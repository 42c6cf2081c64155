//! Helpers shared by the light engine integration tests.
#![allow(dead_code)]
#![allow(missing_docs)]

use std::sync::Arc;

use lumen_core::chunk::{Chunk, LightChannel};
use lumen_core::light_engine::{
    BlockChange, ChunkNeighborhood, LightRules, NeighborhoodView, PropagationRules, Propagator,
    PropagatorWorldView, SunlightRegenRules, SunlightRules,
};
use lumen_registry::{Block, BlockRegistry, RegistryExt, vanilla};
use lumen_utils::{BlockId, BlockPos, ChunkPos, Direction};

/// Emits full light.
pub const FULL_LIGHT: Block = Block::clear(BlockId(100), "full_light").with_luminance(15);
/// Emits medium light.
pub const MEDIUM_LIGHT: Block = Block::clear(BlockId(101), "medium_light").with_luminance(5);
/// Emits weak light.
pub const WEAK_LIGHT: Block = Block::clear(BlockId(102), "weak_light").with_luminance(2);
/// An opaque block emitting medium light.
pub const SOLID_MEDIUM_LIGHT: Block =
    Block::solid(BlockId(103), "solid_medium_light").with_luminance(5);

/// The built-in blocks plus the test emitters.
pub fn registry() -> Arc<BlockRegistry> {
    let mut registry = BlockRegistry::new();
    vanilla::register_blocks(&mut registry);
    registry.register(FULL_LIGHT);
    registry.register(MEDIUM_LIGHT);
    registry.register(WEAK_LIGHT);
    registry.register(SOLID_MEDIUM_LIGHT);
    registry.freeze();
    Arc::new(registry)
}

/// Every position at exactly `radius` steps from `center`.
pub fn shell(center: BlockPos, radius: i32) -> Vec<BlockPos> {
    let mut positions = Vec::new();
    for dx in -radius..=radius {
        let rest = radius - dx.abs();
        for dy in -rest..=rest {
            let dz = rest - dy.abs();
            let base = BlockPos::new(center.0.x + dx, center.0.y + dy, center.0.z);
            positions.push(BlockPos::new(base.0.x, base.0.y, base.0.z + dz));
            if dz != 0 {
                positions.push(BlockPos::new(base.0.x, base.0.y, base.0.z - dz));
            }
        }
    }
    positions
}

/// The 3x3x3 chunks around the origin chunk, covering blocks -16..32 on every axis.
pub struct TestWorld {
    pub registry: Arc<BlockRegistry>,
    pub chunks: Vec<Chunk>,
}

impl TestWorld {
    /// A world filled with `fill`, all light channels dark.
    pub fn filled(fill: Block) -> Self {
        let chunks = (0..27)
            .map(|index| {
                let pos = ChunkNeighborhood::slot_pos(ChunkPos::new(0, 0, 0), index);
                Chunk::new_filled(pos, fill.id)
            })
            .collect();
        Self {
            registry: registry(),
            chunks,
        }
    }

    /// A world of air.
    pub fn air() -> Self {
        Self::filled(vanilla::AIR)
    }

    fn slot(pos: BlockPos) -> usize {
        let chunk = pos.chunk_pos();
        assert!(
            (-1..=1).contains(&chunk.0.x)
                && (-1..=1).contains(&chunk.0.y)
                && (-1..=1).contains(&chunk.0.z),
            "{pos:?} is outside the test world"
        );
        ((chunk.0.z + 1) * 9 + (chunk.0.y + 1) * 3 + (chunk.0.x + 1)) as usize
    }

    pub fn contains(pos: BlockPos) -> bool {
        [pos.0.x, pos.0.y, pos.0.z]
            .iter()
            .all(|v| (-16..32).contains(v))
    }

    pub fn chunk(&self, pos: ChunkPos) -> &Chunk {
        &self.chunks[Self::slot(pos.block_origin())]
    }

    pub fn block(&self, pos: BlockPos) -> Block {
        let (x, y, z) = pos.local();
        let id = self.chunks[Self::slot(pos)].block(x, y, z);
        *self.registry.get(id).expect("test blocks are registered")
    }

    /// Places a block without touching light, returning the change to feed a propagator.
    pub fn set_block(&mut self, pos: BlockPos, block: Block) -> BlockChange {
        let from = self.block(pos);
        let (x, y, z) = pos.local();
        self.chunks[Self::slot(pos)].set_block(x, y, z, block.id);
        BlockChange::new(pos, from, block)
    }

    pub fn value(&self, channel: LightChannel, pos: BlockPos) -> u8 {
        let (x, y, z) = pos.local();
        self.chunks[Self::slot(pos)].channel(channel).get(x, y, z)
    }

    pub fn light(&self, pos: BlockPos) -> u8 {
        self.value(LightChannel::Light, pos)
    }

    /// Runs `f` against a view of the whole world.
    pub fn with_view<T>(&mut self, f: impl FnOnce(&mut dyn PropagatorWorldView) -> T) -> T {
        let registry = Arc::clone(&self.registry);
        let neighborhood = ChunkNeighborhood::new(self.chunks.iter_mut().map(Some).collect())
            .expect("test world is a complete neighbourhood");
        let mut view = NeighborhoodView::new(neighborhood, &registry);
        f(&mut view)
    }

    /// Places every block of `edits`, then hands the batch to `propagator`.
    pub fn apply(&mut self, propagator: &mut dyn Propagator, edits: &[(BlockPos, Block)]) {
        let changes: Vec<_> = edits
            .iter()
            .map(|(pos, block)| self.set_block(*pos, *block))
            .collect();
        self.with_view(|view| propagator.process(view, &changes));
    }

    /// Copies one channel of every chunk.
    pub fn snapshot(&self, channel: LightChannel) -> Vec<u8> {
        let mut values = Vec::with_capacity(27 * 4096);
        for chunk in &self.chunks {
            for y in 0..16 {
                for z in 0..16 {
                    for x in 0..16 {
                        values.push(chunk.channel(channel).get(x, y, z));
                    }
                }
            }
        }
        values
    }
}

/// Offers the neighbours of `pos` make under plain one-per-step decay, ignoring seeds.
pub fn best_neighbour_offer(world: &TestWorld, channel: LightChannel, pos: BlockPos) -> u8 {
    Direction::ALL
        .iter()
        .map(|side| pos.relative(*side))
        .filter(|adjacent| TestWorld::contains(*adjacent))
        .filter(|adjacent| world.block(*adjacent).translucent)
        .map(|adjacent| world.value(channel, adjacent).saturating_sub(1))
        .max()
        .unwrap_or(0)
}

/// Lighting of the whole test world computed by plain relaxation, without any queues.
///
/// Every cell is repeatedly set to the best of its fixed value and what its neighbours
/// offer until a full sweep changes nothing. Starting from darkness this settles on the
/// least fixed point of the rules, which is what incremental propagation must reach.
pub struct Relaxation {
    blocks: Vec<Block>,
    light: Vec<u8>,
    sunlight: Vec<u8>,
    regen: Vec<u8>,
}

const WORLD_MIN: i32 = -16;
const WORLD_SIZE: i32 = 48;

impl Relaxation {
    /// Copies the blocks of `world` and lights them from scratch.
    pub fn of(world: &TestWorld) -> Self {
        let mut blocks = Vec::with_capacity((WORLD_SIZE * WORLD_SIZE * WORLD_SIZE) as usize);
        for index in 0..WORLD_SIZE * WORLD_SIZE * WORLD_SIZE {
            blocks.push(world.block(Self::pos(index as usize)));
        }
        let cells = blocks.len();
        let mut relaxation = Self {
            blocks,
            light: vec![0; cells],
            sunlight: vec![0; cells],
            regen: vec![0; cells],
        };
        relaxation.relax(&SunlightRegenRules);
        relaxation.relax(&SunlightRules);
        relaxation.relax(&LightRules);
        relaxation
    }

    fn index(pos: BlockPos) -> Option<usize> {
        let inside = |v: i32| (WORLD_MIN..WORLD_MIN + WORLD_SIZE).contains(&v);
        if !(inside(pos.0.x) && inside(pos.0.y) && inside(pos.0.z)) {
            return None;
        }
        let (x, y, z) = (pos.0.x - WORLD_MIN, pos.0.y - WORLD_MIN, pos.0.z - WORLD_MIN);
        Some(((y * WORLD_SIZE + z) * WORLD_SIZE + x) as usize)
    }

    fn pos(index: usize) -> BlockPos {
        let index = index as i32;
        BlockPos::new(
            index % WORLD_SIZE + WORLD_MIN,
            index / (WORLD_SIZE * WORLD_SIZE) + WORLD_MIN,
            index / WORLD_SIZE % WORLD_SIZE + WORLD_MIN,
        )
    }

    fn values(&self, channel: LightChannel) -> &[u8] {
        match channel {
            LightChannel::Light => &self.light,
            LightChannel::Sunlight => &self.sunlight,
            LightChannel::SunlightRegen => &self.regen,
        }
    }

    fn values_mut(&mut self, channel: LightChannel) -> &mut Vec<u8> {
        match channel {
            LightChannel::Light => &mut self.light,
            LightChannel::Sunlight => &mut self.sunlight,
            LightChannel::SunlightRegen => &mut self.regen,
        }
    }

    /// Best value `pos` can hold given its neighbours' current values.
    fn best<R: PropagationRules>(&self, rules: &R, index: usize) -> u8 {
        let pos = Self::pos(index);
        let block = self.blocks[index];
        let max = rules.max_value();
        let values = self.values(rules.channel());

        let mut best = rules.fixed_value(&block, pos, self).min(max);
        for side in Direction::ALL {
            if !rules.can_spread_into(&block, side) {
                continue;
            }
            let offer = match Self::index(pos.relative(side)) {
                Some(adjacent) => {
                    let from = self.blocks[adjacent];
                    let toward = side.opposite();
                    if !rules.can_spread_out_of(&from, toward) {
                        continue;
                    }
                    rules.propagate_value(values[adjacent], toward, &from, 1)
                }
                None => rules.edge_value(side),
            };
            best = best.max(offer.min(max));
        }
        best
    }

    fn relax<R: PropagationRules>(&mut self, rules: &R) {
        let cells = self.blocks.len();
        let mut descending = true;
        loop {
            let mut changed = false;
            for step in 0..cells {
                // Alternate sweep direction; top down first suits the regen channel
                let index = if descending { cells - 1 - step } else { step };
                let best = self.best(rules, index);
                let values = self.values_mut(rules.channel());
                if best != values[index] {
                    values[index] = best;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            descending = !descending;
        }
    }

    pub fn value(&self, channel: LightChannel, pos: BlockPos) -> u8 {
        Self::index(pos).map_or(0, |index| self.values(channel)[index])
    }

    /// Writes this lighting into every chunk of `world`.
    pub fn store_into(&self, world: &mut TestWorld) {
        for index in 0..self.blocks.len() {
            let pos = Self::pos(index);
            let (x, y, z) = pos.local();
            let chunk = &mut world.chunks[TestWorld::slot(pos)];
            for channel in LightChannel::ALL {
                chunk.channel_mut(channel).set(x, y, z, self.values(channel)[index]);
            }
        }
    }

    /// Panics at the first cell where `world` disagrees with this lighting.
    pub fn assert_matches(&self, world: &TestWorld, context: &str) {
        for channel in LightChannel::ALL {
            for index in 0..self.blocks.len() {
                let pos = Self::pos(index);
                assert_eq!(
                    world.value(channel, pos),
                    self.values(channel)[index],
                    "{channel:?} at {pos:?} ({}) {context}",
                    self.blocks[index].name
                );
            }
        }
    }
}

impl PropagatorWorldView for Relaxation {
    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        Self::index(pos).map(|index| self.blocks[index])
    }

    fn value_at(&self, channel: LightChannel, pos: BlockPos) -> Option<u8> {
        Self::index(pos).map(|index| self.values(channel)[index])
    }

    fn set_value_at(&mut self, channel: LightChannel, pos: BlockPos, value: u8) {
        if let Some(index) = Self::index(pos) {
            self.values_mut(channel)[index] = value;
        }
    }
}
