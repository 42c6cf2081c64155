//! Per-channel propagation rules.
//!
//! The batch propagator is generic over [`PropagationRules`]; everything that differs
//! between the block light, sunlight and sunlight-regen channels lives here.

use lumen_registry::Block;
use lumen_utils::{BlockPos, Direction};

use super::world_view::PropagatorWorldView;
use crate::chunk::{Chunk, LightChannel};

/// Highest block light level.
pub const MAX_LIGHT: u8 = 15;
/// Highest sunlight level.
pub const MAX_SUNLIGHT: u8 = 15;
/// Highest sunlight-regen level.
pub const MAX_SUNLIGHT_REGEN: u8 = 31;
/// Regen level above which a cell seeds sunlight.
pub const SUNLIGHT_REGEN_THRESHOLD: u8 = MAX_SUNLIGHT_REGEN - MAX_SUNLIGHT;

/// How replacing a block changes propagation across one of its faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationComparison {
    /// Propagation across the face is unchanged.
    Identical,
    /// The new block lets more through the face.
    MorePermissive,
    /// The new block lets less through the face.
    MoreRestricted,
}

impl PropagationComparison {
    /// Whether values relying on the face may now be unjustified.
    #[must_use]
    pub const fn is_restricting(self) -> bool {
        matches!(self, Self::MoreRestricted)
    }

    /// Whether values may now spread further across the face.
    #[must_use]
    pub const fn is_permitting(self) -> bool {
        matches!(self, Self::MorePermissive)
    }
}

/// Seed, decay and blocking semantics of one light channel.
///
/// Sides are always given from the point of view of the block being asked about:
/// `can_spread_out_of(block, side)` is about the face of `block` towards `side`, and a
/// value travelling from `a` to its neighbour `b` in direction `side` enters `b` through
/// `side.opposite()`.
pub trait PropagationRules {
    /// Channel read and written by these rules.
    fn channel(&self) -> LightChannel;

    /// Channel ceiling.
    fn max_value(&self) -> u8;

    /// Value a block holds regardless of its surroundings.
    fn fixed_value(&self, block: &Block, pos: BlockPos, world: &dyn PropagatorWorldView) -> u8;

    /// Value offered to the neighbour in direction `side` by a block holding `existing`.
    fn propagate_value(&self, existing: u8, side: Direction, from: &Block, scale: u8) -> u8 {
        let _ = (side, from);
        existing.saturating_sub(scale)
    }

    /// Whether a value held by `block` may leave through its face towards `side`.
    fn can_spread_out_of(&self, block: &Block, side: Direction) -> bool {
        can_spread(block, side)
    }

    /// Whether a value may enter `block` through its face towards `side`.
    fn can_spread_into(&self, block: &Block, side: Direction) -> bool {
        can_spread(block, side)
    }

    /// Classifies replacing `old` with `new` for the face towards `side`.
    fn compare_propagation(&self, new: &Block, old: &Block, side: Direction) -> PropagationComparison {
        compare_common(new, old, side)
    }

    /// Value offered by an unavailable neighbour in direction `side`.
    fn edge_value(&self, side: Direction) -> u8 {
        let _ = side;
        0
    }

    /// Raw channel value of a chunk-local position.
    fn value(&self, chunk: &Chunk, x: usize, y: usize, z: usize) -> u8 {
        chunk.channel(self.channel()).get(x, y, z)
    }

    /// Stores a raw channel value, clamped to the ceiling.
    fn set_value(&self, chunk: &mut Chunk, x: usize, y: usize, z: usize, value: u8) {
        let max = self.max_value();
        chunk.channel_mut(self.channel()).set(x, y, z, value.min(max));
    }
}

#[inline]
fn can_spread(block: &Block, side: Direction) -> bool {
    block.translucent && !block.is_full_side(side)
}

fn compare_common(new: &Block, old: &Block, side: Direction) -> PropagationComparison {
    match (new.translucent, old.translucent) {
        (true, true) => match (new.is_full_side(side), old.is_full_side(side)) {
            (true, false) => PropagationComparison::MoreRestricted,
            (false, true) => PropagationComparison::MorePermissive,
            _ => PropagationComparison::Identical,
        },
        (true, false) => PropagationComparison::MorePermissive,
        (false, true) => PropagationComparison::MoreRestricted,
        (false, false) => PropagationComparison::Identical,
    }
}

/// Light emitted by blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightRules;

impl PropagationRules for LightRules {
    fn channel(&self) -> LightChannel {
        LightChannel::Light
    }

    fn max_value(&self) -> u8 {
        MAX_LIGHT
    }

    fn fixed_value(&self, block: &Block, _pos: BlockPos, _world: &dyn PropagatorWorldView) -> u8 {
        block.luminance.min(MAX_LIGHT)
    }

    // Emitters shine through their own faces even when opaque.
    fn can_spread_out_of(&self, block: &Block, side: Direction) -> bool {
        block.luminance > 0 || can_spread(block, side)
    }

    fn compare_propagation(&self, new: &Block, old: &Block, side: Direction) -> PropagationComparison {
        let comparison = compare_common(new, old, side);
        match (new.luminance > 0, old.luminance > 0) {
            (false, true) if !can_spread(new, side) => PropagationComparison::MoreRestricted,
            (true, false) if !can_spread(old, side) => PropagationComparison::MorePermissive,
            _ => comparison,
        }
    }
}

/// Direct sunlight, seeded wherever the regen channel is above its threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunlightRules;

impl SunlightRules {
    /// Sunlight seed of a cell holding `regen`.
    #[must_use]
    pub const fn seed_from_regen(regen: u8) -> u8 {
        let seed = regen.saturating_sub(SUNLIGHT_REGEN_THRESHOLD);
        if seed > MAX_SUNLIGHT { MAX_SUNLIGHT } else { seed }
    }
}

impl PropagationRules for SunlightRules {
    fn channel(&self) -> LightChannel {
        LightChannel::Sunlight
    }

    fn max_value(&self) -> u8 {
        MAX_SUNLIGHT
    }

    fn fixed_value(&self, _block: &Block, pos: BlockPos, world: &dyn PropagatorWorldView) -> u8 {
        world
            .value_at(LightChannel::SunlightRegen, pos)
            .map_or(0, Self::seed_from_regen)
    }
}

/// Open-sky exposure, accumulating downwards through clear non-liquid blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunlightRegenRules;

impl PropagationRules for SunlightRegenRules {
    fn channel(&self) -> LightChannel {
        LightChannel::SunlightRegen
    }

    fn max_value(&self) -> u8 {
        MAX_SUNLIGHT_REGEN
    }

    fn fixed_value(&self, _block: &Block, _pos: BlockPos, _world: &dyn PropagatorWorldView) -> u8 {
        0
    }

    fn propagate_value(&self, existing: u8, side: Direction, _from: &Block, scale: u8) -> u8 {
        if side == Direction::Down {
            existing.saturating_add(scale).min(MAX_SUNLIGHT_REGEN)
        } else {
            0
        }
    }

    fn can_spread_out_of(&self, block: &Block, side: Direction) -> bool {
        side == Direction::Down && !block.liquid && can_spread(block, side)
    }

    fn can_spread_into(&self, block: &Block, side: Direction) -> bool {
        side == Direction::Up && !block.liquid && can_spread(block, side)
    }

    fn compare_propagation(&self, new: &Block, old: &Block, side: Direction) -> PropagationComparison {
        match (new.liquid, old.liquid) {
            (true, false) => PropagationComparison::MoreRestricted,
            (false, true) => PropagationComparison::MorePermissive,
            _ => compare_common(new, old, side),
        }
    }

    // Nothing loaded above means open sky.
    fn edge_value(&self, side: Direction) -> u8 {
        if side == Direction::Up {
            MAX_SUNLIGHT_REGEN
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_registry::vanilla;

    #[test]
    fn test_light_decays_by_scale() {
        let rules = LightRules;
        assert_eq!(rules.propagate_value(15, Direction::East, &vanilla::AIR, 1), 14);
        assert_eq!(rules.propagate_value(0, Direction::East, &vanilla::AIR, 1), 0);
        assert_eq!(rules.propagate_value(3, Direction::Up, &vanilla::AIR, 4), 0);
    }

    #[test]
    fn test_regen_grows_downwards_only() {
        let rules = SunlightRegenRules;
        assert_eq!(rules.propagate_value(3, Direction::Down, &vanilla::AIR, 1), 4);
        assert_eq!(rules.propagate_value(31, Direction::Down, &vanilla::AIR, 1), 31);
        for side in [Direction::Up, Direction::North, Direction::East] {
            assert_eq!(rules.propagate_value(20, side, &vanilla::AIR, 1), 0);
        }

        assert!(rules.can_spread_out_of(&vanilla::AIR, Direction::Down));
        assert!(!rules.can_spread_out_of(&vanilla::AIR, Direction::West));
        assert!(rules.can_spread_into(&vanilla::AIR, Direction::Up));
        assert!(!rules.can_spread_into(&vanilla::AIR, Direction::Down));
        assert!(!rules.can_spread_into(&vanilla::WATER, Direction::Up));
    }

    #[test]
    fn test_sunlight_seed_threshold() {
        assert_eq!(SunlightRules::seed_from_regen(0), 0);
        assert_eq!(SunlightRules::seed_from_regen(SUNLIGHT_REGEN_THRESHOLD), 0);
        assert_eq!(SunlightRules::seed_from_regen(17), 1);
        assert_eq!(SunlightRules::seed_from_regen(MAX_SUNLIGHT_REGEN), MAX_SUNLIGHT);
    }

    #[test]
    fn test_slab_blocks_only_its_full_face() {
        let rules = LightRules;
        let slab = vanilla::SMOOTH_STONE_SLAB;
        assert!(!rules.can_spread_into(&slab, Direction::Down));
        assert!(rules.can_spread_into(&slab, Direction::Up));
        assert!(rules.can_spread_into(&slab, Direction::North));
    }

    #[test]
    fn test_compare_propagation() {
        let rules = LightRules;
        assert_eq!(
            rules.compare_propagation(&vanilla::STONE, &vanilla::AIR, Direction::Up),
            PropagationComparison::MoreRestricted
        );
        assert_eq!(
            rules.compare_propagation(&vanilla::AIR, &vanilla::STONE, Direction::Up),
            PropagationComparison::MorePermissive
        );
        assert_eq!(
            rules.compare_propagation(&vanilla::GLASS, &vanilla::AIR, Direction::Up),
            PropagationComparison::Identical
        );
        assert_eq!(
            rules.compare_propagation(&vanilla::SMOOTH_STONE_SLAB, &vanilla::AIR, Direction::Down),
            PropagationComparison::MoreRestricted
        );
        assert_eq!(
            rules.compare_propagation(&vanilla::SMOOTH_STONE_SLAB, &vanilla::AIR, Direction::Up),
            PropagationComparison::Identical
        );

        let regen = SunlightRegenRules;
        assert_eq!(
            regen.compare_propagation(&vanilla::WATER, &vanilla::AIR, Direction::Up),
            PropagationComparison::MoreRestricted
        );
        assert_eq!(
            regen.compare_propagation(&vanilla::AIR, &vanilla::WATER, Direction::Up),
            PropagationComparison::MorePermissive
        );
    }

    #[test]
    fn test_regen_assumes_sky_above_the_world() {
        assert_eq!(SunlightRegenRules.edge_value(Direction::Up), MAX_SUNLIGHT_REGEN);
        assert_eq!(SunlightRegenRules.edge_value(Direction::North), 0);
        assert_eq!(LightRules.edge_value(Direction::Up), 0);
    }
}
