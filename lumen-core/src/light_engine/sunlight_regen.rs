//! Coupled propagation of the sunlight-regen and sunlight channels.

use lumen_utils::{ChunkPos, Direction};

use super::batch_propagator::{BatchPropagator, Propagator};
use super::block_change::BlockChange;
use super::rules::{SunlightRegenRules, SunlightRules};
use super::world_view::PropagatorWorldView;

/// Runs the regen channel to its fixed point, then re-seeds and runs sunlight.
///
/// A cell's sunlight seed is derived from its regen value, so every regen write that
/// moves the seed is forwarded to the sunlight propagator before it runs.
pub struct SunlightRegenBatchPropagator {
    regen: BatchPropagator<SunlightRegenRules>,
    sunlight: BatchPropagator<SunlightRules>,
}

impl SunlightRegenBatchPropagator {
    /// Creates the coupled pair.
    #[must_use]
    pub fn new() -> Self {
        let mut regen = BatchPropagator::new(SunlightRegenRules);
        regen.track_changes();
        Self {
            regen,
            sunlight: BatchPropagator::new(SunlightRules),
        }
    }

    /// Whether either channel has queued work.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.regen.has_pending_work() || self.sunlight.has_pending_work()
    }

    /// Applies a batch of block changes to both channels.
    pub fn process(&mut self, world: &mut dyn PropagatorWorldView, changes: &[BlockChange]) {
        self.regen.process(world, changes);

        let regen_changes = self.regen.take_changes();
        let mut reseeded = 0usize;
        for change in regen_changes {
            let old_seed = SunlightRules::seed_from_regen(change.old);
            let new_seed = SunlightRules::seed_from_regen(change.new);
            if new_seed < old_seed {
                self.sunlight.regenerate(change.pos);
            } else if new_seed > old_seed {
                self.sunlight.propagate_from(world, change.pos, new_seed);
            } else {
                continue;
            }
            reseeded += 1;
        }
        if reseeded > 0 {
            log::trace!("Re-seeded sunlight at {reseeded} cells");
        }

        self.sunlight.process(world, changes);
    }

    /// Pushes both channels across the face of `source` towards `side`.
    pub fn propagate_between(
        &mut self,
        world: &mut dyn PropagatorWorldView,
        source: ChunkPos,
        side: Direction,
        include_existing: bool,
    ) {
        self.regen
            .propagate_between(world, source, side, include_existing);
        self.sunlight
            .propagate_between(world, source, side, include_existing);
    }
}

impl Default for SunlightRegenBatchPropagator {
    fn default() -> Self {
        Self::new()
    }
}

impl Propagator for SunlightRegenBatchPropagator {
    fn process(&mut self, world: &mut dyn PropagatorWorldView, changes: &[BlockChange]) {
        SunlightRegenBatchPropagator::process(self, world, changes);
    }

    fn propagate_between(
        &mut self,
        world: &mut dyn PropagatorWorldView,
        source: ChunkPos,
        side: Direction,
        include_existing: bool,
    ) {
        SunlightRegenBatchPropagator::propagate_between(self, world, source, side, include_existing);
    }
}
