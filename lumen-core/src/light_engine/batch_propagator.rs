//! Flood-fill propagation of one light channel.
//!
//! A batch is applied in three steps:
//! 1. Every block change is reviewed face by face. Faces that got more restrictive queue
//!    the cell and its neighbour for a reduction check, faces that got more permissive
//!    mark the cell as an increase root.
//! 2. Reductions run to completion first. A cell whose stored value is no longer
//!    justified by its own fixed value and its neighbours is lowered, and the neighbours
//!    it could have lit are checked in turn.
//! 3. Increases flood outward from the roots and from every lowered cell.

use std::num::NonZeroU8;

use lumen_utils::{BlockPos, ChunkPos, Direction};
use rustc_hash::{FxHashMap, FxHashSet};

use super::block_change::BlockChange;
use super::light_queue::LightQueue;
use super::rules::PropagationRules;
use super::world_view::PropagatorWorldView;

/// Common interface of the propagators driven by the merger and the level engine.
pub trait Propagator {
    /// Applies a batch of block changes and resolves all queued work.
    fn process(&mut self, world: &mut dyn PropagatorWorldView, changes: &[BlockChange]);

    /// Pushes values from the face of `source` towards `side` into the adjacent chunk.
    ///
    /// The work is resolved by the next [`Propagator::process`] call.
    fn propagate_between(
        &mut self,
        world: &mut dyn PropagatorWorldView,
        source: ChunkPos,
        side: Direction,
        include_existing: bool,
    );
}

/// A stored value that changed while change tracking was enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueChange {
    /// Changed cell.
    pub pos: BlockPos,
    /// Value before the first write.
    pub old: u8,
    /// Value after the last write.
    pub new: u8,
}

/// Applies batches of block changes to one channel under a set of [`PropagationRules`].
pub struct BatchPropagator<R> {
    rules: R,
    scale: u8,
    reduce_queue: LightQueue,
    reduce_pending: FxHashSet<BlockPos>,
    /// One queue per value, indexed by the value the cell held when queued.
    increase_queues: Vec<LightQueue>,
    top: usize,
    increase_roots: Vec<BlockPos>,
    changes: Option<FxHashMap<BlockPos, (u8, u8)>>,
}

impl<R: PropagationRules> BatchPropagator<R> {
    /// Creates a propagator decaying by one per step.
    #[must_use]
    pub fn new(rules: R) -> Self {
        Self::with_scale(rules, NonZeroU8::MIN)
    }

    /// Creates a propagator decaying by `scale` per step.
    ///
    /// Without decay a cluster of lit cells would justify itself after its source is
    /// gone, so the scale is never zero.
    #[must_use]
    pub fn with_scale(rules: R, scale: NonZeroU8) -> Self {
        let buckets = usize::from(rules.max_value()) + 1;
        Self {
            rules,
            scale: scale.get(),
            reduce_queue: LightQueue::new(),
            reduce_pending: FxHashSet::default(),
            increase_queues: (0..buckets).map(|_| LightQueue::with_capacity(64)).collect(),
            top: 0,
            increase_roots: Vec::new(),
            changes: None,
        }
    }

    /// Starts recording every value this propagator writes.
    pub fn track_changes(&mut self) {
        self.changes.get_or_insert_with(FxHashMap::default);
    }

    /// Drains the values recorded since the last call, skipping cells that ended up
    /// where they started.
    pub fn take_changes(&mut self) -> Vec<ValueChange> {
        self.changes
            .as_mut()
            .map(|changes| {
                changes
                    .drain()
                    .filter(|(_, (old, new))| old != new)
                    .map(|(pos, (old, new))| ValueChange { pos, old, new })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether work is queued that the next [`Self::process`] call will resolve.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.reduce_queue.is_empty()
            || !self.increase_roots.is_empty()
            || self.increase_queues.iter().any(|queue| !queue.is_empty())
    }

    /// Applies a batch of block changes and resolves all queued work.
    pub fn process(&mut self, world: &mut dyn PropagatorWorldView, changes: &[BlockChange]) {
        for change in changes {
            self.review_change(world, change);
        }

        log::trace!(
            "{:?}: {} changes, {} reductions, {} roots",
            self.rules.channel(),
            changes.len(),
            self.reduce_queue.len(),
            self.increase_roots.len()
        );

        self.process_reductions(world);
        self.process_increases(world);
    }

    /// Raises `pos` to `value` if it is higher and spreads it from there.
    pub fn propagate_from(&mut self, world: &mut dyn PropagatorWorldView, pos: BlockPos, value: u8) {
        let Some(current) = world.value_at(self.rules.channel(), pos) else {
            return;
        };
        let value = value.min(self.rules.max_value());
        if value > current {
            self.store(world, pos, value);
        }
        if value >= current {
            self.queue_increase(pos, value);
        }
    }

    /// Queues `pos` for a reduction check, for when its fixed value dropped without a
    /// block change.
    pub fn regenerate(&mut self, pos: BlockPos) {
        self.queue_reduction(pos);
    }

    /// Pushes values from the face of `source` towards `side` into the adjacent chunk.
    ///
    /// Boundary cells that receive more than they hold are raised. Boundary cells that
    /// hold more than they are offered are checked for reduction, as they may have been
    /// lit on assumptions about the then missing chunk. With `include_existing`, every
    /// other lit boundary cell is queued to spread its value again.
    pub fn propagate_between(
        &mut self,
        world: &mut dyn PropagatorWorldView,
        source: ChunkPos,
        side: Direction,
        include_existing: bool,
    ) {
        let channel = self.rules.channel();
        let max = self.rules.max_value();
        let entry = side.opposite();

        for pos in source.face_positions(side) {
            let target = pos.relative(side);
            let (Some(target_block), Some(target_value)) =
                (world.block_at(target), world.value_at(channel, target))
            else {
                continue;
            };
            let open = self.rules.can_spread_into(&target_block, entry);

            let offer = match (world.block_at(pos), world.value_at(channel, pos)) {
                (Some(block), Some(value)) if open && self.rules.can_spread_out_of(&block, side) => {
                    self.rules
                        .propagate_value(value, side, &block, self.scale)
                        .min(max)
                }
                _ => 0,
            };

            if offer > target_value {
                self.store(world, target, offer);
                self.queue_increase(target, offer);
                continue;
            }
            if open && offer < target_value {
                self.queue_reduction(target);
            }
            if include_existing && target_value > 0 {
                self.queue_increase(target, target_value);
            }
        }
    }

    fn review_change(&mut self, world: &mut dyn PropagatorWorldView, change: &BlockChange) {
        let pos = change.pos;
        if world.value_at(self.rules.channel(), pos).is_none() {
            return;
        }

        let old_fixed = self.rules.fixed_value(&change.from, pos, &*world);
        let new_fixed = self.rules.fixed_value(&change.to, pos, &*world);
        if new_fixed < old_fixed {
            self.queue_reduction(pos);
        } else if new_fixed > old_fixed {
            self.increase_roots.push(pos);
        }

        for side in Direction::ALL {
            let comparison = self.rules.compare_propagation(&change.to, &change.from, side);
            if comparison.is_restricting() {
                self.queue_reduction(pos);
                self.queue_reduction(pos.relative(side));
            } else if comparison.is_permitting() {
                self.increase_roots.push(pos);
            }
        }
    }

    /// Highest value `pos` can hold given its fixed value and its neighbours' values.
    fn justified_value(&self, world: &dyn PropagatorWorldView, pos: BlockPos) -> u8 {
        let Some(block) = world.block_at(pos) else {
            return 0;
        };
        let channel = self.rules.channel();
        let max = self.rules.max_value();

        let mut best = self.rules.fixed_value(&block, pos, world).min(max);
        for side in Direction::ALL {
            if best >= max {
                break;
            }
            if !self.rules.can_spread_into(&block, side) {
                continue;
            }

            let adjacent = pos.relative(side);
            let offer = match world.block_at(adjacent) {
                Some(adjacent_block) => {
                    let toward = side.opposite();
                    if !self.rules.can_spread_out_of(&adjacent_block, toward) {
                        continue;
                    }
                    let Some(value) = world.value_at(channel, adjacent) else {
                        continue;
                    };
                    self.rules
                        .propagate_value(value, toward, &adjacent_block, self.scale)
                }
                None => self.rules.edge_value(side),
            };
            best = best.max(offer.min(max));
        }
        best
    }

    fn process_reductions(&mut self, world: &mut dyn PropagatorWorldView) {
        let channel = self.rules.channel();

        while let Some(pos) = self.reduce_queue.dequeue() {
            self.reduce_pending.remove(&pos);

            let Some(current) = world.value_at(channel, pos) else {
                continue;
            };
            if current == 0 {
                continue;
            }
            let justified = self.justified_value(&*world, pos);
            if justified >= current {
                continue;
            }

            self.store(world, pos, justified);
            if let Some(block) = world.block_at(pos) {
                for side in Direction::ALL {
                    if self.rules.can_spread_out_of(&block, side) {
                        self.queue_reduction(pos.relative(side));
                    }
                }
            }
            self.queue_increase(pos, justified);
        }
    }

    fn process_increases(&mut self, world: &mut dyn PropagatorWorldView) {
        let channel = self.rules.channel();

        // Roots are justified only now, so they see the outcome of every reduction.
        let roots = std::mem::take(&mut self.increase_roots);
        for pos in roots {
            let Some(current) = world.value_at(channel, pos) else {
                continue;
            };
            let justified = self.justified_value(&*world, pos);
            if justified > current {
                self.store(world, pos, justified);
            }
            self.queue_increase(pos, justified.max(current));
        }

        while let Some((pos, value)) = self.pop_increase() {
            // Skip entries superseded by a later raise or a reduction.
            if world.value_at(channel, pos) != Some(value) {
                continue;
            }
            self.push(world, pos, value);
        }
    }

    /// Offers the value of `pos` to each neighbour, raising those that hold less.
    fn push(&mut self, world: &mut dyn PropagatorWorldView, pos: BlockPos, value: u8) {
        let Some(block) = world.block_at(pos) else {
            return;
        };
        let channel = self.rules.channel();
        let max = self.rules.max_value();

        for side in Direction::ALL {
            if !self.rules.can_spread_out_of(&block, side) {
                continue;
            }
            let offer = self
                .rules
                .propagate_value(value, side, &block, self.scale)
                .min(max);
            if offer == 0 {
                continue;
            }

            let adjacent = pos.relative(side);
            let Some(adjacent_value) = world.value_at(channel, adjacent) else {
                continue;
            };
            if offer <= adjacent_value {
                continue;
            }
            let Some(adjacent_block) = world.block_at(adjacent) else {
                continue;
            };
            if self.rules.can_spread_into(&adjacent_block, side.opposite()) {
                self.store(world, adjacent, offer);
                self.queue_increase(adjacent, offer);
            }
        }
    }

    fn store(&mut self, world: &mut dyn PropagatorWorldView, pos: BlockPos, value: u8) {
        let channel = self.rules.channel();
        let value = value.min(self.rules.max_value());
        if let Some(changes) = &mut self.changes
            && let Some(old) = world.value_at(channel, pos)
        {
            changes
                .entry(pos)
                .and_modify(|(_, new)| *new = value)
                .or_insert((old, value));
        }
        world.set_value_at(channel, pos, value);
    }

    fn queue_reduction(&mut self, pos: BlockPos) {
        if self.reduce_pending.insert(pos) {
            self.reduce_queue.enqueue(pos);
        }
    }

    fn queue_increase(&mut self, pos: BlockPos, value: u8) {
        let bucket = usize::from(value.min(self.rules.max_value()));
        self.increase_queues[bucket].enqueue(pos);
        self.top = self.top.max(bucket);
    }

    fn pop_increase(&mut self) -> Option<(BlockPos, u8)> {
        loop {
            if let Some(pos) = self.increase_queues[self.top].dequeue() {
                return Some((pos, self.top as u8));
            }
            if self.top == 0 {
                return None;
            }
            self.top -= 1;
        }
    }
}

impl<R: PropagationRules> Propagator for BatchPropagator<R> {
    fn process(&mut self, world: &mut dyn PropagatorWorldView, changes: &[BlockChange]) {
        BatchPropagator::process(self, world, changes);
    }

    fn propagate_between(
        &mut self,
        world: &mut dyn PropagatorWorldView,
        source: ChunkPos,
        side: Direction,
        include_existing: bool,
    ) {
        BatchPropagator::propagate_between(self, world, source, side, include_existing);
    }
}
