//! Relighting of a chunk once its whole neighbourhood is loaded.

use std::sync::Arc;

use lumen_registry::BlockRegistry;
use lumen_utils::Direction;

use super::batch_propagator::{BatchPropagator, Propagator};
use super::rules::LightRules;
use super::sunlight_regen::SunlightRegenBatchPropagator;
use super::world_view::{ChunkNeighborhood, NeighborhoodView};
use crate::chunk::Chunk;
use crate::error::LightError;

/// Corrects the internal lighting of a chunk against its 26 neighbours.
pub struct LightMerger {
    registry: Arc<BlockRegistry>,
    light: BatchPropagator<LightRules>,
    sunlight: SunlightRegenBatchPropagator,
}

impl LightMerger {
    /// Creates a merger resolving blocks through `registry`.
    #[must_use]
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self {
            registry,
            light: BatchPropagator::new(LightRules),
            sunlight: SunlightRegenBatchPropagator::new(),
        }
    }

    /// Merges the centre chunk of `chunks` with its neighbours.
    ///
    /// `chunks` holds 27 slots ordered by offset from the centre, x fastest, then y,
    /// then z; slot 13 is the centre. Values flow both ways across the centre's faces,
    /// so neighbours are corrected too.
    ///
    /// # Errors
    /// Fails without touching any chunk when the slot count is wrong, a slot is empty or
    /// a chunk sits in the wrong slot.
    pub fn merge(&mut self, chunks: Vec<Option<&mut Chunk>>) -> Result<(), LightError> {
        let neighborhood = ChunkNeighborhood::new(chunks)?;
        let center = neighborhood.center();
        let mut view = NeighborhoodView::new(neighborhood, &self.registry);

        let propagators: [&mut dyn Propagator; 2] = [&mut self.light, &mut self.sunlight];
        for propagator in propagators {
            for side in Direction::ALL {
                propagator.propagate_between(&mut view, center.relative(side), side.opposite(), false);
            }
            for side in Direction::ALL {
                propagator.propagate_between(&mut view, center, side, true);
            }
            propagator.process(&mut view, &[]);
        }

        view.chunks_mut().center_mut().deflate_sunlight();
        log::trace!("Merged lighting of chunk {center:?}");
        Ok(())
    }
}
