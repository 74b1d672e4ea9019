//! Run driver producing classified entities in loop order.

use crate::lifecycle::classify;
use crate::rng::Mulberry32;
use crate::synthesizer::{draw_id, synthesize};
use insights_core::{Lifecycle, MediaEntity, RunConfig};
use std::collections::HashSet;
use tracing::debug;

/// One entity together with its position in the run and its output shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedEntity {
    /// Loop index within the run
    pub index: u64,
    pub entity: MediaEntity,
    pub lifecycle: Lifecycle,
}

/// Deterministic entity generator for a single run.
///
/// Owns the only pseudo-random stream of the run; entities are drawn
/// strictly one after another, so the same configuration always yields the
/// same sequence.
///
/// Ids are unique within a run. An id already handed out is replaced by
/// fresh draws appended after the entity's own draws.
pub struct FixtureGenerator {
    config: RunConfig,
    rng: Mulberry32,
    /// Number of entities produced so far
    index: u64,
    seen_ids: HashSet<String>,
}

impl FixtureGenerator {
    pub fn new(config: RunConfig) -> Self {
        let rng = Mulberry32::new(config.prng_seed());
        Self {
            config,
            rng,
            index: 0,
            seen_ids: HashSet::new(),
        }
    }

    /// Get the current entity index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Synthesize and classify the next entity.
    pub fn next_entity(&mut self) -> GeneratedEntity {
        let index = self.index;
        let mut entity = synthesize(&mut self.rng, &self.config);
        while !self.seen_ids.insert(entity.id.clone()) {
            let redrawn = draw_id(&mut self.rng);
            debug!(index, id = %entity.id, %redrawn, "Redrew repeated entity id");
            entity.id = redrawn;
        }
        let lifecycle = classify(&entity, &self.config);

        debug!(
            index,
            id = %entity.id,
            media_type = %entity.media_type(),
            ?lifecycle,
            "Synthesized entity"
        );

        self.index += 1;
        GeneratedEntity {
            index,
            entity,
            lifecycle,
        }
    }

    /// Lazily generate the remaining entities of the run (up to `config.count`).
    pub fn entities(&mut self) -> EntityIterator<'_> {
        let remaining = self.config.count.saturating_sub(self.index);
        EntityIterator {
            generator: self,
            remaining,
        }
    }
}

/// Iterator that lazily generates entities.
pub struct EntityIterator<'a> {
    generator: &'a mut FixtureGenerator,
    remaining: u64,
}

impl Iterator for EntityIterator<'_> {
    type Item = GeneratedEntity;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_entity())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EntityIterator<'_> {}
