//! Fish spawning, culling and difficulty scaling
//!
//! The fishery owns every live fish. Each update it advances them, culls the
//! ones that are caught or have fallen off the bottom, reports missed benign
//! fish, and spawns a fresh pattern whenever the top of the screen is empty.

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::atlas::{SpawnAtlas, SpawnPattern, Tier};
use super::events::Payload;
use super::state::{EntityId, EntityKind, Fish, FishKind, Updatable};
use crate::error::SimError;
use crate::platform::surface::RenderSurface;
use crate::settings::Settings;

/// First id handed to a fish; lower ids are reserved for singletons
pub const FIRST_FISH_ID: u32 = 1;

/// Difficulty progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Highest unlocked tier (0 = Easy only)
    pub tier_index: usize,
    /// Vertical unit divisor; fish speed is `height / divisor`
    pub divisor: f32,
    /// Difficulty increases applied so far
    pub increases_applied: u32,
}

pub struct Fishery {
    settings: Rc<Settings>,
    atlas: Rc<SpawnAtlas>,
    /// Live fish in spawn order
    fish: Vec<Fish>,
    difficulty: DifficultyState,
    /// Speed given to newly spawned fish
    fish_speed: f32,
    rng: Pcg32,
    next_id: u32,
}

impl Fishery {
    /// Create the fishery and spawn the first easy pattern
    pub fn new(
        settings: Rc<Settings>,
        atlas: Rc<SpawnAtlas>,
        surface: &mut dyn RenderSurface,
    ) -> Result<Self, SimError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Fishery seeded with {}", seed);

        let mut fishery = Self {
            difficulty: DifficultyState {
                tier_index: Tier::Easy.index(),
                divisor: settings.v_unit_divisor,
                increases_applied: 0,
            },
            fish_speed: settings.initial_fish_speed(),
            settings,
            atlas: atlas.clone(),
            fish: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: FIRST_FISH_ID,
        };

        if let Some(first) = atlas.patterns(Tier::Easy).first() {
            fishery.spawn(first, surface);
        }
        Ok(fishery)
    }

    /// Create one fish per occupied cell of the pattern.
    ///
    /// Columns are spaced `width / (cols + 1)` apart. The last row sits on the
    /// off-screen spawn line and earlier rows stack upward from it.
    pub fn spawn(&mut self, pattern: &SpawnPattern, surface: &mut dyn RenderSurface) -> usize {
        let x_spacing = self.settings.width / (pattern.cols() + 1) as f32;
        let spawn_y = self.settings.fish_spawn_y();
        let last_row = pattern.row_count().saturating_sub(1);
        let size = self.settings.fish_size();

        let mut spawned = 0;
        for (row, col, kind) in pattern.cells() {
            let pos = Vec2::new(
                (col + 1) as f32 * x_spacing,
                spawn_y - (last_row - row) as f32 * self.settings.fish_spacing_y,
            );
            let id = EntityId(self.next_id);
            self.next_id += 1;

            self.fish.push(Fish::new(id, kind, pos, size, self.fish_speed));
            surface.add_entity(id, EntityKind::Fish(kind));
            spawned += 1;
        }
        log::debug!("Spawned {} fish ({} rows)", spawned, pattern.row_count());
        spawned
    }

    /// Advance, cull and replenish. Returns the events raised by culling.
    pub fn update(&mut self, dt: f32, surface: &mut dyn RenderSurface) -> Vec<Payload> {
        for fish in &mut self.fish {
            fish.update(dt);
        }

        let height = self.settings.height;
        let mut events = Vec::new();
        self.fish.retain_mut(|fish| {
            let off_screen = fish.body.top() > height;
            if !off_screen && !fish.caught {
                return true;
            }
            if off_screen && !fish.caught && fish.kind == FishKind::Benign {
                events.push(Payload::Missed);
            }
            fish.body.alive = false;
            surface.remove_entity(fish.id());
            false
        });

        let band = self.settings.spawn_band;
        if !self.fish.iter().any(|f| f.body.top() < band) {
            self.spawn_random(surface);
        }
        events
    }

    /// Spawn a random pattern from the unlocked pool
    fn spawn_random(&mut self, surface: &mut dyn RenderSurface) {
        let atlas = self.atlas.clone();
        let pool: Vec<&SpawnPattern> = self
            .unlocked_tiers()
            .flat_map(|t| atlas.patterns(t))
            .collect();
        if pool.is_empty() {
            return;
        }
        let pick = self.rng.random_range(0..pool.len());
        self.spawn(pool[pick], surface);
    }

    /// Speed up future fish and unlock the next tier.
    ///
    /// `increases` is the caller's running count of increases (1-based).
    /// The divisor always steps down toward its floor; a tier unlocks only
    /// while `increases` is within the configured maximum and names a tier
    /// that is both present and still locked.
    pub fn increase_difficulty(&mut self, increases: u32) {
        let settings = &self.settings;
        let difficulty = &mut self.difficulty;

        difficulty.divisor =
            (difficulty.divisor - settings.v_unit_step).max(settings.min_v_unit_divisor);
        self.fish_speed = settings.height / difficulty.divisor;

        let max = settings.max_difficulty_increases;
        difficulty.increases_applied = (difficulty.increases_applied + 1).min(max);

        let next_tier = difficulty.tier_index + 1;
        if increases <= max && increases as usize >= next_tier {
            if let Some(tier) = Tier::from_index(next_tier) {
                difficulty.tier_index = next_tier;
                log::info!("Unlocked {:?} patterns", tier);
            }
        }
        log::info!(
            "Difficulty increase {}: divisor {}, fish speed {:.3}",
            increases,
            difficulty.divisor,
            self.fish_speed
        );
    }

    /// Remove every fish
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        for fish in self.fish.drain(..) {
            surface.remove_entity(fish.id());
        }
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn fish_mut(&mut self) -> &mut [Fish] {
        &mut self.fish
    }

    pub fn active_count(&self) -> usize {
        self.fish.len()
    }

    pub fn fish_speed(&self) -> f32 {
        self.fish_speed
    }

    pub fn difficulty(&self) -> &DifficultyState {
        &self.difficulty
    }

    /// Tiers whose patterns are in the spawn pool
    pub fn unlocked_tiers(&self) -> impl Iterator<Item = Tier> + use<> {
        Tier::ALL.into_iter().take(self.difficulty.tier_index + 1)
    }

    /// Number of patterns in the spawn pool
    pub fn pool_size(&self) -> usize {
        self.unlocked_tiers()
            .map(|t| self.atlas.patterns(t).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::surface::EntityRegistry;
    use proptest::prelude::*;

    fn settings() -> Rc<Settings> {
        Rc::new(Settings {
            width: 600.0,
            height: 400.0,
            seed: Some(42),
            ..Settings::default()
        })
    }

    fn fishery(registry: &mut EntityRegistry) -> Fishery {
        let atlas = Rc::new(SpawnAtlas::builtin().unwrap());
        Fishery::new(settings(), atlas, registry).unwrap()
    }

    #[test]
    fn test_initial_spawn_uses_first_easy_pattern() {
        let mut registry = EntityRegistry::new();
        let fishery = fishery(&mut registry);
        // "----G-----" / "-----G----"
        assert_eq!(fishery.active_count(), 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(fishery.pool_size(), 10);
    }

    #[test]
    fn test_pattern_grid_positions() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        fishery.clear(&mut registry);

        let pattern = SpawnPattern::parse("--G--\n--R--").unwrap();
        assert_eq!(fishery.spawn(&pattern, &mut registry), 2);

        let s = settings();
        let spacing = s.width / 6.0;
        let fish = fishery.fish();
        assert_eq!(fish[0].kind, FishKind::Benign);
        assert_eq!(fish[1].kind, FishKind::Hostile);
        // Same (third) column
        assert!((fish[0].body.pos.x - 3.0 * spacing).abs() < 1e-4);
        assert!((fish[1].body.pos.x - 3.0 * spacing).abs() < 1e-4);
        // Last row on the spawn line, first row one step above it
        assert!((fish[1].body.pos.y - s.fish_spawn_y()).abs() < 1e-4);
        assert!((fish[0].body.pos.y - (s.fish_spawn_y() - s.fish_spacing_y)).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_then_clear_round_trip() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        fishery.clear(&mut registry);
        assert_eq!(fishery.active_count(), 0);

        let pattern = SpawnPattern::parse("G-R-G\n-G-G-\nRRR--").unwrap();
        let k = pattern.fish_count();
        assert_eq!(fishery.spawn(&pattern, &mut registry), k);
        assert_eq!(fishery.active_count(), k);
        assert_eq!(registry.len(), k);
        assert!(fishery.fish().iter().all(|f| f.body.alive));

        fishery.clear(&mut registry);
        assert_eq!(fishery.active_count(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missed_benign_reported_once() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        fishery.clear(&mut registry);
        fishery.spawn(&SpawnPattern::parse("GR").unwrap(), &mut registry);

        // Drop both fish well below the screen in one step
        let events = fishery.update(10_000.0, &mut registry);
        assert_eq!(events, vec![Payload::Missed]);
        // Replacement pattern spawned because the top is empty
        assert!(fishery.active_count() > 0);
        assert!(fishery.fish().iter().all(|f| f.body.top() <= 400.0));
    }

    #[test]
    fn test_caught_fish_culled_silently() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        let ids: Vec<_> = fishery.fish().iter().map(|f| f.id()).collect();
        for fish in fishery.fish_mut() {
            fish.set_caught();
        }

        let events = fishery.update(0.0, &mut registry);
        assert!(events.is_empty());
        assert!(ids.iter().all(|id| !registry.contains(*id)));
    }

    #[test]
    fn test_no_spawn_while_top_band_occupied() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        let before = fishery.active_count();
        fishery.update(0.0, &mut registry);
        assert_eq!(fishery.active_count(), before);
    }

    #[test]
    fn test_idle_updates_do_not_grow_population() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        let before = fishery.active_count();
        for _ in 0..100 {
            fishery.update(0.0, &mut registry);
        }
        assert_eq!(fishery.active_count(), before);
    }

    #[test]
    fn test_unreachable_spawn_band_rejected() {
        let atlas = Rc::new(SpawnAtlas::builtin().unwrap());
        let settings = Rc::new(Settings {
            spawn_band: -100_000.0,
            seed: Some(1),
            ..Settings::default()
        });
        let result = Fishery::new(settings, atlas, &mut EntityRegistry::new());
        assert!(matches!(result, Err(SimError::Settings(_))));
    }

    #[test]
    fn test_speed_change_applies_to_new_fish_only() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);
        let old_speed = fishery.fish_speed();

        fishery.increase_difficulty(1);
        assert!((fishery.fish_speed() - 400.0 / 450.0).abs() < 1e-6);
        assert!(fishery.fish().iter().all(|f| f.speed == old_speed));

        fishery.spawn(&SpawnPattern::parse("G").unwrap(), &mut registry);
        let newest = fishery.fish().last().unwrap();
        assert_eq!(newest.speed, fishery.fish_speed());
    }

    #[test]
    fn test_tier_unlocks_once_per_increase() {
        let mut registry = EntityRegistry::new();
        let mut fishery = fishery(&mut registry);

        fishery.increase_difficulty(1);
        assert_eq!(fishery.pool_size(), 20);
        // Repeating the same count does not unlock again
        fishery.increase_difficulty(1);
        assert_eq!(fishery.pool_size(), 20);

        fishery.increase_difficulty(2);
        fishery.increase_difficulty(3);
        assert_eq!(fishery.pool_size(), 32);
        assert_eq!(fishery.unlocked_tiers().last(), Some(Tier::VeryHard));

        // Past the last tier: speed still scales, pool unchanged
        fishery.increase_difficulty(4);
        assert_eq!(fishery.pool_size(), 32);
    }

    #[test]
    fn test_beyond_max_does_not_unlock() {
        let mut registry = EntityRegistry::new();
        let atlas = Rc::new(SpawnAtlas::builtin().unwrap());
        let settings = Rc::new(Settings {
            max_difficulty_increases: 0,
            seed: Some(3),
            ..Settings::default()
        });
        let mut fishery = Fishery::new(settings, atlas, &mut registry).unwrap();
        fishery.increase_difficulty(1);
        assert_eq!(fishery.pool_size(), 10);
        assert_eq!(fishery.difficulty().increases_applied, 0);
        assert!(fishery.difficulty().divisor < 500.0);
    }

    proptest! {
        #[test]
        fn prop_divisor_monotonic_and_floored(calls in 0u32..40) {
            let mut registry = EntityRegistry::new();
            let mut fishery = fishery(&mut registry);
            let floor = settings().min_v_unit_divisor;
            let max = settings().max_difficulty_increases;
            let mut previous = fishery.difficulty().divisor;

            for n in 1..=calls {
                fishery.increase_difficulty(n);
                let d = fishery.difficulty();
                prop_assert!(d.divisor <= previous);
                prop_assert!(d.divisor >= floor);
                prop_assert!(d.increases_applied <= max);
                prop_assert!(d.tier_index < Tier::ALL.len());
                previous = d.divisor;
            }
        }

        #[test]
        fn prop_update_keeps_fish_on_screen(
            steps in proptest::collection::vec(0.0f32..50.0, 1..60),
        ) {
            let mut registry = EntityRegistry::new();
            let mut fishery = fishery(&mut registry);
            for dt in steps {
                fishery.update(dt, &mut registry);
                prop_assert!(fishery.fish().iter().all(|f| f.body.top() <= 400.0 && !f.caught));
                prop_assert_eq!(registry.len(), fishery.active_count());
            }
        }
    }
}
