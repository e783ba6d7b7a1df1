//! Per-frame simulation driver
//!
//! One `tick` runs, in order: fishery advance/cull/spawn, net movement,
//! collision detection, then event fan-out to the score and rules
//! observers. Every event raised in a tick is resolved before it returns.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::atlas::SpawnAtlas;
use super::collision::CollisionDetector;
use super::events::{ComponentId, EventBus, Payload};
use super::fishery::Fishery;
use super::rules::{GamePhase, GameRules};
use super::score::ScoreTracker;
use super::state::{EntityId, EntityKind, Net, Updatable};
use crate::error::SimError;
use crate::platform::input::InputProvider;
use crate::platform::surface::{EntityRegistry, RenderChange, RenderSurface};
use crate::settings::Settings;

/// The net is the only singleton entity
pub const NET_ID: EntityId = EntityId(0);

/// Everything the display layer shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub missed: u32,
    pub missed_threshold: u32,
    /// Terminal message once the session is lost
    pub message: Option<String>,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn missed_text(&self) -> String {
        format!("Missed: {} / {}", self.missed, self.missed_threshold)
    }
}

/// A complete game session
pub struct Simulation {
    settings: Rc<Settings>,
    fishery: Fishery,
    net: Net,
    detector: CollisionDetector,
    bus: EventBus,
    score: Rc<RefCell<ScoreTracker>>,
    rules: Rc<RefCell<GameRules>>,
    registry: EntityRegistry,
    /// Ticks simulated while playing
    ticks: u64,
}

impl Simulation {
    /// Start a session with the built-in pattern catalogue
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        Self::with_atlas(settings, Rc::new(SpawnAtlas::builtin()?))
    }

    /// Start a session with a custom catalogue
    pub fn with_atlas(settings: Settings, atlas: Rc<SpawnAtlas>) -> Result<Self, SimError> {
        settings.validate()?;
        let settings = Rc::new(settings);
        let mut registry = EntityRegistry::new();

        let net = Net::new(NET_ID, &settings);
        registry.add_entity(NET_ID, EntityKind::Net);
        let fishery = Fishery::new(settings.clone(), atlas, &mut registry)?;

        let score = Rc::new(RefCell::new(ScoreTracker::new()));
        let rules = Rc::new(RefCell::new(GameRules::new(&settings)?));

        let mut bus = EventBus::new();
        bus.register_sender(ComponentId::Fishery);
        bus.register_sender(ComponentId::CollisionDetector);
        bus.register_sender(ComponentId::ScoreTracker);
        bus.subscribe(score.clone());
        bus.subscribe(rules.clone());

        log::info!(
            "New session: {}x{}, {} misses allowed",
            settings.width,
            settings.height,
            settings.game_over_threshold
        );

        Ok(Self {
            settings,
            fishery,
            net,
            detector: CollisionDetector::new(),
            bus,
            score,
            rules,
            registry,
            ticks: 0,
        })
    }

    /// Advance the session by `dt`. A lost session ignores ticks.
    pub fn tick(&mut self, dt: f32, input: &dyn InputProvider) -> Result<(), SimError> {
        if !(dt >= 0.0 && dt.is_finite()) {
            return Err(SimError::InvalidDelta(dt));
        }
        if self.is_over() {
            return Ok(());
        }
        self.ticks += 1;

        let missed = self.fishery.update(dt, &mut self.registry);

        self.net.apply_input(input);
        self.net.update(dt);

        let catches = self.detector.update(&mut self.fishery, &self.net);

        self.dispatch(ComponentId::Fishery, missed)?;
        self.dispatch(ComponentId::CollisionDetector, catches)?;
        Ok(())
    }

    /// Publish in order, stopping as soon as the session is lost
    fn dispatch(&mut self, sender: ComponentId, payloads: Vec<Payload>) -> Result<(), SimError> {
        for payload in payloads {
            if self.is_over() {
                break;
            }
            self.bus.publish(sender, payload, &mut self.fishery)?;
        }
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.rules.borrow().phase()
    }

    pub fn is_over(&self) -> bool {
        self.rules.borrow().is_lost()
    }

    pub fn score(&self) -> u32 {
        self.score.borrow().score()
    }

    pub fn missed(&self) -> u32 {
        self.rules.borrow().missed()
    }

    pub fn hud(&self) -> Hud {
        let rules = self.rules.borrow();
        Hud {
            score: self.score(),
            missed: rules.missed(),
            missed_threshold: rules.game_over_threshold(),
            message: rules.message(),
        }
    }

    pub fn fishery(&self) -> &Fishery {
        &self.fishery
    }

    /// Direct access for scripted setups
    pub fn fishery_mut(&mut self) -> &mut Fishery {
        &mut self.fishery
    }

    pub fn net(&self) -> &Net {
        &self.net
    }

    pub fn net_mut(&mut self) -> &mut Net {
        &mut self.net
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Split borrow of the fishery and the registry for spawning by hand
    pub fn fishery_and_registry(&mut self) -> (&mut Fishery, &mut EntityRegistry) {
        (&mut self.fishery, &mut self.registry)
    }

    /// Lifecycle changes since the last call, for the render layer
    pub fn drain_render_changes(&mut self) -> Vec<RenderChange> {
        self.registry.drain_changes()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
