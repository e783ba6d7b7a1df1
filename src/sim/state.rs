//! Entity state for the simulation
//!
//! Fish and the net share a common `Entity` body by composition; behaviour
//! lives behind the `Updatable` capability.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::platform::input::{InputProvider, Key};
use crate::settings::Settings;

/// Stable identifier for a live entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Fish variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishKind {
    /// Scores when caught, penalised when missed
    Benign,
    /// Ends the game when caught
    Hostile,
}

impl FishKind {
    /// Map a pattern symbol to a fish kind. `None` for unknown symbols.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'G' => Some(FishKind::Benign),
            'R' => Some(FishKind::Hostile),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            FishKind::Benign => 'G',
            FishKind::Hostile => 'R',
        }
    }
}

/// What an entity is, for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Fish(FishKind),
    Net,
}

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Shared body of every moving object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared when the owner culls the entity; dead bodies never collide
    pub alive: bool,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            alive: true,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Per-tick advancement capability
pub trait Updatable {
    fn update(&mut self, dt: f32);
}

/// A falling fish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub body: Entity,
    pub kind: FishKind,
    /// Downward speed in pixels per unit of dt
    pub speed: f32,
    pub caught: bool,
}

impl Fish {
    pub fn new(id: EntityId, kind: FishKind, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            body: Entity::new(id, pos, size),
            kind,
            speed,
            caught: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    /// Mark for removal on the next cull
    pub fn set_caught(&mut self) {
        self.caught = true;
    }
}

impl Updatable for Fish {
    fn update(&mut self, dt: f32) {
        self.body.pos.y += self.speed * dt;
    }
}

/// The player's net
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    pub body: Entity,
    /// Horizontal speed in pixels per unit of dt
    pub speed: f32,
    pub max_speed: f32,
    /// Rightmost screen coordinate the net may reach
    pub max_x: f32,
    /// Steering from the last input poll: -1 left, 0 idle, 1 right
    #[serde(skip)]
    direction: f32,
}

impl Net {
    pub fn new(id: EntityId, settings: &Settings) -> Self {
        Self {
            body: Entity::new(id, settings.net_start(), settings.net_size()),
            speed: settings.initial_net_speed(),
            max_speed: settings.max_net_speed(),
            max_x: settings.width,
            direction: 0.0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    /// Poll the movement keys. Both keys held cancel out.
    pub fn apply_input(&mut self, input: &dyn InputProvider) {
        let mut direction = 0.0;
        if input.is_pressed(Key::Left) {
            direction -= 1.0;
        }
        if input.is_pressed(Key::Right) {
            direction += 1.0;
        }
        self.direction = direction;
    }
}

impl Updatable for Net {
    fn update(&mut self, dt: f32) {
        let speed = self.speed.min(self.max_speed);
        let x = self.body.pos.x + self.direction * speed * dt;
        let right_limit = (self.max_x - self.body.size.x).max(0.0);
        self.body.pos.x = x.clamp(0.0, right_limit);
    }
}
