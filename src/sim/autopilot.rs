//! Demo-mode steering
//!
//! Picks movement keys for the net: dodge a hostile fish that is about to
//! land on it, otherwise chase the lowest benign fish.

use super::state::{Fish, FishKind, Net};
use super::tick::Simulation;
use crate::platform::input::{Key, KeyState};

/// Hostile fish closer than this many fish heights above the net are threats
const THREAT_HEIGHTS: f32 = 2.0;

#[derive(Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Key state to feed the next tick
    pub fn steer(&self, sim: &Simulation) -> KeyState {
        let net = sim.net();
        let fish = sim.fishery().fish();
        let mut keys = KeyState::default();

        let target = match self.threat(net, fish) {
            // Move to whichever side of the threat has more room
            Some(threat) => {
                let threat_center = center_x(threat);
                if threat_center > sim.settings().width / 2.0 {
                    threat.body.pos.x - net.body.size.x
                } else {
                    threat.body.pos.x + threat.body.size.x
                }
            }
            None => match self.lowest_benign(fish) {
                Some(prey) => center_x(prey) - net.body.size.x / 2.0,
                None => return keys,
            },
        };

        let deadzone = net.speed.max(1.0);
        let offset = target - net.body.pos.x;
        if offset < -deadzone {
            keys.press(Key::Left);
        } else if offset > deadzone {
            keys.press(Key::Right);
        }
        keys
    }

    /// Uncaught hostile fish that would land on the net where it stands
    fn threat<'a>(&self, net: &Net, fish: &'a [Fish]) -> Option<&'a Fish> {
        let left = net.body.pos.x;
        let right = left + net.body.size.x;
        fish.iter()
            .filter(|f| f.kind == FishKind::Hostile && !f.caught)
            .filter(|f| f.body.bottom() >= net.body.top() - f.body.size.y * THREAT_HEIGHTS)
            .filter(|f| f.body.pos.x < right && f.body.pos.x + f.body.size.x > left)
            .max_by(|a, b| a.body.bottom().total_cmp(&b.body.bottom()))
    }

    /// Uncaught benign fish closest to the bottom of the screen
    fn lowest_benign<'a>(&self, fish: &'a [Fish]) -> Option<&'a Fish> {
        fish.iter()
            .filter(|f| f.kind == FishKind::Benign && !f.caught)
            .max_by(|a, b| a.body.bottom().total_cmp(&b.body.bottom()))
    }
}

fn center_x(fish: &Fish) -> f32 {
    fish.body.pos.x + fish.body.size.x / 2.0
}
