//! Collision detection between falling fish and the net
//!
//! A cheap vertical pre-filter narrows the population to fish that have
//! reached the net's top edge, then an exact AABB test decides the catch.

use super::events::Payload;
use super::fishery::Fishery;
use super::state::{Aabb, Fish, Net};

/// Whether two boxes overlap (edges that only touch do not count)
#[inline]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Broad phase: a live fish whose bottom edge has reached or passed the
/// net's top
#[inline]
fn near_net(fish: &Fish, net: &Net) -> bool {
    fish.body.alive && fish.body.bottom() >= net.body.top()
}

#[derive(Debug, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Mark every fish overlapping the net as caught and return one catch
    /// event per newly caught fish. Fish already flagged this tick are
    /// skipped.
    pub fn update(&self, fishery: &mut Fishery, net: &Net) -> Vec<Payload> {
        let net_bounds = net.body.bounds();
        let mut catches = Vec::new();

        for fish in fishery.fish_mut() {
            if fish.caught || !near_net(fish, net) {
                continue;
            }
            if aabb_overlap(&fish.body.bounds(), &net_bounds) {
                fish.set_caught();
                log::debug!("Caught {:?} fish {:?}", fish.kind, fish.id());
                catches.push(Payload::Catch(fish.kind));
            }
        }
        catches
    }
}
