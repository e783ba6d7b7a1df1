//! Score keeping

use super::events::{ComponentId, Dispatch, Event, NotificationReceiver, Payload};
use super::state::FishKind;
use crate::error::SimError;

/// Counts benign catches and announces every new score
#[derive(Debug, Default)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

impl NotificationReceiver for ScoreTracker {
    fn on_notify(&mut self, event: &Event, ctx: &mut Dispatch<'_>) -> Result<(), SimError> {
        if let Payload::Catch(FishKind::Benign) = event.payload {
            self.score += 1;
            ctx.publish(ComponentId::ScoreTracker, Payload::ScoreUpdated(self.score));
        }
        Ok(())
    }
}
