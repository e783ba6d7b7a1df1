//! Game-over and difficulty policy
//!
//! `GameRules` is a two-state machine: `Playing` until a hostile fish is
//! caught or too many benign fish are missed, then `Lost` for good.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::events::{Dispatch, Event, NotificationReceiver, Payload};
use super::state::FishKind;
use crate::error::SimError;
use crate::settings::Settings;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    CaughtHostile,
    MissedTooMany,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossReason::CaughtHostile => write!(f, "You lose! You caught a hostile fish."),
            LossReason::MissedTooMany => write!(f, "You lose! You missed too many benign fish."),
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Session over (terminal)
    Lost(LossReason),
}

#[derive(Debug)]
pub struct GameRules {
    phase: GamePhase,
    /// Difficulty increases triggered so far
    difficulty_increases: u32,
    missed: u32,
    fish_before_increase: u32,
    game_over_threshold: u32,
    max_difficulty_increases: u32,
}

impl GameRules {
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        Ok(Self {
            phase: GamePhase::Playing,
            difficulty_increases: 0,
            missed: 0,
            fish_before_increase: settings.fish_before_difficulty_increase,
            game_over_threshold: settings.game_over_threshold,
            max_difficulty_increases: settings.max_difficulty_increases,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.phase, GamePhase::Lost(_))
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    pub fn game_over_threshold(&self) -> u32 {
        self.game_over_threshold
    }

    pub fn difficulty_increases(&self) -> u32 {
        self.difficulty_increases
    }

    pub fn missed_text(&self) -> String {
        format!("Missed: {} / {}", self.missed, self.game_over_threshold)
    }

    /// Terminal message, once lost
    pub fn message(&self) -> Option<String> {
        match self.phase {
            GamePhase::Lost(reason) => Some(reason.to_string()),
            GamePhase::Playing => None,
        }
    }

    fn lose(&mut self, reason: LossReason) {
        log::info!("Game over: {:?}", reason);
        self.phase = GamePhase::Lost(reason);
    }
}

impl NotificationReceiver for GameRules {
    fn on_notify(&mut self, event: &Event, ctx: &mut Dispatch<'_>) -> Result<(), SimError> {
        if self.is_lost() {
            return Ok(());
        }

        match event.payload {
            Payload::Catch(FishKind::Hostile) => self.lose(LossReason::CaughtHostile),
            Payload::Catch(FishKind::Benign) => {}
            Payload::ScoreUpdated(score) => {
                if score % self.fish_before_increase == 0
                    && self.difficulty_increases < self.max_difficulty_increases
                {
                    self.difficulty_increases += 1;
                    ctx.fishery.increase_difficulty(self.difficulty_increases);
                }
            }
            Payload::Missed => {
                self.missed += 1;
                log::debug!("{}", self.missed_text());
                if self.missed >= self.game_over_threshold {
                    self.lose(LossReason::MissedTooMany);
                }
            }
        }
        Ok(())
    }
}
