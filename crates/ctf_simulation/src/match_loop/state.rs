//! Scoreboard and match clock

use bevy::prelude::*;

use crate::components::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    #[default]
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    BlueWins,
    RedWins,
    Draw,
}

impl MatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchOutcome::BlueWins => "blue wins",
            MatchOutcome::RedWins => "red wins",
            MatchOutcome::Draw => "draw",
        }
    }
}

/// Single owner of the scores. `increment_score` is the only mutator.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    blue_score: u32,
    red_score: u32,
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    pub tick: u64,
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
}

impl MatchState {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            blue_score: 0,
            red_score: 0,
            elapsed_ms: 0,
            remaining_ms: duration_ms,
            tick: 0,
            phase: MatchPhase::Running,
            outcome: None,
        }
    }

    /// Returns the team's new score.
    pub fn increment_score(&mut self, team: Team) -> u32 {
        let score = match team {
            Team::Blue => &mut self.blue_score,
            Team::Red => &mut self.red_score,
        };
        *score += 1;
        *score
    }

    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue_score,
            Team::Red => self.red_score,
        }
    }

    pub fn advance_clock(&mut self, dt_ms: u64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn decide_outcome(&self) -> MatchOutcome {
        match self.blue_score.cmp(&self.red_score) {
            std::cmp::Ordering::Greater => MatchOutcome::BlueWins,
            std::cmp::Ordering::Less => MatchOutcome::RedWins,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Freezes the clock and records the outcome. Returns it.
    pub fn finish(&mut self) -> MatchOutcome {
        let outcome = self.decide_outcome();
        self.phase = MatchPhase::Ended;
        self.outcome = Some(outcome);
        outcome
    }
}
