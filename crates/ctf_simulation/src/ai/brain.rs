//! Brain: perception → intent

use crate::config::PolicyConfig;

/// Single discrete action chosen for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Explore,
    GrabFlag,
    CaptureFlag,
    AvoidEnemy,
    RecoverFlag,
    DefendFlag,
    TagEnemy,
    ReturnToHomeZone,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Explore => "Explore",
            Intent::GrabFlag => "GrabFlag",
            Intent::CaptureFlag => "CaptureFlag",
            Intent::AvoidEnemy => "AvoidEnemy",
            Intent::RecoverFlag => "RecoverFlag",
            Intent::DefendFlag => "DefendFlag",
            Intent::TagEnemy => "TagEnemy",
            Intent::ReturnToHomeZone => "ReturnToHomeZone",
        }
    }
}

/// What an agent knows about the world this tick
///
/// Distances are in field units. `distance_to_nearest_enemy` is
/// `f32::INFINITY` when the opposing team has no agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub has_flag: bool,
    pub in_home_zone: bool,
    pub distance_to_enemy_flag: f32,
    pub is_tagged: bool,
    pub enemy_has_flag: bool,
    pub distance_to_nearest_enemy: f32,
    pub is_tagging: bool,
    pub is_stuck_in_middle: bool,
    pub is_on_own_side: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub intent: Intent,
    /// True exactly when this decision is the one that counts a capture
    pub capture_scored: bool,
}

impl Decision {
    fn plain(intent: Intent) -> Self {
        Self {
            intent,
            capture_scored: false,
        }
    }
}

/// Per-agent decision state
///
/// `capture_counted` is the "has this agent's capture already been counted"
/// latch. It is set when a capture scores and cleared on tag or on a fresh
/// pickup (`rearm`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Brain {
    pub capture_counted: bool,
}

impl Brain {
    /// Rules are evaluated top to bottom; the first match wins.
    pub fn decide(&mut self, perception: &Perception, policy: &PolicyConfig) -> Decision {
        let enemy_close = perception.distance_to_nearest_enemy <= policy.tag_avoidance_radius;

        if perception.is_tagged {
            self.capture_counted = false;
            return Decision::plain(Intent::ReturnToHomeZone);
        }

        if perception.has_flag {
            if perception.in_home_zone {
                return Decision {
                    intent: Intent::CaptureFlag,
                    capture_scored: self.claim_capture(),
                };
            }
            if enemy_close {
                return Decision::plain(Intent::AvoidEnemy);
            }
            return Decision::plain(Intent::ReturnToHomeZone);
        }

        if perception.enemy_has_flag {
            if perception.is_on_own_side {
                return Decision::plain(Intent::TagEnemy);
            }
            if enemy_close {
                return Decision::plain(Intent::AvoidEnemy);
            }
            return Decision::plain(Intent::RecoverFlag);
        }

        if perception.is_on_own_side {
            if enemy_close {
                return Decision::plain(Intent::TagEnemy);
            }
            return Decision::plain(Intent::DefendFlag);
        }

        if perception.is_stuck_in_middle || perception.distance_to_enemy_flag > policy.grab_radius {
            return Decision::plain(Intent::Explore);
        }
        if enemy_close {
            return Decision::plain(Intent::AvoidEnemy);
        }
        Decision::plain(Intent::GrabFlag)
    }

    /// Returns true the first time it is called after a reset.
    pub fn claim_capture(&mut self) -> bool {
        if self.capture_counted {
            return false;
        }
        self.capture_counted = true;
        true
    }

    pub fn rearm(&mut self) {
        self.capture_counted = false;
    }
}

/// Forces GrabFlag for a free agent near the enemy flag or with no enemy close.
pub fn apply_grab_override(intent: Intent, perception: &Perception, policy: &PolicyConfig) -> Intent {
    if perception.has_flag || perception.is_tagged {
        return intent;
    }
    let flag_close = perception.distance_to_enemy_flag <= policy.grab_radius;
    let nobody_near = perception.distance_to_nearest_enemy > policy.grab_override_clearance;
    if flag_close || nobody_near {
        Intent::GrabFlag
    } else {
        intent
    }
}
