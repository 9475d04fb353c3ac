//! Tests for the decision policy rule order and capture latch.

#[cfg(test)]
mod tests {
    use super::super::brain::{apply_grab_override, Brain, Intent, Perception};
    use crate::config::PolicyConfig;

    /// Free agent on its own side, nobody around, flag far away
    fn idle() -> Perception {
        Perception {
            has_flag: false,
            in_home_zone: false,
            distance_to_enemy_flag: 600.0,
            is_tagged: false,
            enemy_has_flag: false,
            distance_to_nearest_enemy: f32::INFINITY,
            is_tagging: false,
            is_stuck_in_middle: false,
            is_on_own_side: true,
        }
    }

    fn decide(perception: Perception) -> Intent {
        Brain::default().decide(&perception, &PolicyConfig::default()).intent
    }

    #[test]
    fn test_tagged_always_returns_home() {
        let perception = Perception {
            is_tagged: true,
            has_flag: true,
            in_home_zone: true,
            enemy_has_flag: true,
            ..idle()
        };
        assert_eq!(decide(perception), Intent::ReturnToHomeZone);
    }

    #[test]
    fn test_tag_clears_latch() {
        let policy = PolicyConfig::default();
        let mut brain = Brain {
            capture_counted: true,
        };

        brain.decide(&Perception { is_tagged: true, ..idle() }, &policy);
        assert!(!brain.capture_counted);
    }

    #[test]
    fn test_carrier_rules() {
        let carrying = Perception {
            has_flag: true,
            is_on_own_side: false,
            ..idle()
        };

        assert_eq!(decide(Perception { in_home_zone: true, ..carrying }), Intent::CaptureFlag);
        assert_eq!(
            decide(Perception {
                distance_to_nearest_enemy: 200.0,
                ..carrying
            }),
            Intent::AvoidEnemy
        );
        assert_eq!(
            decide(Perception {
                distance_to_nearest_enemy: 200.5,
                ..carrying
            }),
            Intent::ReturnToHomeZone
        );
    }

    #[test]
    fn test_home_zone_beats_nearby_enemy_for_carrier() {
        let perception = Perception {
            has_flag: true,
            in_home_zone: true,
            distance_to_nearest_enemy: 5.0,
            ..idle()
        };
        assert_eq!(decide(perception), Intent::CaptureFlag);
    }

    #[test]
    fn test_capture_counts_once_while_dwelling() {
        let policy = PolicyConfig::default();
        let mut brain = Brain::default();
        let dwelling = Perception {
            has_flag: true,
            in_home_zone: true,
            ..idle()
        };

        let scored: Vec<bool> = (0..5)
            .map(|_| brain.decide(&dwelling, &policy).capture_scored)
            .collect();
        assert_eq!(scored, vec![true, false, false, false, false]);

        brain.rearm();
        assert!(brain.decide(&dwelling, &policy).capture_scored);
    }

    #[test]
    fn test_enemy_carrier_rules() {
        let stolen = Perception {
            enemy_has_flag: true,
            ..idle()
        };

        assert_eq!(decide(stolen), Intent::TagEnemy);
        assert_eq!(
            decide(Perception {
                is_on_own_side: false,
                distance_to_nearest_enemy: 150.0,
                ..stolen
            }),
            Intent::AvoidEnemy
        );
        assert_eq!(
            decide(Perception {
                is_on_own_side: false,
                ..stolen
            }),
            Intent::RecoverFlag
        );
    }

    #[test]
    fn test_own_side_rules() {
        assert_eq!(decide(idle()), Intent::DefendFlag);
        assert_eq!(
            decide(Perception {
                distance_to_nearest_enemy: 199.0,
                ..idle()
            }),
            Intent::TagEnemy
        );
    }

    #[test]
    fn test_enemy_side_rules() {
        let away = Perception {
            is_on_own_side: false,
            distance_to_enemy_flag: 250.0,
            ..idle()
        };

        assert_eq!(decide(away), Intent::GrabFlag);
        assert_eq!(
            decide(Perception {
                distance_to_enemy_flag: 250.5,
                ..away
            }),
            Intent::Explore
        );
        assert_eq!(
            decide(Perception {
                is_stuck_in_middle: true,
                ..away
            }),
            Intent::Explore
        );
        assert_eq!(
            decide(Perception {
                distance_to_nearest_enemy: 100.0,
                ..away
            }),
            Intent::AvoidEnemy
        );
    }

    #[test]
    fn test_stuck_beats_avoidance_off_side() {
        let perception = Perception {
            is_on_own_side: false,
            is_stuck_in_middle: true,
            distance_to_enemy_flag: 100.0,
            distance_to_nearest_enemy: 10.0,
            ..idle()
        };
        assert_eq!(decide(perception), Intent::Explore);
    }

    #[test]
    fn test_is_tagging_does_not_change_choice() {
        let tagging = Perception {
            is_tagging: true,
            ..idle()
        };
        assert_eq!(decide(tagging), decide(idle()));
    }

    #[test]
    fn test_grab_override() {
        let policy = PolicyConfig::default();

        // Flag within grab radius wins over a defensive choice.
        let near_flag = Perception {
            distance_to_enemy_flag: 240.0,
            distance_to_nearest_enemy: 50.0,
            ..idle()
        };
        assert_eq!(apply_grab_override(Intent::TagEnemy, &near_flag, &policy), Intent::GrabFlag);

        // Nobody within clearance.
        let clear = Perception {
            distance_to_nearest_enemy: 100.5,
            ..idle()
        };
        assert_eq!(apply_grab_override(Intent::DefendFlag, &clear, &policy), Intent::GrabFlag);

        // Far flag and an enemy at the clearance boundary: unchanged.
        let contested = Perception {
            distance_to_nearest_enemy: 100.0,
            ..idle()
        };
        assert_eq!(apply_grab_override(Intent::TagEnemy, &contested, &policy), Intent::TagEnemy);
    }

    #[test]
    fn test_grab_override_skips_carriers_and_tagged() {
        let policy = PolicyConfig::default();

        let carrier = Perception {
            has_flag: true,
            ..idle()
        };
        assert_eq!(
            apply_grab_override(Intent::ReturnToHomeZone, &carrier, &policy),
            Intent::ReturnToHomeZone
        );

        let tagged = Perception {
            is_tagged: true,
            ..idle()
        };
        assert_eq!(
            apply_grab_override(Intent::ReturnToHomeZone, &tagged, &policy),
            Intent::ReturnToHomeZone
        );
    }
}
