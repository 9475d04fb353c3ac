//! Scenario presets selectable from the CLI

use serde::{Deserialize, Serialize};

use super::MatchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// 4v4, zones at mid-height on each flank
    #[default]
    Default,
    /// `n / 2` blue agents, the rest red
    AgentCount(u32),
    /// Blue zone in the top-left corner, red zone in the bottom-right
    CornerZones,
}

impl Scenario {
    pub fn apply(self, config: &mut MatchConfig) {
        match self {
            Scenario::Default => {}
            Scenario::AgentCount(total) => {
                config.blue.agents = total / 2;
                config.red.agents = total - total / 2;
            }
            Scenario::CornerZones => {
                let width = config.field.width as f32;
                let height = config.field.height as f32;
                let blue = (50.0, 50.0);
                let red = (width - 50.0, height - 50.0);

                config.blue.flag_position = blue;
                config.blue.base_position = blue;
                config.red.flag_position = red;
                config.red.base_position = red;
            }
        }
    }
}
