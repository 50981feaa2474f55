use std::time::Duration;

use serde::{Deserialize, Serialize};


// How many times each real agent is repeated in the candidate list. The dealer wildcard is
// always added once, so with a weight above one real agents are favored over it.
pub const AGENT_RANDOM_WEIGHT: usize = 1;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct HouseRules {
    pub dealers_choice: bool,
    // Exposed in the UI, but has no effect on any roll.
    pub optimal_comp: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SpinRules {
    pub base_delay: Duration,
    pub num_steps: u32,
    // Number of leading steps that run at `base_delay` before the wheel starts slowing down.
    pub steady_steps: u32,
    pub delay_growth: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RouletteRules {
    pub house_rules: HouseRules,
    pub spin_rules: SpinRules,
    pub agent_weight: usize,
}

impl SpinRules {
    pub fn reference() -> Self {
        SpinRules {
            base_delay: Duration::from_millis(50),
            num_steps: 30,
            steady_steps: 6,
            delay_growth: 1.11,
        }
    }

    // Same number of steps, no waiting. For tests and non-interactive rolls.
    pub fn instant() -> Self {
        SpinRules {
            base_delay: Duration::ZERO,
            ..SpinRules::reference()
        }
    }
}

impl Default for SpinRules {
    fn default() -> Self { SpinRules::reference() }
}

impl RouletteRules {
    pub fn new(house_rules: HouseRules, spin_rules: SpinRules) -> Self {
        RouletteRules {
            house_rules,
            spin_rules,
            agent_weight: AGENT_RANDOM_WEIGHT,
        }
    }
}

impl Default for RouletteRules {
    fn default() -> Self { RouletteRules::new(HouseRules::default(), SpinRules::reference()) }
}

