#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod availability;
pub mod candidates;
pub mod error;
pub mod event;
pub mod lobby;
pub mod player;
pub mod roulette;
pub mod rules;
pub mod selector;
pub mod spin;
pub mod storage;
pub mod test_util;
pub mod weapon;

pub use availability::available_agents;
pub use candidates::build_candidates;
pub use error::{RosterError, RouletteError, StorageError};
pub use event::{RouletteEvent, SpinTarget};
pub use lobby::{Lobby, MAX_LOBBY_SIZE};
pub use player::{AgentId, DEALER, Player, Roster, Schema};
pub use roulette::{Roulette, SharedRoulette};
pub use rules::{AGENT_RANDOM_WEIGHT, HouseRules, RouletteRules, SpinRules};
pub use selector::select;
pub use spin::{SpinId, SpinSchedule, SpinState, roll_all, roll_player, roll_weapon};
pub use weapon::{WeaponPool, WeaponSlots};
