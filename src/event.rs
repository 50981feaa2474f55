use std::fmt;

use serde::{Deserialize, Serialize};


// What a spin is rolling for. Each target owns exactly one spin at a time.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SpinTarget {
    Player(String),
    WeaponSlot(String),
}

impl fmt::Display for SpinTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinTarget::Player(name) => write!(f, "player '{name}'"),
            SpinTarget::WeaponSlot(class) => write!(f, "weapon slot '{class}'"),
        }
    }
}

// Notifications for the presentation layer. The core never touches widgets, icons or audio
// directly; it only emits these.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum RouletteEvent {
    // The wheel clicked over to a new value. Sent on every step, including the last one.
    IconChanged {
        target: SpinTarget,
        value: String,
    },
    // Play the click sound. Suppressed for muted spins.
    SoundCue,
    // The spin settled; the last `IconChanged` value for this target is final and the roll
    // trigger may be re-enabled.
    SpinFinished {
        target: SpinTarget,
    },
}
