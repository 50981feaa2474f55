use std::fmt;
use std::io;

use crate::event::SpinTarget;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RouletteError {
    // Nothing to draw from: every enabled agent is claimed by lobby-mates and the dealer
    // wildcard is off or already used; or a weapon class only holds the previous result.
    EmptyPool { target: SpinTarget },
    // Roll requested for a player that is not a lobby member.
    NotInLobby { player: String },
    // Roll requested while this target is still spinning.
    SpinInProgress { target: SpinTarget },
    UnknownWeaponSlot { slot: String },
    Internal { message: String },
}

impl fmt::Display for RouletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouletteError::EmptyPool { target } => write!(f, "No candidates left for {target}"),
            RouletteError::NotInLobby { player } => write!(f, "Player '{player}' is not in the lobby"),
            RouletteError::SpinInProgress { target } => write!(f, "{target} is already spinning"),
            RouletteError::UnknownWeaponSlot { slot } => write!(f, "Unknown weapon class '{slot}'"),
            RouletteError::Internal { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RouletteError {}


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RosterError {
    PlayerExists { player: String },
    InvalidPlayerName { player: String },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::PlayerExists { player } => write!(f, "Player '{player}' already in list"),
            RosterError::InvalidPlayerName { player } => write!(f, "Invalid player name: '{player}'"),
        }
    }
}

impl std::error::Error for RosterError {}


#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "I/O error: {err}"),
            StorageError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self { StorageError::Io(err) }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self { StorageError::Json(err) }
}
