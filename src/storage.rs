// Flat JSON files: the roster, the schema for new players, weapon classes and the icon
// manifest. Nothing is written unless asked for, except creating a missing roster.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::player::{Roster, Schema};
use crate::weapon::WeaponPool;


pub const PLAYER_DATA_PATH: &str = "./players.json";
pub const SCHEMA_PATH: &str = "./schema.json";
pub const ICON_DATA_PATH: &str = "./icons.json";
pub const WEAPON_DATA_PATH: &str = "./weapons.json";


// Image paths per agent and weapon. Only the presentation layer cares about the images.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct IconManifest {
    #[serde(default)]
    pub agents: BTreeMap<String, String>,
    #[serde(default)]
    pub weapons: BTreeMap<String, String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

// Creates an empty roster file if there is none yet.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Roster, StorageError> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No roster at {}, creating an empty one", path.display());
        save_roster(&Roster::new(), path)?;
    }
    read_json(path)
}

// Overwrites the whole file. Keys come out sorted, indented by four spaces.
pub fn save_roster(roster: &Roster, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    roster.serialize(&mut serializer)?;
    let mut file = fs::File::create(path)?;
    file.write_all(&buf)?;
    info!("Saved {} players to {}", roster.len(), path.display());
    Ok(())
}

pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, StorageError> {
    read_json(path.as_ref())
}

pub fn load_weapon_pool(path: impl AsRef<Path>) -> Result<WeaponPool, StorageError> {
    read_json(path.as_ref())
}

pub fn load_icon_manifest(path: impl AsRef<Path>) -> Result<IconManifest, StorageError> {
    read_json(path.as_ref())
}
