use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::RouletteError;


pub type WeaponId = String;


// Weapon class (e.g. "primary", "sidearm") to the weapons it offers, in file order.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponPool {
    classes: BTreeMap<String, Vec<WeaponId>>,
}

impl WeaponPool {
    pub fn new(classes: BTreeMap<String, Vec<WeaponId>>) -> Self { WeaponPool { classes } }

    pub fn classes(&self) -> impl Iterator<Item = &String> { self.classes.keys() }
    pub fn weapons(&self, class: &str) -> Option<&[WeaponId]> {
        self.classes.get(class).map(|v| v.as_slice())
    }
}


// Last resolved weapon per class. Independent of players and of each other.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct WeaponSlots {
    last: HashMap<String, WeaponId>,
}

impl WeaponSlots {
    pub fn new() -> Self { WeaponSlots { last: HashMap::new() } }

    pub fn last(&self, class: &str) -> Option<&WeaponId> { self.last.get(class) }
    pub fn set_last(&mut self, class: &str, weapon: WeaponId) {
        self.last.insert(class.to_owned(), weapon);
    }
    pub fn clear(&mut self) { self.last.clear(); }
}

// Uniform over the whole class, minus whatever the slot resolved to last. Each weapon appears
// once no matter how often it is listed.
pub fn weapon_candidates(
    pool: &WeaponPool, slots: &WeaponSlots, class: &str,
) -> Result<Vec<WeaponId>, RouletteError> {
    let weapons = pool
        .weapons(class)
        .ok_or_else(|| RouletteError::UnknownWeaponSlot { slot: class.to_owned() })?;
    let previous = slots.last(class);
    let mut candidates: Vec<WeaponId> = Vec::with_capacity(weapons.len());
    for weapon in weapons {
        if Some(weapon) != previous && !candidates.contains(weapon) {
            candidates.push(weapon.clone());
        }
    }
    Ok(candidates)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> WeaponPool {
        WeaponPool::new(BTreeMap::from([
            ("primary".to_owned(), vec!["Vandal".to_owned(), "Phantom".to_owned(), "Spectre".to_owned()]),
            ("sidearm".to_owned(), vec!["Ghost".to_owned()]),
        ]))
    }

    #[test]
    fn previous_result_is_excluded() {
        let mut slots = WeaponSlots::new();
        assert_eq!(weapon_candidates(&pool(), &slots, "primary").unwrap().len(), 3);
        slots.set_last("primary", "Vandal".to_owned());
        assert_eq!(
            weapon_candidates(&pool(), &slots, "primary").unwrap(),
            vec!["Phantom".to_owned(), "Spectre".to_owned()]
        );
    }

    #[test]
    fn single_weapon_class_runs_dry_after_one_roll() {
        let mut slots = WeaponSlots::new();
        slots.set_last("sidearm", "Ghost".to_owned());
        assert!(weapon_candidates(&pool(), &slots, "sidearm").unwrap().is_empty());
        assert_eq!(
            weapon_candidates(&pool(), &slots, "melee"),
            Err(RouletteError::UnknownWeaponSlot { slot: "melee".to_owned() })
        );
    }
}
