use itertools::Itertools;

use crate::player::AgentId;


pub const MAX_LOBBY_SIZE: usize = 5;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LobbyMember {
    pub name: String,
    // Ephemeral selection. Written on every spin step; copied into the roster when the spin
    // settles.
    pub selected: Option<AgentId>,
}

// Players currently taking part in a roll session, in the order they joined.
//
// The lobby refers to roster entries by name only and keeps its own `selected` values, so
// nothing here aliases roster records.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Lobby {
    members: Vec<LobbyMember>,
}

impl Lobby {
    pub fn new() -> Self { Lobby { members: Vec::new() } }

    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }
    pub fn is_full(&self) -> bool { self.members.len() >= MAX_LOBBY_SIZE }
    pub fn contains(&self, name: &str) -> bool { self.member(name).is_some() }
    pub fn members(&self) -> impl Iterator<Item = &LobbyMember> { self.members.iter() }
    pub fn names(&self) -> Vec<String> { self.members.iter().map(|m| m.name.clone()).collect_vec() }

    pub fn member(&self, name: &str) -> Option<&LobbyMember> {
        self.members.iter().find(|m| m.name == name)
    }

    // Adding a sixth member or somebody already present does nothing. Returns whether the
    // player was added.
    pub fn add(&mut self, name: &str, selected: Option<AgentId>) -> bool {
        if self.is_full() || self.contains(name) {
            return false;
        }
        self.members.push(LobbyMember { name: name.to_owned(), selected });
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let len_before = self.members.len();
        self.members.retain(|m| m.name != name);
        self.members.len() != len_before
    }

    pub fn clear(&mut self) { self.members.clear(); }

    pub fn selected(&self, name: &str) -> Option<&AgentId> {
        self.member(name).and_then(|m| m.selected.as_ref())
    }

    // Unknown names are ignored.
    pub fn set_selected(&mut self, name: &str, agent: AgentId) {
        if let Some(member) = self.members.iter_mut().find(|m| m.name == name) {
            member.selected = Some(agent);
        }
    }

    // Whether anybody other than `name` currently holds `agent`.
    pub fn is_claimed_by_other(&self, name: &str, agent: &str) -> bool {
        self.members
            .iter()
            .any(|m| m.name != name && m.selected.as_deref() == Some(agent))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_and_duplicates_are_no_ops() {
        let mut lobby = Lobby::new();
        for name in ["A", "B", "C", "D", "E"] {
            assert!(lobby.add(name, None));
        }
        assert!(!lobby.add("F", None));
        assert!(!lobby.add("A", None));
        assert_eq!(lobby.names(), vec!["A", "B", "C", "D", "E"]);
        assert!(lobby.remove("C"));
        assert!(!lobby.remove("C"));
        assert!(lobby.add("A2", None));
        assert_eq!(lobby.len(), MAX_LOBBY_SIZE);
    }

    #[test]
    fn own_selection_is_not_a_claim() {
        let mut lobby = Lobby::new();
        lobby.add("Alice", Some("Jett".to_owned()));
        lobby.add("Bob", None);
        assert!(!lobby.is_claimed_by_other("Alice", "Jett"));
        assert!(lobby.is_claimed_by_other("Bob", "Jett"));
        lobby.set_selected("Nobody", "Sova".to_owned());
        assert!(!lobby.is_claimed_by_other("Alice", "Sova"));
    }
}
