//! # Character Roster
//!
//! The account's playable characters plus exaltation progress per class.
//!
//! Exaltation progress is keyed by class object type and shared by every
//! character of that class. It outlives realm changes: a session clear does not
//! touch the roster.

use std::collections::HashMap;

use tomato_protocol::ExaltationUpdate;

/// A playable character as reported by the character list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RealmCharacter {
    /// Character id.
    pub char_id: i32,
    /// Class object type.
    pub object_type: u16,
    /// Character name.
    pub name: String,
    /// Seasonal character.
    pub seasonal: bool,
    /// Equipment and backpack item types (-1 = empty slot).
    pub inventory: Vec<i32>,
}

/// Exaltation progress for one class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExaltProgress {
    /// Dexterity.
    pub dexterity: u8,
    /// Speed.
    pub speed: u8,
    /// Vitality.
    pub vitality: u8,
    /// Wisdom.
    pub wisdom: u8,
    /// Defense.
    pub defense: u8,
    /// Attack.
    pub attack: u8,
    /// Mana.
    pub mana: u8,
    /// Health.
    pub health: u8,
}

impl ExaltProgress {
    /// Progress as an array: dexterity, speed, vitality, wisdom, defense,
    /// attack, mana, health.
    #[must_use]
    pub const fn as_array(&self) -> [u8; 8] {
        [
            self.dexterity,
            self.speed,
            self.vitality,
            self.wisdom,
            self.defense,
            self.attack,
            self.mana,
            self.health,
        ]
    }
}

impl From<&ExaltationUpdate> for ExaltProgress {
    fn from(p: &ExaltationUpdate) -> Self {
        Self {
            dexterity: p.dexterity_progress,
            speed: p.speed_progress,
            vitality: p.vitality_progress,
            wisdom: p.wisdom_progress,
            defense: p.defense_progress,
            attack: p.attack_progress,
            mana: p.mana_progress,
            health: p.health_progress,
        }
    }
}

/// Character list and exaltation table.
#[derive(Clone, Debug, Default)]
pub struct CharacterRoster {
    characters: Vec<RealmCharacter>,
    exalts: HashMap<u16, ExaltProgress>,
}

impl CharacterRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts a fresh character list, dropping the previous one.
    pub fn replace(&mut self, characters: Vec<RealmCharacter>) {
        self.characters = characters;
    }

    /// Current characters.
    #[must_use]
    pub fn characters(&self) -> &[RealmCharacter] {
        &self.characters
    }

    /// Character with `char_id`.
    #[must_use]
    pub fn by_id(&self, char_id: i32) -> Option<&RealmCharacter> {
        self.characters.iter().find(|c| c.char_id == char_id)
    }

    /// Stores exaltation progress for a class.
    pub fn set_exalts(&mut self, object_type: u16, progress: ExaltProgress) {
        self.exalts.insert(object_type, progress);
    }

    /// Exaltation progress for a class.
    #[must_use]
    pub fn exalts(&self, object_type: u16) -> Option<ExaltProgress> {
        self.exalts.get(&object_type).copied()
    }

    /// Exaltation progress shared by a character's class.
    #[must_use]
    pub fn exalts_for(&self, character: &RealmCharacter) -> Option<ExaltProgress> {
        self.exalts(character.object_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exalt_array_order() {
        let update = ExaltationUpdate {
            obj_type: 782,
            dexterity_progress: 1,
            speed_progress: 2,
            vitality_progress: 3,
            wisdom_progress: 4,
            defense_progress: 5,
            attack_progress: 6,
            mana_progress: 7,
            health_progress: 8,
        };
        assert_eq!(ExaltProgress::from(&update).as_array(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_exalts_shared_by_class() {
        let mut roster = CharacterRoster::new();
        roster.replace(vec![
            RealmCharacter { char_id: 1, object_type: 782, ..Default::default() },
            RealmCharacter { char_id: 2, object_type: 782, ..Default::default() },
        ]);
        roster.set_exalts(782, ExaltProgress { attack: 3, ..Default::default() });

        let a = roster.exalts_for(roster.by_id(1).unwrap());
        let b = roster.exalts_for(roster.by_id(2).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.unwrap().attack, 3);
    }

    #[test]
    fn test_replace_drops_old_characters() {
        let mut roster = CharacterRoster::new();
        roster.replace(vec![RealmCharacter { char_id: 1, ..Default::default() }]);
        roster.replace(vec![RealmCharacter { char_id: 2, ..Default::default() }]);
        assert!(roster.by_id(1).is_none());
        assert_eq!(roster.characters().len(), 1);
    }
}
