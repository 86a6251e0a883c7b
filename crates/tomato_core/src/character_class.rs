//! Playable class catalogue.

/// A playable character class, keyed by its object type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CharacterClass {
    /// Rogue.
    Rogue = 768,
    /// Archer.
    Archer = 775,
    /// Wizard.
    Wizard = 782,
    /// Priest.
    Priest = 784,
    /// Samurai.
    Samurai = 785,
    /// Bard.
    Bard = 796,
    /// Warrior.
    Warrior = 797,
    /// Knight.
    Knight = 798,
    /// Paladin.
    Paladin = 799,
    /// Assassin.
    Assassin = 800,
    /// Necromancer.
    Necromancer = 801,
    /// Huntress.
    Huntress = 802,
    /// Mystic.
    Mystic = 803,
    /// Trickster.
    Trickster = 804,
    /// Sorcerer.
    Sorcerer = 805,
    /// Ninja.
    Ninja = 806,
    /// Summoner.
    Summoner = 817,
    /// Kensei.
    Kensei = 818,
    /// Druid.
    Druid = 819,
}

impl CharacterClass {
    /// Every playable class.
    pub const ALL: [Self; 19] = [
        Self::Rogue,
        Self::Archer,
        Self::Wizard,
        Self::Priest,
        Self::Samurai,
        Self::Bard,
        Self::Warrior,
        Self::Knight,
        Self::Paladin,
        Self::Assassin,
        Self::Necromancer,
        Self::Huntress,
        Self::Mystic,
        Self::Trickster,
        Self::Sorcerer,
        Self::Ninja,
        Self::Summoner,
        Self::Kensei,
        Self::Druid,
    ];

    /// Returns the class object type.
    #[inline]
    #[must_use]
    pub const fn object_type(self) -> u16 {
        self as u16
    }

    /// Looks up a class by object type. Non-player types yield `None`.
    #[must_use]
    pub fn from_object_type(object_type: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| i32::from(c.object_type()) == object_type)
    }

    /// Returns true if `object_type` is a playable class.
    #[inline]
    #[must_use]
    pub fn is_player_character(object_type: i32) -> bool {
        Self::from_object_type(object_type).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(CharacterClass::from_object_type(782), Some(CharacterClass::Wizard));
        assert_eq!(CharacterClass::from_object_type(819), Some(CharacterClass::Druid));
        assert!(CharacterClass::is_player_character(768));
    }

    #[test]
    fn test_non_player_types() {
        assert!(!CharacterClass::is_player_character(0));
        assert!(!CharacterClass::is_player_character(769));
        assert!(!CharacterClass::is_player_character(-782));
        assert!(!CharacterClass::is_player_character(46721));
    }
}
