//! # Vault Aggregation
//!
//! Two aggregates exist per session, regular and seasonal. Each combines:
//!
//! - **Character contributions**: the inventories from the latest character
//!   list, replaced wholesale whenever a new list arrives
//! - **Chest contents**: the latest vault, gift chest and potion storage push
//!
//! Routing between the two aggregates is decided by the session, and by two
//! independent rules: characters route by their own seasonal flag, chest pushes
//! route by [`route_vault_update`].

use std::collections::BTreeMap;

use tomato_protocol::VaultContent;

use crate::entity::Entity;
use crate::roster::RealmCharacter;

/// Item type of an empty slot.
pub const EMPTY_SLOT: i32 = -1;

/// Which of the two aggregates an update belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VaultKind {
    /// Regular characters.
    Regular,
    /// Seasonal characters.
    Seasonal,
}

impl VaultKind {
    /// Routing for a character-list entry: its own seasonal flag.
    #[must_use]
    pub const fn for_character(character: &RealmCharacter) -> Self {
        if character.seasonal {
            Self::Seasonal
        } else {
            Self::Regular
        }
    }
}

/// Routing for a vault-content push.
///
/// The packet carries no hint of its own; the decision reads `flag_stat` off
/// the local player at arrival time. A value of exactly 1 means seasonal.
/// Anything else, including an unknown local player, means regular.
#[must_use]
pub fn route_vault_update(local_player: Option<&Entity>, flag_stat: u8) -> VaultKind {
    match local_player.and_then(|p| p.stat_int(flag_stat)) {
        Some(1) => VaultKind::Seasonal,
        _ => VaultKind::Regular,
    }
}

/// Latest chest contents pushed by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChestContents {
    /// Vault chest object id.
    pub vault_chest_object_id: i32,
    /// Gift chest object id.
    pub gift_chest_object_id: i32,
    /// Potion storage object id.
    pub potion_storage_object_id: i32,
    /// Vault slots.
    pub vault: Vec<i32>,
    /// Gift chest slots.
    pub gift: Vec<i32>,
    /// Potion storage slots.
    pub potions: Vec<i32>,
    /// Cost of the next vault upgrade.
    pub vault_upgrade_cost: i16,
    /// Cost of the next potion storage upgrade.
    pub potion_upgrade_cost: i16,
    /// Current potion storage capacity.
    pub current_potion_max: i16,
    /// Potion storage capacity after upgrade.
    pub next_potion_max: i16,
}

/// One vault aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VaultAggregator {
    chest: Option<ChestContents>,
    characters: BTreeMap<i32, Vec<i32>>,
    updates: u32,
}

impl VaultAggregator {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces this aggregate's contribution from one character.
    pub fn update_character_inventory(&mut self, character: &RealmCharacter) {
        self.characters.insert(character.char_id, character.inventory.clone());
    }

    /// Wipes every character contribution. Chest contents are kept.
    pub fn clear_character_contributions(&mut self) {
        self.characters.clear();
    }

    /// Merges a vault-content push into the chest slots.
    pub fn apply_vault_content_update(&mut self, packet: &VaultContent) {
        self.chest = Some(ChestContents {
            vault_chest_object_id: packet.vault_chest_object_id,
            gift_chest_object_id: packet.gift_chest_object_id,
            potion_storage_object_id: packet.potion_storage_object_id,
            vault: packet.vault_contents.clone(),
            gift: packet.gift_contents.clone(),
            potions: packet.potion_contents.clone(),
            vault_upgrade_cost: packet.vault_upgrade_cost,
            potion_upgrade_cost: packet.potion_upgrade_cost,
            current_potion_max: packet.current_potion_max,
            next_potion_max: packet.next_potion_max,
        });
        self.updates += 1;
    }

    /// Latest chest contents, if any push arrived.
    #[must_use]
    pub fn chest(&self) -> Option<&ChestContents> {
        self.chest.as_ref()
    }

    /// Vault slots of the latest push (empty before any push).
    #[must_use]
    pub fn vault_contents(&self) -> &[i32] {
        self.chest.as_ref().map_or(&[], |c| c.vault.as_slice())
    }

    /// Number of pushes merged.
    #[must_use]
    pub const fn update_count(&self) -> u32 {
        self.updates
    }

    /// Inventory contributed by a character.
    #[must_use]
    pub fn character_inventory(&self, char_id: i32) -> Option<&[i32]> {
        self.characters.get(&char_id).map(Vec::as_slice)
    }

    /// Ids of contributing characters, ascending.
    pub fn character_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.characters.keys().copied()
    }

    /// Item type → count over chest slots and every character contribution.
    #[must_use]
    pub fn item_counts(&self) -> BTreeMap<i32, u32> {
        let chest_slots = self
            .chest
            .iter()
            .flat_map(|c| c.vault.iter().chain(&c.gift).chain(&c.potions));
        let character_slots = self.characters.values().flatten();

        let mut counts = BTreeMap::new();
        for &item in chest_slots.chain(character_slots) {
            if item != EMPTY_SLOT {
                *counts.entry(item).or_insert(0) += 1;
            }
        }
        counts
    }

    /// True if neither chest contents nor characters contribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chest.is_none() && self.characters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomato_protocol::{ObjectStatus, StatData};

    fn character(char_id: i32, seasonal: bool, inventory: Vec<i32>) -> RealmCharacter {
        RealmCharacter { char_id, seasonal, inventory, ..Default::default() }
    }

    fn player_with_flag(flag: Option<i32>) -> Entity {
        let mut player = Entity::new(1, 0);
        let stats = flag.map(|v| vec![StatData::int(24, v)]).unwrap_or_default();
        player.entity_update(782, &ObjectStatus { object_id: 1, x: 0.0, y: 0.0, stats }, 0);
        player
    }

    #[test]
    fn test_route_by_flag() {
        assert_eq!(route_vault_update(Some(&player_with_flag(Some(1))), 24), VaultKind::Seasonal);
        assert_eq!(route_vault_update(Some(&player_with_flag(Some(0))), 24), VaultKind::Regular);
        assert_eq!(route_vault_update(Some(&player_with_flag(Some(2))), 24), VaultKind::Regular);
        assert_eq!(route_vault_update(Some(&player_with_flag(None)), 24), VaultKind::Regular);
        assert_eq!(route_vault_update(None, 24), VaultKind::Regular);
    }

    #[test]
    fn test_route_reads_configured_stat() {
        let player = player_with_flag(Some(1));
        assert_eq!(route_vault_update(Some(&player), 25), VaultKind::Regular);
    }

    #[test]
    fn test_character_routing() {
        assert_eq!(VaultKind::for_character(&character(1, true, vec![])), VaultKind::Seasonal);
        assert_eq!(VaultKind::for_character(&character(1, false, vec![])), VaultKind::Regular);
    }

    #[test]
    fn test_character_contribution_replaced() {
        let mut vault = VaultAggregator::new();
        vault.update_character_inventory(&character(1, false, vec![10, 11]));
        vault.update_character_inventory(&character(1, false, vec![12]));
        assert_eq!(vault.character_inventory(1), Some(&[12][..]));

        vault.clear_character_contributions();
        assert_eq!(vault.character_inventory(1), None);
        assert!(vault.is_empty());
    }

    #[test]
    fn test_item_counts_merge_sources() {
        let mut vault = VaultAggregator::new();
        vault.update_character_inventory(&character(1, false, vec![100, -1, 200]));
        vault.update_character_inventory(&character(2, false, vec![100]));
        vault.apply_vault_content_update(&VaultContent {
            vault_contents: vec![100, -1, -1],
            gift_contents: vec![300],
            potion_contents: vec![200],
            ..Default::default()
        });

        let counts = vault.item_counts();
        assert_eq!(counts.get(&100), Some(&3));
        assert_eq!(counts.get(&200), Some(&2));
        assert_eq!(counts.get(&300), Some(&1));
        assert_eq!(counts.get(&-1), None);
        assert_eq!(vault.update_count(), 1);
    }

    #[test]
    fn test_push_replaces_chest_and_keeps_characters() {
        let mut vault = VaultAggregator::new();
        vault.update_character_inventory(&character(7, false, vec![1]));
        vault.apply_vault_content_update(&VaultContent { vault_contents: vec![5, 6], ..Default::default() });
        vault.apply_vault_content_update(&VaultContent { vault_contents: vec![9], ..Default::default() });

        assert_eq!(vault.vault_contents(), &[9]);
        assert_eq!(vault.character_ids().collect::<Vec<_>>(), vec![7]);
    }
}
