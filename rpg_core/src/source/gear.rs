//! GearSource - Stats from equipped items

use crate::item::Item;
use crate::source::StatSource;
use crate::stat_block::{HandState, StatAccumulator};
use crate::types::{SlotKey, StatName};

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: SlotKey,
    /// The equipped item
    pub item: &'a Item,
}

impl<'a> GearSource<'a> {
    pub fn new(slot: SlotKey, item: &'a Item) -> Self {
        GearSource { slot, item }
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        self.slot.key()
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for (stat, value) in self.item.stats.iter() {
            stats.add(stat, value);
        }

        if matches!(self.slot, SlotKey::Primary | SlotKey::Secondary) {
            stats.set_hand(
                self.slot,
                HandState {
                    weapon_type: self.item.weapon_type(),
                    speed: self.item.stats.try_get(StatName::AttackSpeed),
                },
            );
        }
    }
}
