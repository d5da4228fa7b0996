//! # Inventory Module
//!
//! The player's block inventory: nine hotbar slots plus a 9×3 backpack. The
//! inventory is a plain value owned by the player/session context and passed
//! by reference to whichever subsystem needs it, so GUI, commands, and block
//! placement all see the same state without a process-wide global.

use serde::{Deserialize, Serialize};

use crate::voxels::block::block_type::BlockType;
use crate::voxels::block::BlockTypeSize;

/// Number of hotbar slots (the bottom row).
pub const HOTBAR_SIZE: usize = 9;
/// Total slot count: hotbar plus the 9×3 backpack grid.
pub const INVENTORY_SIZE: usize = 36;

/// A stack of identical blocks occupying one slot.
///
/// Stored by raw id so the save format stays a plain `{id, count}` record;
/// unknown ids decode as air and are treated as unplaceable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// The block type id.
    pub id: BlockTypeSize,
    /// How many blocks the stack holds.
    pub count: u32,
}

impl ItemStack {
    /// Creates a stack of one block type.
    pub fn new(block: BlockType, count: u32) -> Self {
        ItemStack {
            id: block.id(),
            count,
        }
    }

    /// The block type this stack holds; air for unknown ids.
    pub fn block(&self) -> BlockType {
        BlockType::from_id(self.id)
    }
}

/// The player's slots plus the selected hotbar index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// All slots; indices `0..HOTBAR_SIZE` form the hotbar.
    slots: Vec<Option<ItemStack>>,
    /// The selected hotbar slot.
    selected: usize,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory {
            slots: vec![None; INVENTORY_SIZE],
            selected: 0,
        }
    }

    /// Creates the default loadout: one of each placeable block in the
    /// hotbar, backpack empty.
    pub fn with_default_blocks() -> Self {
        let mut inventory = Inventory::new();
        for (slot, block) in BlockType::placeable().into_iter().enumerate() {
            inventory.slots[slot] = Some(ItemStack::new(block, 1));
        }
        inventory
    }

    /// The stack in a slot, if any; out-of-range indices read as empty.
    pub fn get(&self, slot: usize) -> Option<ItemStack> {
        self.slots.get(slot).copied().flatten()
    }

    /// Puts a stack (or empties a slot); out-of-range indices are ignored.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        if let Some(cell) = self.slots.get_mut(slot) {
            *cell = stack;
        }
    }

    /// The currently selected hotbar slot index.
    #[inline]
    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    /// Selects a hotbar slot; indices outside the hotbar are rejected.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot < HOTBAR_SIZE {
            self.selected = slot;
            true
        } else {
            false
        }
    }

    /// Moves the selection one hotbar slot right, wrapping around.
    pub fn next_slot(&mut self) {
        self.selected = (self.selected + 1) % HOTBAR_SIZE;
    }

    /// Moves the selection one hotbar slot left, wrapping around.
    pub fn previous_slot(&mut self) {
        self.selected = (self.selected + HOTBAR_SIZE - 1) % HOTBAR_SIZE;
    }

    /// The block type the player would place right now, if the selected slot
    /// holds a placeable stack.
    pub fn selected_block(&self) -> Option<BlockType> {
        let stack = self.get(self.selected)?;
        let block = stack.block();
        if block.is_air() {
            None
        } else {
            Some(block)
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_default_blocks()
    }
}
