//! Per-block-type item counts.

use voxterm_core::constants::MAX_BLOCK_TYPES;
use voxterm_core::BlockId;

/// Item counts indexed by block id.
///
/// The capacity is fixed at construction. Ids beyond it are rejected rather
/// than stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    counts: Vec<u32>,
}

impl Default for Inventory {
    /// The starting kit: dirt, stone and grass by the stack, some wood and
    /// brick.
    fn default() -> Self {
        let mut inventory = Self::empty(MAX_BLOCK_TYPES);
        inventory.give(BlockId::DIRT, 64);
        inventory.give(BlockId::STONE, 64);
        inventory.give(BlockId::GRASS, 64);
        inventory.give(BlockId::WOOD, 16);
        inventory.give(BlockId::BRICK, 16);
        inventory
    }
}

impl Inventory {
    /// Create an inventory with room for `capacity` block types.
    pub fn empty(capacity: usize) -> Self {
        Self {
            counts: vec![0; capacity],
        }
    }

    /// Number of block types this inventory can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.counts.len()
    }

    /// Count held for `id`; zero for ids beyond capacity.
    #[inline]
    pub fn count(&self, id: BlockId) -> u32 {
        self.counts.get(id.index()).copied().unwrap_or(0)
    }

    /// Add `amount` of `id`. Returns false if `id` is beyond capacity.
    pub fn give(&mut self, id: BlockId, amount: u32) -> bool {
        match self.counts.get_mut(id.index()) {
            Some(count) => {
                *count = count.saturating_add(amount);
                true
            }
            None => false,
        }
    }

    /// Remove one `id`. Returns false if none are held.
    pub fn take(&mut self, id: BlockId) -> bool {
        match self.counts.get_mut(id.index()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// All `(id, count)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (BlockId(i as u8), count))
    }
}
