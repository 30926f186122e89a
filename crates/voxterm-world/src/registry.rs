//! Block-type registry.

use voxterm_core::constants::MAX_BLOCK_TYPES;
use voxterm_core::{BlockId, BlockType, Error, Result, TermColor};

/// The built-in palette, indexed by block id.
const DEFAULT_BLOCKS: [BlockType; 9] = [
    BlockType::AIR,
    BlockType::new('.', TermColor::YELLOW, true, 0.6, "Dirt"),
    BlockType::new('"', TermColor::GREEN, true, 0.5, "Grass"),
    BlockType::new('#', TermColor::WHITE, true, 0.8, "Stone"),
    BlockType::new('|', TermColor::YELLOW.bright(), true, 0.7, "Wood"),
    BlockType::new('*', TermColor::GREEN.bright(), true, 0.5, "Leaves"),
    BlockType::new('~', TermColor::BLUE, false, 0.3, "Water"),
    BlockType::new(',', TermColor::YELLOW.bright(), true, 0.4, "Sand"),
    BlockType::new('=', TermColor::RED, true, 0.9, "Brick"),
];

/// Ordered, fixed-capacity table of block types.
///
/// Id 0 is always air. The registry is immutable once built; lookups of ids
/// past the end resolve to the air record.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockRegistry {
    types: Vec<BlockType>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        let mut types = DEFAULT_BLOCKS.to_vec();
        types.resize(MAX_BLOCK_TYPES, BlockType::AIR);
        Self { types }
    }
}

impl BlockRegistry {
    /// Build a registry from custom records.
    ///
    /// The first record must be a non-solid air record and the table must fit
    /// in [`MAX_BLOCK_TYPES`].
    pub fn new(types: Vec<BlockType>) -> Result<Self> {
        let Some(first) = types.first() else {
            return Err(Error::InvalidData("registry needs an air record".into()));
        };
        if first.solid {
            return Err(Error::InvalidData("block id 0 must be non-solid air".into()));
        }
        if types.len() > MAX_BLOCK_TYPES {
            return Err(Error::OutOfBounds(format!(
                "{} block types exceed capacity {MAX_BLOCK_TYPES}",
                types.len()
            )));
        }
        Ok(Self { types })
    }

    /// Number of registered types (valid ids are `0..len`).
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: air is always registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns true if `id` indexes a registered type.
    #[inline]
    pub fn contains(&self, id: BlockId) -> bool {
        id.index() < self.types.len()
    }

    /// Record for `id`, falling back to air for unknown ids.
    #[inline]
    pub fn get(&self, id: BlockId) -> &BlockType {
        self.types.get(id.index()).unwrap_or(&self.types[0])
    }

    /// Whether `id` is a registered solid block.
    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.types.get(id.index()).is_some_and(|t| t.solid)
    }

    /// Iterate `(id, record)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (BlockId(i as u8), t))
    }
}
