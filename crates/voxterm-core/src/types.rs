//! Core block and colour types.

use bytemuck::{Pod, Zeroable};

/// Unique identifier for a block type.
///
/// Block ID 0 is reserved for air (empty space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct BlockId(pub u8);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0);
    /// Dirt block
    pub const DIRT: Self = Self(1);
    /// Grass block
    pub const GRASS: Self = Self(2);
    /// Stone block
    pub const STONE: Self = Self(3);
    /// Wood block (tree trunks, floors)
    pub const WOOD: Self = Self(4);
    /// Tree leaves block
    pub const LEAVES: Self = Self(5);
    /// Water block (non-solid, lets light through)
    pub const WATER: Self = Self(6);
    /// Sand block
    pub const SAND: Self = Self(7);
    /// Brick block
    pub const BRICK: Self = Self(8);

    /// Returns true if this block is air (empty)
    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    /// Index of this id into a block table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for BlockId {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

/// A terminal colour: one of the eight base colours plus a bright modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TermColor(u8);

impl TermColor {
    pub const BLACK: Self = Self(0);
    pub const RED: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const YELLOW: Self = Self(3);
    pub const BLUE: Self = Self(4);
    pub const MAGENTA: Self = Self(5);
    pub const CYAN: Self = Self(6);
    pub const WHITE: Self = Self(7);

    const BRIGHT_BIT: u8 = 0b1000;
    const BASE_MASK: u8 = 0b0111;

    /// Same colour with the bright modifier set.
    #[inline]
    #[must_use]
    pub const fn bright(self) -> Self {
        Self(self.0 | Self::BRIGHT_BIT)
    }

    /// Same colour with the bright modifier cleared.
    #[inline]
    #[must_use]
    pub const fn dim(self) -> Self {
        Self(self.0 & Self::BASE_MASK)
    }

    /// Returns true if the bright modifier is set.
    #[inline]
    pub const fn is_bright(self) -> bool {
        self.0 & Self::BRIGHT_BIT != 0
    }

    /// Base colour index in `0..8` (ANSI order).
    #[inline]
    pub const fn base(self) -> u8 {
        self.0 & Self::BASE_MASK
    }
}

/// Static metadata of one block type.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockType {
    /// Character drawn for this block.
    pub glyph: char,
    /// Foreground colour.
    pub fg: TermColor,
    /// Background colour.
    pub bg: TermColor,
    /// Whether the player collides with this block.
    pub solid: bool,
    /// How much light the block absorbs. Informational only.
    pub light_absorption: f32,
    /// Display name.
    pub name: &'static str,
}

impl BlockType {
    /// The air record: blank, non-solid.
    pub const AIR: Self = Self::new(' ', TermColor::BLACK, false, 0.0, "Air");

    /// Create a block type with a black background.
    pub const fn new(
        glyph: char,
        fg: TermColor,
        solid: bool,
        light_absorption: f32,
        name: &'static str,
    ) -> Self {
        Self {
            glyph,
            fg,
            bg: TermColor::BLACK,
            solid,
            light_absorption,
            name,
        }
    }
}

impl Default for BlockType {
    fn default() -> Self {
        Self::AIR
    }
}
