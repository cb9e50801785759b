use std::ops::RangeInclusive;

use bitflags::bitflags;
use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

pub const TILE_WIDTH: u32 = 32;
pub const TILE_HEIGHT: u32 = 32;
/// Bytes of palette indices per tile (one byte per pixel).
pub const TILE_PIXELS: usize = (TILE_WIDTH * TILE_HEIGHT) as usize;

/// Minimap locator tiles. They carry ordinary flags in the data but are
/// always classified as [`TileCategory::Locator`].
pub const LOCATOR_TILE_IDS: RangeInclusive<u16> = 817..=837;

/// Only the low nine bits take part in classification.
const CLASS_MASK: u32 = 0x1FF;

bitflags! {
    /// Per-tile attribute word from the `TILE` section.
    ///
    /// Only the low nine bits are named; the remaining bits are retained
    /// verbatim and surfaced through [`TileFlags::bits`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct TileFlags: u32 {
        const TRANSPARENT = 1 << 0;
        const FLOOR       = 1 << 1;
        const OBJECT      = 1 << 2;
        const DRAGGABLE   = 1 << 3;
        const ROOF        = 1 << 4;
        const LOCATOR     = 1 << 5;
        const WEAPON      = 1 << 6;
        const ITEM        = 1 << 7;
        const CHARACTER   = 1 << 8;
    }
}

impl TileFlags {
    /// Binary representation with bit 0 first, the ordering the format's
    /// classification table is written in.
    pub fn bit_string(self) -> String {
        (0..32)
            .map(|bit| if self.bits() & (1 << bit) != 0 { '1' } else { '0' })
            .collect()
    }
}

/// Coarse tile kind used for collision and layer decisions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter, EnumCount, FromRepr,
)]
#[repr(u8)]
pub enum TileCategory {
    Terrain = 0,
    Wall = 1,
    Block = 2,
    Overlay = 3,
    Creature = 4,
    Item = 5,
    Weapon = 6,
    Locator = 7,
    #[default]
    Unclassified = 8,
}

/// Result of classifying a tile: its category plus walkability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileClass {
    pub category: TileCategory,
    pub is_walkable: bool,
}

impl TileClass {
    const fn new(category: TileCategory, is_walkable: bool) -> Self {
        Self {
            category,
            is_walkable,
        }
    }

    /// Classify a tile from its id and flag word.
    ///
    /// Total and deterministic. Unmatched patterns are walkable and
    /// unclassified; locator ids override whatever the flags say.
    pub fn classify(id: u16, flags: TileFlags) -> Self {
        use TileCategory::*;

        let mut class = match flags.bits() & CLASS_MASK {
            0b0_0000_0010 => Self::new(Terrain, true),
            0b0_0000_0101 => Self::new(Wall, false),
            0b0_0000_0100 => Self::new(Terrain, false),
            0b0_0000_1101 => Self::new(Block, false),
            0b0_0001_0001 | 0b0_0001_0000 => Self::new(Overlay, true),
            0b1_0000_0001 => Self::new(Creature, false),
            0b0_1000_0001 => Self::new(Item, false),
            0b0_0100_0001 => Self::new(Weapon, false),
            _ => Self::new(Unclassified, true),
        };
        if LOCATOR_TILE_IDS.contains(&id) {
            class.category = Locator;
        }
        class
    }
}
