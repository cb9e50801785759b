use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

use crate::Coded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum PuzzleKind {
    ItemForItem = 0,
    ItemForTask = 1,
    ItemForTask2 = 2,
    MainQuest = 3,
}

impl PuzzleKind {
    pub fn from_code(code: u8) -> Coded<Self> {
        Coded::from_code(u16::from(code), |c| u8::try_from(c).ok().and_then(Self::from_repr))
    }
}

/// What kind of item a puzzle asks for. Unlike most codes in the format an
/// unknown value here is treated as corruption by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum PuzzleItemKind {
    Keycard = 0,
    Tool = 1,
    Part = 2,
    PlotItem = 4,
}

/// Raw 16-bit flag set carried in a puzzle's reward slot when it is not a tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RewardFlags(pub u16);

impl RewardFlags {
    /// Bit 0 first.
    pub fn bit_string(self) -> String {
        (0..16)
            .map(|bit| if self.0 & (1 << bit) != 0 { '1' } else { '0' })
            .collect()
    }
}

/// The reward slot is a tile id when it falls inside the tile table, and a
/// flag set otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PuzzleReward {
    Tile(u16),
    Flags(RewardFlags),
}

impl PuzzleReward {
    pub fn classify(value: u16, tile_count: usize) -> Self {
        if value > 0 && usize::from(value) < tile_count {
            Self::Tile(value)
        } else {
            Self::Flags(RewardFlags(value))
        }
    }

    pub fn raw(self) -> u16 {
        match self {
            Self::Tile(id) => id,
            Self::Flags(flags) => flags.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleRecord {
    pub id: u16,
    pub kind: Coded<PuzzleKind>,
    pub item_kind: PuzzleItemKind,
    pub need_text: Option<String>,
    pub done_text: Option<String>,
    pub have_text: Option<String>,
    pub lock_item_id: u16,
    pub reward: PuzzleReward,
}

impl PuzzleRecord {
    pub fn reward_tile_id(&self) -> Option<u16> {
        match self.reward {
            PuzzleReward::Tile(id) => Some(id),
            PuzzleReward::Flags(_) => None,
        }
    }

    pub fn reward_flags(&self) -> Option<RewardFlags> {
        match self.reward {
            PuzzleReward::Flags(flags) => Some(flags),
            PuzzleReward::Tile(_) => None,
        }
    }
}
