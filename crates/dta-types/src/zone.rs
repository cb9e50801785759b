use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

use crate::{ActionTrigger, Hotspot, ZoneActor};

/// Layer value meaning "no tile here".
pub const NO_TILE: u16 = 0xFFFF;

/// Zone ids the game treats specially.
pub mod well_known {
    pub const OPENING_SPLASH: u16 = 0;
    pub const WIN_SPLASH: u16 = 76;
    pub const LOSE_SPLASH: u16 = 77;
    pub const DAGOBAH_BOTTOM_LEFT: u16 = 93;
    pub const DAGOBAH_TOP_LEFT: u16 = 94;
    pub const DAGOBAH_TOP_RIGHT: u16 = 95;
    pub const DAGOBAH_BOTTOM_RIGHT: u16 = 96;
}

/// Zone purpose, from the kind byte in the `IZON` header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter, EnumCount, FromRepr,
)]
#[repr(u8)]
pub enum ZoneKind {
    #[default]
    Unspecified = 0,
    Plain = 1,
    GateToNorth = 2,
    GateToSouth = 3,
    GateToEast = 4,
    GateToWest = 5,
    PortalEnter = 6,
    PortalExit = 7,
    Interior = 8,
    OpeningSplash = 9,
    FinalDestination = 10,
    HomeBase = 11,
    WinSplash = 13,
    LoseSplash = 14,
    ItemForTool = 15,
    ItemForItem = 16,
    ItemForTask = 17,
    FindTheForce = 18,
}

impl ZoneKind {
    /// Total mapping: codes without a named kind stay [`ZoneKind::Unspecified`].
    pub fn from_code(code: u8) -> Self {
        Self::from_repr(code).unwrap_or_default()
    }

    pub const fn is_overworld(self) -> bool {
        !matches!(
            self,
            Self::Unspecified
                | Self::Interior
                | Self::OpeningSplash
                | Self::WinSplash
                | Self::LoseSplash
        )
    }

    pub const fn is_splash(self) -> bool {
        matches!(self, Self::OpeningSplash | Self::WinSplash | Self::LoseSplash)
    }
}

/// Planet/biome a zone belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter, EnumCount, FromRepr,
)]
#[repr(u8)]
pub enum Biome {
    Desert = 1,
    Snow = 2,
    Forest = 3,
    Swamp = 5,
    #[default]
    Unknown = 0xFF,
}

impl Biome {
    pub fn from_code(code: u8) -> Self {
        match Self::from_repr(code) {
            Some(Self::Unknown) | None => Self::Unknown,
            Some(biome) => biome,
        }
    }
}

/// Fixed trailer after the quest-NPC table. Semantics unknown; kept raw.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ZoneTrailer {
    pub code: u8,
    pub flags: u8,
    /// `flags` rendered bit 0 first, `Y` for set and `.` for clear.
    pub mask: String,
}

impl ZoneTrailer {
    pub fn new(code: u8, flags: u8) -> Self {
        let mask = (0..8)
            .map(|bit| if flags & (1 << bit) != 0 { 'Y' } else { '.' })
            .collect();
        Self { code, flags, mask }
    }
}

/// One decoded map screen.
///
/// The three layers are row-major and always `width * height` long.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ZoneRecord {
    pub id: u16,
    pub width: u16,
    pub height: u16,
    pub kind: ZoneKind,
    /// Raw kind byte, kept because some codes have no name.
    pub kind_code: u8,
    pub is_overworld: bool,
    pub biome: Biome,
    pub biome_code: u8,
    pub terrain: Vec<u16>,
    pub walls: Vec<u16>,
    pub overlay: Vec<u16>,
    pub hotspots: Vec<Hotspot>,
    pub zone_actors: Vec<ZoneActor>,
    pub reward_items: Vec<u16>,
    pub quest_npcs: Vec<u16>,
    pub trailer: ZoneTrailer,
    pub action_triggers: Vec<ActionTrigger>,
}

impl ZoneRecord {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `(x, y)`, or `None` when outside the zone.
    pub fn cell_index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// `(terrain, wall, overlay)` at `(x, y)`, with [`NO_TILE`] and missing
    /// layer entries mapped to `None`.
    pub fn layers_at(&self, x: u16, y: u16) -> Option<[Option<u16>; 3]> {
        let idx = self.cell_index(x, y)?;
        let present = |layer: &[u16]| layer.get(idx).copied().filter(|&id| id != NO_TILE);
        Some([
            present(self.terrain.as_slice()),
            present(self.walls.as_slice()),
            present(self.overlay.as_slice()),
        ])
    }

    /// Whether `(x, y)` can be walked on, judged from the wall layer.
    ///
    /// `tile_walkable` answers for a tile id, or `None` for ids outside the
    /// tile table; empty cells and unknown ids do not block. Positions
    /// outside the zone do.
    pub fn is_walkable(&self, x: u16, y: u16, tile_walkable: impl Fn(u16) -> Option<bool>) -> bool {
        match self.layers_at(x, y) {
            Some([_, Some(wall), _]) => tile_walkable(wall).unwrap_or(true),
            Some(_) => true,
            None => false,
        }
    }
}
