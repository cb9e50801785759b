use std::fmt;

use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

use crate::Coded;

/// Kind of a zone hotspot (a point of interest independent of the tile grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u16)]
pub enum HotspotKind {
    TriggerLocation = 0,
    SpawnLocation = 1,
    ForceLocation = 2,
    VehicleToSecondaryMap = 3,
    VehicleToPrimaryMap = 4,
    LocatorSpot = 5,
    ItemSpot = 6,
    PuzzleNpc = 7,
    WeaponSpot = 8,
    ZoneEntrance = 9,
    ZoneExit = 10,
    Unused = 11,
    Lock = 12,
    Teleporter = 13,
    XWingFromDagobah = 14,
    XWingToDagobah = 15,
    Unknown = 16,
}

impl HotspotKind {
    pub fn from_code(code: u16) -> Coded<Self> {
        Coded::from_code(code, Self::from_repr)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TriggerLocation => "TriggerSpot",
            Self::SpawnLocation => "NpcSpawnSpot",
            Self::ForceLocation => "ForceSpot",
            Self::VehicleToSecondaryMap | Self::VehicleToPrimaryMap => "VehicleSpot",
            Self::LocatorSpot => "GetLocator",
            Self::ItemSpot => "ItemSpot",
            Self::PuzzleNpc => "QuestNPC",
            Self::WeaponSpot => "WeaponSpot",
            Self::ZoneEntrance => "EnterZone",
            Self::ZoneExit => "ExitZone",
            Self::Unused => "UNUSED",
            Self::Lock => "LockSpot",
            Self::Teleporter => "TPortSpot",
            Self::XWingFromDagobah | Self::XWingToDagobah => "XwingSpot",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hotspot {
    /// Ordinal within the zone.
    pub id: u16,
    pub kind: Coded<HotspotKind>,
    pub x: u16,
    pub y: u16,
    pub arg: u16,
}

impl fmt::Display for Hotspot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Coded::Known(kind) => write!(f, "{}", kind.label())?,
            Coded::Unrecognized(code) => write!(f, "Hotspot{code:#x}")?,
        }
        write!(f, "({},{}),{}", self.x, self.y, self.arg)
    }
}
