pub mod actor;
pub mod coded;
pub mod creature;
pub mod hotspot;
pub mod item;
pub mod puzzle;
pub mod script;
pub mod tile;
pub mod version;
pub mod zone;

pub use actor::{ACTOR_EMPTY_CHECKSUM, ACTOR_TRAILER_LEN, ZoneActor};
pub use coded::Coded;
pub use creature::{CreatureRecord, Direction};
pub use hotspot::{Hotspot, HotspotKind};
pub use item::ItemRecord;
pub use puzzle::{PuzzleItemKind, PuzzleKind, PuzzleRecord, PuzzleReward, RewardFlags};
pub use script::{ActionKind, ActionTrigger, ConditionKind, TriggerAction, TriggerCondition};
pub use tile::{
    LOCATOR_TILE_IDS, TILE_HEIGHT, TILE_PIXELS, TILE_WIDTH, TileCategory, TileClass, TileFlags,
};
pub use version::FormatVersion;
pub use zone::{Biome, NO_TILE, ZoneKind, ZoneRecord, ZoneTrailer, well_known};

/// Reserved "absent" value wherever a `u16` tile, item or record id is expected.
pub const SENTINEL_ID: u16 = 0xFFFF;
