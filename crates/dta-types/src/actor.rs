use serde::Serialize;

/// Length of the trailing block on each actor spawn record.
pub const ACTOR_TRAILER_LEN: usize = 32;
/// Byte-sum of a trailer that is all `0xFF`, i.e. carries no data.
pub const ACTOR_EMPTY_CHECKSUM: u32 = 0xFF * ACTOR_TRAILER_LEN as u32;

/// A creature spawned into a zone when it loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneActor {
    pub index: u16,
    pub creature_id: u16,
    pub x: u16,
    pub y: u16,
    pub args: [u8; 6],
    /// Present only when the trailing block is not the all-`0xFF` filler.
    pub unknown: Option<[u8; ACTOR_TRAILER_LEN]>,
}

impl ZoneActor {
    /// Keep `trailer` unless its byte-sum marks it as empty filler.
    pub fn meaningful_trailer(trailer: [u8; ACTOR_TRAILER_LEN]) -> Option<[u8; ACTOR_TRAILER_LEN]> {
        let checksum: u32 = trailer.iter().map(|&b| u32::from(b)).sum();
        (checksum != ACTOR_EMPTY_CHECKSUM).then_some(trailer)
    }
}
