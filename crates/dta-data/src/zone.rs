//! Decoder for one `IZON` zone record.
//!
//! After the fixed header and the tile grid, a zone is a walk through
//! tagged sub-sections (`IZAX`, `IZX2`, `IZX3`, `IZX4`, then any number of
//! `IACT`). Each sub-section's length is read from the stream and decides
//! where the next one starts.

use dta_types::{
    ACTOR_TRAILER_LEN, Biome, Hotspot, HotspotKind, ZoneActor, ZoneKind, ZoneRecord, ZoneTrailer,
};

use crate::error::DecodeError;
use crate::reader::Reader;
use crate::script::decode_trigger;

pub const ZONE_MAGIC: [u8; 4] = *b"IZON";

const HOTSPOT_RECORD_LEN: usize = 12;
const ACTOR_RECORD_LEN: usize = 44;
/// Tag, `u16` length and two unused bytes in front of every sub-section.
const SUB_HEADER_LEN: usize = 8;
/// Bytes per grid cell: terrain, wall and overlay ids.
const CELL_LEN: usize = 6;

fn tag_str(tag: &[u8; 4]) -> String {
    tag.iter().map(|&b| char::from(b)).collect()
}

/// Read a sub-section header and return a reader over its payload.
///
/// The stored length counts the whole sub-section, header included. The two
/// bytes after it are not part of the length.
fn sub_section<'a>(r: &mut Reader<'a>, expected: &[u8; 4]) -> Result<Reader<'a>, DecodeError> {
    let offset = r.position();
    let tag = r.read_tag()?;
    if &tag != expected {
        log::warn!(
            "expected {} at offset {offset}, found {:?}",
            tag_str(expected),
            tag_str(&tag)
        );
    }
    let length = usize::from(r.read_u16()?);
    r.skip(2)?;
    let payload = length
        .checked_sub(SUB_HEADER_LEN)
        .ok_or(DecodeError::MalformedLength {
            what: "zone sub-section",
            length,
            offset,
        })?;
    r.sub_reader(payload)
}

fn read_hotspots(r: &mut Reader<'_>) -> Result<Vec<Hotspot>, DecodeError> {
    let count = usize::from(r.read_u16()?);
    let mut table = r.sub_reader(count * HOTSPOT_RECORD_LEN)?;
    let mut hotspots = Vec::with_capacity(count);
    for id in 0..count as u16 {
        let code = table.read_u16()?;
        table.skip(2)?;
        let x = table.read_u16()?;
        let y = table.read_u16()?;
        table.skip(2)?;
        let arg = table.read_u16()?;
        let kind = HotspotKind::from_code(code);
        if !kind.is_known() {
            log::warn!("zone hotspot {id} has unrecognised kind {code}");
        }
        hotspots.push(Hotspot {
            id,
            kind,
            x,
            y,
            arg,
        });
    }
    Ok(hotspots)
}

fn read_actors(r: &mut Reader<'_>) -> Result<Vec<ZoneActor>, DecodeError> {
    let mut body = sub_section(r, b"IZAX")?;
    body.skip(2)?;
    let count = usize::from(body.read_u16()?);
    let mut table = body.sub_reader(count * ACTOR_RECORD_LEN)?;
    let mut actors = Vec::with_capacity(count);
    for index in 0..count as u16 {
        let creature_id = table.read_u16()?;
        let x = table.read_u16()?;
        let y = table.read_u16()?;
        let args = table.read_array::<6>()?;
        let trailer = table.read_array::<ACTOR_TRAILER_LEN>()?;
        actors.push(ZoneActor {
            index,
            creature_id,
            x,
            y,
            args,
            unknown: ZoneActor::meaningful_trailer(trailer),
        });
    }
    Ok(actors)
}

/// `IZX2` and `IZX3` share a layout: a count and that many `u16` ids.
fn read_id_table(r: &mut Reader<'_>, tag: &[u8; 4]) -> Result<Vec<u16>, DecodeError> {
    let mut body = sub_section(r, tag)?;
    let count = usize::from(body.read_u16()?);
    let mut table = body.sub_reader(count * 2)?;
    (0..count).map(|_| table.read_u16()).collect()
}

fn read_trailer(r: &mut Reader<'_>) -> Result<ZoneTrailer, DecodeError> {
    let tag = r.read_tag()?;
    if &tag != b"IZX4" {
        log::warn!("expected IZX4 at offset {}, found {:?}", r.position() - 4, tag_str(&tag));
    }
    r.skip(4)?;
    let code = r.read_u8()?;
    r.skip(1)?;
    let flags = r.read_u8()?;
    r.skip(1)?;
    Ok(ZoneTrailer::new(code, flags))
}

/// Decode one zone from its own byte range.
pub fn decode_zone(r: &mut Reader<'_>) -> Result<ZoneRecord, DecodeError> {
    let id = r.read_u16()?;
    let magic_offset = r.position();
    let magic = r.read_tag()?;
    if magic != ZONE_MAGIC {
        return Err(DecodeError::BadMagic {
            expected: tag_str(&ZONE_MAGIC),
            found: tag_str(&magic),
            offset: magic_offset,
        });
    }
    r.skip(4)?;
    let width = r.read_u16()?;
    let height = r.read_u16()?;
    let kind_code = r.read_u8()?;
    r.skip(5)?;
    let biome_code = r.read_u8()?;
    r.skip(1)?;

    let kind = ZoneKind::from_code(kind_code);
    let biome = Biome::from_code(biome_code);
    log::trace!("zone {id}: {width}x{height} {kind:?} {biome:?}");

    let cells = usize::from(width) * usize::from(height);
    let mut grid = r.sub_reader(cells * CELL_LEN)?;
    let mut terrain = Vec::with_capacity(cells);
    let mut walls = Vec::with_capacity(cells);
    let mut overlay = Vec::with_capacity(cells);
    for _ in 0..cells {
        terrain.push(grid.read_u16()?);
        walls.push(grid.read_u16()?);
        overlay.push(grid.read_u16()?);
    }

    let hotspots = read_hotspots(r)?;
    let zone_actors = read_actors(r)?;
    let reward_items = read_id_table(r, b"IZX2")?;
    let quest_npcs = read_id_table(r, b"IZX3")?;
    let trailer = read_trailer(r)?;

    let mut action_triggers = Vec::new();
    while r.remaining() >= 4 {
        let mut blob = sub_payload(r)?;
        action_triggers.push(decode_trigger(&mut blob)?);
        if !blob.is_empty() {
            log::warn!(
                "zone {id}: {} unread bytes after trigger {}",
                blob.remaining(),
                action_triggers.len() - 1
            );
        }
    }
    if !r.is_empty() {
        log::debug!("zone {id}: ignoring {} trailing bytes", r.remaining());
        r.skip_rest();
    }

    Ok(ZoneRecord {
        id,
        width,
        height,
        kind,
        kind_code,
        is_overworld: kind.is_overworld(),
        biome,
        biome_code,
        terrain,
        walls,
        overlay,
        hotspots,
        zone_actors,
        reward_items,
        quest_npcs,
        trailer,
        action_triggers,
    })
}

/// `IACT` header: tag and a `u32` payload length that excludes the header.
fn sub_payload<'a>(r: &mut Reader<'a>) -> Result<Reader<'a>, DecodeError> {
    r.skip(4)?;
    let length = r.read_u32()? as usize;
    r.sub_reader(length)
}
