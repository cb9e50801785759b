//! `TILE` section: a flag word and a 32x32 palette-indexed bitmap per tile.

use dta_types::{TILE_HEIGHT, TILE_PIXELS, TILE_WIDTH, TileCategory, TileClass, TileFlags};
use image::RgbaImage;
use serde::Serialize;

use crate::error::DecodeError;
use crate::palette::Palette;
use crate::reader::Reader;

/// On-disk size of one tile: flag word plus bitmap.
pub const TILE_RECORD_LEN: usize = 4 + TILE_PIXELS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileRecord {
    pub id: u16,
    pub flags: TileFlags,
    pub category: TileCategory,
    pub is_walkable: bool,
    #[serde(skip)]
    pub pixels: RgbaImage,
}

/// Expand palette indices into an RGBA bitmap.
pub fn render_bitmap(indices: &[u8], palette: &Palette) -> RgbaImage {
    RgbaImage::from_fn(TILE_WIDTH, TILE_HEIGHT, |x, y| {
        let i = (y * TILE_WIDTH + x) as usize;
        palette.rgba(indices.get(i).copied().unwrap_or(0))
    })
}

pub fn decode_tile(id: u16, r: &mut Reader<'_>, palette: &Palette) -> Result<TileRecord, DecodeError> {
    let flags = TileFlags::from_bits_retain(r.read_u32()?);
    let indices = r.read_bytes(TILE_PIXELS)?;
    let TileClass {
        category,
        is_walkable,
    } = TileClass::classify(id, flags);
    Ok(TileRecord {
        id,
        flags,
        category,
        is_walkable,
        pixels: render_bitmap(indices, palette),
    })
}

/// Decode a whole `TILE` section body. Trailing bytes that do not make up a
/// full tile are ignored.
pub fn decode_tiles(r: &mut Reader<'_>, palette: &Palette) -> Result<Vec<TileRecord>, DecodeError> {
    let count = r.remaining() / TILE_RECORD_LEN;
    if count > usize::from(u16::MAX) {
        return Err(DecodeError::MalformedRecordCount {
            what: "tile",
            count,
            offset: r.position(),
        });
    }
    let leftover = r.remaining() % TILE_RECORD_LEN;
    if leftover != 0 {
        log::warn!("TILE section has {leftover} trailing bytes after {count} tiles");
    }

    let mut tiles = Vec::with_capacity(count);
    for id in 0..count as u16 {
        tiles.push(decode_tile(id, r, palette)?);
    }
    r.skip_rest();
    Ok(tiles)
}
