//! Top-level section dispatch and the decoded aggregate.

use std::io::Read;

use dta_types::{CreatureRecord, FormatVersion, ItemRecord, PuzzleRecord, ZoneRecord};
use image::RgbaImage;
use serde::Serialize;

use crate::catalog::{decode_creatures, decode_items, decode_puzzles};
use crate::error::DecodeError;
use crate::palette::Palette;
use crate::reader::Reader;
use crate::section::SectionTag;
use crate::sounds::decode_sounds;
use crate::tile::{TileRecord, decode_tiles};
use crate::tileset::render_tileset;
use crate::zone::decode_zone;

#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub palette: Palette,
}

/// Everything decoded from one container. Built once, never mutated by the
/// decoder afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResourceContainer {
    pub version: Option<FormatVersion>,
    pub tiles: Vec<TileRecord>,
    pub zones: Vec<ZoneRecord>,
    pub items: Vec<ItemRecord>,
    pub creatures: Vec<CreatureRecord>,
    pub puzzles: Vec<PuzzleRecord>,
    pub sounds: Vec<String>,
}

impl ResourceContainer {
    pub fn tile(&self, id: u16) -> Option<&TileRecord> {
        self.tiles.get(usize::from(id))
    }

    pub fn zone(&self, id: u16) -> Option<&ZoneRecord> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn item_name(&self, id: u16) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.name.as_str())
    }

    pub fn creature(&self, id: u16) -> Option<&CreatureRecord> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn puzzle(&self, id: u16) -> Option<&PuzzleRecord> {
        self.puzzles.iter().find(|p| p.id == id)
    }

    /// Whether `(x, y)` in `zone` can be walked on, per [`ZoneRecord::is_walkable`].
    pub fn is_walkable(&self, zone: &ZoneRecord, x: u16, y: u16) -> bool {
        zone.is_walkable(x, y, |id| self.tile(id).map(|t| t.is_walkable))
    }

    pub fn tileset(&self, columns: u32) -> RgbaImage {
        render_tileset(&self.tiles, columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchState {
    ReadingTag,
    Done,
}

struct Dispatcher<'a> {
    r: Reader<'a>,
    options: &'a DecodeOptions,
    out: ResourceContainer,
    /// `PUZ2` is decoded after the loop, once the final tile count is known.
    puzzles: Option<(usize, Reader<'a>)>,
}

impl<'a> Dispatcher<'a> {
    fn run(mut self) -> Result<ResourceContainer, DecodeError> {
        let mut state = DispatchState::ReadingTag;
        while state == DispatchState::ReadingTag {
            if self.r.is_empty() {
                state = DispatchState::Done;
                continue;
            }
            let offset = self.r.position();
            let raw = self.r.read_tag()?;
            let tag = SectionTag::from_bytes(raw).ok_or_else(|| DecodeError::UnknownSectionTag {
                tag: raw.iter().map(|&b| char::from(b)).collect(),
                offset,
            })?;
            log::debug!("section {tag} at offset {offset}");
            self.section(tag)
                .map_err(|e| e.in_section(tag, offset))?;
        }

        if let Some((offset, mut body)) = self.puzzles.take() {
            self.out.puzzles = decode_puzzles(&mut body, self.out.tiles.len())
                .map_err(|e| e.in_section(SectionTag::Puz2, offset))?;
        }
        log::debug!(
            "decoded {} tiles, {} zones, {} items, {} creatures, {} puzzles, {} sounds",
            self.out.tiles.len(),
            self.out.zones.len(),
            self.out.items.len(),
            self.out.creatures.len(),
            self.out.puzzles.len(),
            self.out.sounds.len()
        );
        Ok(self.out)
    }

    /// Reader over a `u32`-length-prefixed section body.
    fn body(&mut self) -> Result<Reader<'a>, DecodeError> {
        let length = self.r.read_u32()? as usize;
        self.r.sub_reader(length)
    }

    fn section(&mut self, tag: SectionTag) -> Result<(), DecodeError> {
        match tag {
            SectionTag::Vers => {
                self.r.skip(1)?;
                let major = self.r.read_u8()?;
                self.r.skip(1)?;
                let minor = self.r.read_u8()?;
                let version = FormatVersion { major, minor };
                log::debug!("format version {version}");
                self.out.version = Some(version);
            }
            SectionTag::Stup | SectionTag::Chwp | SectionTag::Caux => {
                let body = self.body()?;
                log::trace!("skipped {} bytes of {tag}", body.remaining());
            }
            SectionTag::Snds => {
                self.out.sounds = decode_sounds(&mut self.body()?)?;
            }
            SectionTag::Zone => self.zones()?,
            SectionTag::Tile => {
                self.out.tiles = decode_tiles(&mut self.body()?, &self.options.palette)?;
            }
            SectionTag::Puz2 => {
                let offset = self.r.position() - 4;
                let body = self.body()?;
                if self.out.tiles.is_empty() {
                    log::warn!("PUZ2 at offset {offset} precedes TILE");
                }
                if self.puzzles.replace((offset, body)).is_some() {
                    log::warn!("duplicate PUZ2 section at offset {offset} replaces the earlier one");
                }
            }
            SectionTag::Tnam => {
                self.out.items = decode_items(&mut self.body()?)?;
            }
            SectionTag::Char => {
                self.out.creatures = decode_creatures(&mut self.body()?)?;
            }
            SectionTag::Endf => self.r.skip_rest(),
        }
        Ok(())
    }

    fn zones(&mut self) -> Result<(), DecodeError> {
        let count = self.r.read_u16()?;
        self.out.zones.reserve(usize::from(count));
        for index in 0..count {
            self.r.skip(2)?;
            let length = self.r.read_u32()? as usize;
            let mut payload = self.r.sub_reader(length)?;
            let zone = decode_zone(&mut payload)?;
            if zone.id != index {
                log::debug!("zone at position {index} carries id {}", zone.id);
            }
            self.out.zones.push(zone);
        }
        Ok(())
    }
}

/// Decode a container held in memory.
pub fn decode_container(
    data: &[u8],
    options: &DecodeOptions,
) -> Result<ResourceContainer, DecodeError> {
    Dispatcher {
        r: Reader::new(data),
        options,
        out: ResourceContainer::default(),
        puzzles: None,
    }
    .run()
}

/// Read a whole container from `reader` and decode it.
pub fn read_container<R: Read>(
    mut reader: R,
    options: &DecodeOptions,
) -> Result<ResourceContainer, DecodeError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_container(&data, options)
}
