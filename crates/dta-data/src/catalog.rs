//! Fixed- and variable-stride tables: items (`TNAM`), creatures (`CHAR`)
//! and puzzles (`PUZ2`).

use dta_types::{
    CreatureRecord, Direction, ItemRecord, PuzzleItemKind, PuzzleKind, PuzzleRecord, PuzzleReward,
    SENTINEL_ID,
};
use strum::EnumCount;

use crate::error::DecodeError;
use crate::reader::{Reader, trim_nul};

pub const ITEM_RECORD_LEN: usize = 26;
pub const CREATURE_RECORD_LEN: usize = 84;

const CREATURE_NAME_OFFSET: usize = 10;
const CREATURE_IMAGES_OFFSET: usize = 36;
/// Puzzle text starts this far into the puzzle body.
const PUZZLE_TEXT_OFFSET: usize = 14;

/// Items are read while more than one record's worth of bytes remain, and
/// stop early at the sentinel id.
pub fn decode_items(r: &mut Reader<'_>) -> Result<Vec<ItemRecord>, DecodeError> {
    let mut items = Vec::new();
    while r.remaining() > ITEM_RECORD_LEN {
        let record = r.read_bytes(ITEM_RECORD_LEN)?;
        let id = u16::from_le_bytes([record[0], record[1]]);
        if id == SENTINEL_ID {
            break;
        }
        items.push(ItemRecord {
            id,
            name: trim_nul(&record[2..]),
        });
    }
    r.skip_rest();
    Ok(items)
}

pub fn decode_creatures(r: &mut Reader<'_>) -> Result<Vec<CreatureRecord>, DecodeError> {
    let mut creatures = Vec::new();
    while r.remaining() > CREATURE_RECORD_LEN {
        let record = r.read_bytes(CREATURE_RECORD_LEN)?;
        let id = u16::from_le_bytes([record[0], record[1]]);
        let name = record[CREATURE_NAME_OFFSET..]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect();

        let mut images = [0u16; Direction::COUNT];
        for (slot, direction) in CreatureRecord::IMAGE_SLOTS.iter().enumerate() {
            let at = CREATURE_IMAGES_OFFSET + slot * 2;
            images[*direction as usize] = u16::from_le_bytes([record[at], record[at + 1]]);
        }
        creatures.push(CreatureRecord { id, name, images });
    }
    r.skip_rest();
    Ok(creatures)
}

/// Collect the length-prefixed text segments of a puzzle body.
///
/// Leading zero padding is skipped two bytes at a time; at least one
/// segment is always read, and reading continues while more than four
/// bytes remain.
fn read_puzzle_text(body: &mut Reader<'_>) -> Result<Vec<String>, DecodeError> {
    while body.peek_u8()? == 0 {
        body.skip(2)?;
    }
    let mut segments = Vec::new();
    loop {
        let len = usize::from(body.read_u16()?);
        segments.push(body.read_text(len)?);
        if body.remaining() <= 4 {
            break;
        }
    }
    Ok(segments)
}

type PuzzleText = (Option<String>, Option<String>, Option<String>);

/// Map 1-3 segments onto `(need, done, have)`; fewer segments drop the
/// earlier fields first.
fn assign_text(segments: Vec<String>, offset: usize) -> Result<PuzzleText, DecodeError> {
    let count = segments.len();
    let mut it = segments.into_iter();
    Ok(match count {
        3 => (it.next(), it.next(), it.next()),
        2 => (None, it.next(), it.next()),
        1 => (None, None, it.next()),
        _ => {
            return Err(DecodeError::MalformedRecordCount {
                what: "puzzle text segment",
                count,
                offset,
            });
        }
    })
}

fn decode_puzzle(id: u16, r: &mut Reader<'_>, tile_count: usize) -> Result<PuzzleRecord, DecodeError> {
    r.skip(4)?;
    let length_offset = r.position();
    let length = usize::from(r.read_u16()?);
    r.skip(2)?;
    let body_len = length.checked_sub(4).ok_or(DecodeError::MalformedLength {
        what: "puzzle",
        length,
        offset: length_offset,
    })?;
    let mut body = r.sub_reader(body_len)?;

    let kind_code = body.read_u8()?;
    let kind = PuzzleKind::from_code(kind_code);
    if !kind.is_known() {
        log::warn!("puzzle {id} has unrecognised kind {kind_code}");
    }
    body.skip(3)?;
    let item_offset = body.position();
    let item_code = body.read_u8()?;
    let item_kind = PuzzleItemKind::from_repr(item_code).ok_or(DecodeError::UnknownFieldValue {
        field: "puzzle item kind",
        value: u32::from(item_code),
        offset: item_offset,
    })?;
    body.skip(PUZZLE_TEXT_OFFSET - 5)?;

    let text_offset = body.position();
    let (need_text, done_text, have_text) = assign_text(read_puzzle_text(&mut body)?, text_offset)?;

    let lock_item_id = r.read_u16()?;
    let reward = PuzzleReward::classify(r.read_u16()?, tile_count);

    Ok(PuzzleRecord {
        id,
        kind,
        item_kind,
        need_text,
        done_text,
        have_text,
        lock_item_id,
        reward,
    })
}

/// Decode puzzles until the data runs out or the sentinel id appears.
///
/// `tile_count` decides whether each reward slot names a tile.
pub fn decode_puzzles(r: &mut Reader<'_>, tile_count: usize) -> Result<Vec<PuzzleRecord>, DecodeError> {
    let mut puzzles = Vec::new();
    while !r.is_empty() {
        let id = r.read_u16()?;
        if id == SENTINEL_ID {
            break;
        }
        log::trace!("puzzle {id} at offset {}", r.position() - 2);
        puzzles.push(decode_puzzle(id, r, tile_count)?);
    }
    r.skip_rest();
    Ok(puzzles)
}
