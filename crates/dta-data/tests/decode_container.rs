//! Whole-container decoding over synthetic archives.

use dta_data::{DecodeError, DecodeOptions, ResourceContainer, SectionTag, decode_container};
use dta_types::{
    ActionKind, Biome, Coded, ConditionKind, Direction, HotspotKind, NO_TILE, PuzzleReward,
    RewardFlags, TILE_PIXELS, TileCategory, ZoneKind,
};

/// Little-endian byte builder for test containers.
#[derive(Default)]
struct Bytes(Vec<u8>);

impl Bytes {
    fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    fn u16(mut self, v: u16) -> Self {
        self.0.extend(v.to_le_bytes());
        self
    }

    fn u32(mut self, v: u32) -> Self {
        self.0.extend(v.to_le_bytes());
        self
    }

    fn raw(mut self, v: &[u8]) -> Self {
        self.0.extend(v);
        self
    }

    fn section(self, tag: &[u8; 4], body: &[u8]) -> Self {
        self.raw(tag).u32(body.len() as u32).raw(body)
    }

    /// Zone sub-section whose length counts its own header.
    fn sub(self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.raw(tag)
            .u16(payload.len() as u16 + 8)
            .u16(0)
            .raw(payload)
    }
}

fn zone_payload(id: u16, width: u16, height: u16, with_script: bool) -> Vec<u8> {
    let mut z = Bytes::default()
        .u16(id)
        .raw(b"IZON")
        .u32(0)
        .u16(width)
        .u16(height)
        .u8(1)
        .raw(&[0; 5])
        .u8(2)
        .u8(0);
    for i in 0..width * height {
        z = z.u16(i % 2).u16(if i == 0 { 1 } else { NO_TILE }).u16(NO_TILE);
    }
    // one hotspot: zone entrance at (1, 2)
    z = z.u16(1).u16(9).u16(0).u16(1).u16(2).u16(0).u16(44);

    let mut actor = Bytes::default().u16(1).u16(3).u16(4);
    actor = actor.raw(&[0; 6]).raw(&[0xFF; 32]);
    let izax = Bytes::default().u16(0).u16(1).raw(&actor.0);
    z = z.sub(b"IZAX", &izax.0);
    z = z.sub(b"IZX2", &Bytes::default().u16(1).u16(2).0);
    z = z.sub(b"IZX3", &Bytes::default().u16(0).0);
    z = z.raw(b"IZX4").u32(12).raw(&[0, 0, 0b10, 0]);

    if with_script {
        let text = b"Halt!";
        let blob = Bytes::default()
            .u16(1)
            .u8(0x01)
            .u8(0)
            .raw(&[0; 12])
            .u16(1)
            .u8(0x05)
            .u8(0)
            .raw(&[0; 10])
            .u16(text.len() as u16)
            .raw(text);
        z = z.raw(b"IACT").u32(blob.0.len() as u32).raw(&blob.0);
    }
    z.0
}

fn zone_section(zones: &[Vec<u8>]) -> Vec<u8> {
    let mut b = Bytes::default().raw(b"ZONE").u16(zones.len() as u16);
    for payload in zones {
        b = b.u16(0).u32(payload.len() as u32).raw(payload);
    }
    b.0
}

fn tile_body(flags: &[u32]) -> Vec<u8> {
    let mut b = Bytes::default();
    for &f in flags {
        b = b.u32(f).raw(&[2; TILE_PIXELS]);
    }
    b.0
}

fn item_body() -> Vec<u8> {
    let mut b = Bytes::default();
    for (id, name) in [(1u16, "Locator"), (2, "Lightsaber")] {
        let mut rec = id.to_le_bytes().to_vec();
        rec.extend(name.as_bytes());
        rec.resize(26, 0);
        b = b.raw(&rec);
    }
    b = b.u16(0xFFFF).raw(&[0; 24]);
    b.raw(&[0x55; 60]).0
}

fn creature_body() -> Vec<u8> {
    let mut rec = 7u16.to_le_bytes().to_vec();
    rec.resize(10, 0);
    rec.extend(b"Jawa");
    rec.resize(36, 0);
    for image in 100u16..108 {
        rec.extend(image.to_le_bytes());
    }
    rec.resize(84, 0);
    rec.extend([0; 2]);
    rec
}

fn puzzle_body(reward: u16) -> Vec<u8> {
    let mut body = vec![3, 0, 0, 0, 1];
    body.resize(14, 0);
    for text in ["Bring me a part", "Thanks", "Take this"] {
        body.extend((text.len() as u16).to_le_bytes());
        body.extend(text.as_bytes());
    }
    body.extend([0; 4]);
    Bytes::default()
        .u16(0)
        .raw(b"IPUZ")
        .u16(body.len() as u16 + 4)
        .u16(0)
        .raw(&body)
        .u16(9)
        .u16(reward)
        .u16(0xFFFF)
        .raw(&[0xEE; 12])
        .0
}

fn sound_body() -> Vec<u8> {
    Bytes::default()
        .u16(0xFFFE)
        .u16(6)
        .raw(b"A.WAV\0")
        .u16(6)
        .raw(b"B.WAV\0")
        .0
}

/// A full container. Zones and puzzles come before tiles on purpose.
fn container() -> Vec<u8> {
    Bytes::default()
        .raw(b"VERS")
        .raw(&[0, 2, 0, 0])
        .section(b"STUP", &[0xAB; 64])
        .section(b"SNDS", &sound_body())
        .raw(&zone_section(&[
            zone_payload(0, 2, 2, false),
            zone_payload(1, 3, 1, true),
        ]))
        .section(b"PUZ2", &puzzle_body(2))
        .section(b"TILE", &tile_body(&[0x2, 0x5, 0x10]))
        .section(b"CHAR", &creature_body())
        .section(b"CHWP", &[1, 2, 3, 4])
        .section(b"CAUX", &[])
        .section(b"TNAM", &item_body())
        .raw(b"ENDF")
        .raw(&[0; 6])
        .0
}

fn decode(data: &[u8]) -> Result<ResourceContainer, DecodeError> {
    decode_container(data, &DecodeOptions::default())
}

#[test]
fn full_container_decodes() {
    let out = decode(&container()).expect("decode");

    assert_eq!(out.version.as_ref().map(|v| (v.major, v.minor)), Some((2, 0)));
    assert_eq!(out.sounds, ["A.WAV", "B.WAV"]);

    assert_eq!(out.tiles.len(), 3);
    assert_eq!(out.tiles[0].category, TileCategory::Terrain);
    assert_eq!(out.tiles[1].category, TileCategory::Wall);
    assert_eq!(out.tiles[2].category, TileCategory::Overlay);
    assert!(out.tiles.iter().all(|t| t.pixels.dimensions() == (32, 32)));

    assert_eq!(out.zones.len(), 2);
    let zone = out.zone(1).expect("zone 1");
    assert_eq!(zone.kind, ZoneKind::Plain);
    assert_eq!(zone.biome, Biome::Snow);
    assert_eq!(zone.hotspots[0].kind, Coded::Known(HotspotKind::ZoneEntrance));
    assert_eq!((zone.hotspots[0].x, zone.hotspots[0].y, zone.hotspots[0].arg), (1, 2, 44));
    assert_eq!(zone.zone_actors.len(), 1);
    assert_eq!(zone.zone_actors[0].creature_id, 1);
    assert_eq!(zone.zone_actors[0].unknown, None);
    assert_eq!(zone.reward_items, [2]);
    assert!(zone.quest_npcs.is_empty());
    assert_eq!(zone.trailer.mask, ".Y......");
    assert_eq!(zone.action_triggers.len(), 1);
    let script = &zone.action_triggers[0];
    assert_eq!(script.conditions[0].kind, Coded::Known(ConditionKind::Enter));
    assert_eq!(script.actions[0].kind, Coded::Known(ActionKind::CreatureSay));
    assert_eq!(script.actions[0].text.as_deref(), Some("Halt!"));

    assert_eq!(out.items.len(), 2);
    assert_eq!(out.item_name(2), Some("Lightsaber"));
    assert_eq!(out.creature(7).map(|c| c.name.as_str()), Some("Jawa"));
    assert_eq!(out.creature(7).map(|c| c.image(Direction::Down)), Some(107));

    assert_eq!(out.puzzles.len(), 1);
    let puzzle = out.puzzle(0).expect("puzzle 0");
    assert_eq!(puzzle.need_text.as_deref(), Some("Bring me a part"));
    assert_eq!(puzzle.have_text.as_deref(), Some("Take this"));
    assert_eq!(puzzle.lock_item_id, 9);
}

#[test]
fn layers_always_match_dimensions() {
    let out = decode(&container()).unwrap();
    for zone in &out.zones {
        let cells = zone.width as usize * zone.height as usize;
        assert_eq!(zone.terrain.len(), cells);
        assert_eq!(zone.walls.len(), cells);
        assert_eq!(zone.overlay.len(), cells);
    }
    assert_eq!(out.zones[0].walls[1], NO_TILE);
}

#[test]
fn puzzle_reward_uses_final_tile_count() {
    // PUZ2 precedes TILE, reward 2 is inside the 3-tile table
    let out = decode(&container()).unwrap();
    assert_eq!(out.puzzles[0].reward, PuzzleReward::Tile(2));

    let data = Bytes::default()
        .section(b"PUZ2", &puzzle_body(3))
        .section(b"TILE", &tile_body(&[0x2, 0x5, 0x10]))
        .0;
    let out = decode(&data).unwrap();
    assert_eq!(out.puzzles[0].reward, PuzzleReward::Flags(RewardFlags(3)));
    assert_eq!(out.puzzles[0].reward_tile_id(), None);
}

#[test]
fn decoding_is_idempotent() {
    let data = container();
    assert_eq!(decode(&data).unwrap(), decode(&data).unwrap());
}

#[test]
fn oversized_zone_length_is_eof() {
    let payload = zone_payload(0, 1, 1, false);
    let data = Bytes::default()
        .raw(b"ZONE")
        .u16(1)
        .u16(0)
        .u32(payload.len() as u32 + 100)
        .raw(&payload)
        .0;
    let err = decode(&data).unwrap_err();
    assert_eq!(err.section(), Some(SectionTag::Zone));
    assert!(matches!(
        err.innermost(),
        DecodeError::UnexpectedEof { offset: 12, .. }
    ));
}

#[test]
fn zone_errors_report_absolute_offsets() {
    let mut payload = zone_payload(0, 1, 1, false);
    payload[2..6].copy_from_slice(b"XXXX");
    let data = Bytes::default()
        .section(b"STUP", &[0; 8])
        .raw(&zone_section(&[payload]))
        .0;
    let err = decode(&data).unwrap_err();
    assert!(matches!(err, DecodeError::Section { offset: 16, .. }));
    // STUP 16 bytes, ZONE tag 4, count 2, unused 2, length 4, id 2
    assert!(matches!(
        err.innermost(),
        DecodeError::BadMagic { offset: 30, .. }
    ));
}

#[test]
fn item_sentinel_stops_before_garbage() {
    let out = decode(&Bytes::default().section(b"TNAM", &item_body()).0).unwrap();
    assert_eq!(out.items.len(), 2);
    assert_eq!(out.items[0].name, "Locator");
}

#[test]
fn truncated_containers_never_panic() {
    let data = container();
    for len in 0..data.len() {
        // Either a clean decode of a shorter container or an error.
        let _ = decode(&data[..len]);
    }
}

#[test]
fn tileset_has_one_cell_per_tile() {
    let out = decode(&container()).unwrap();
    let sheet = out.tileset(2);
    assert_eq!(sheet.dimensions(), (64, 64));
}
