//! Decoder for Desktop Adventures `.DTA` resource containers.
//!
//! [`decode_container`] walks the container's tagged sections once, top to
//! bottom, and returns an owned [`ResourceContainer`]. Any inconsistency in
//! the byte layout aborts the whole decode; nothing partial is returned.

pub mod catalog;
pub mod container;
pub mod error;
pub mod palette;
pub mod reader;
pub mod script;
pub mod section;
pub mod sounds;
pub mod tile;
pub mod tileset;
pub mod zone;

pub use container::{DecodeOptions, ResourceContainer, decode_container, read_container};
pub use error::DecodeError;
pub use palette::{PALETTE_BYTES, Palette};
pub use section::SectionTag;
pub use tile::{TILE_RECORD_LEN, TileRecord};
pub use tileset::{DEFAULT_COLUMNS, render_tileset, tileset_position};
