//! Lay decoded tiles out as a single grid image.

use dta_types::{TILE_HEIGHT, TILE_WIDTH};
use image::RgbaImage;

use crate::tile::TileRecord;

pub const DEFAULT_COLUMNS: u32 = 20;

/// Pixel origin of `tile_id` in a tileset `columns` tiles wide.
pub fn tileset_position(tile_id: u16, columns: u32) -> (u32, u32) {
    cell_origin(u32::from(tile_id), columns.max(1))
}

fn cell_origin(index: u32, columns: u32) -> (u32, u32) {
    ((index % columns) * TILE_WIDTH, (index / columns) * TILE_HEIGHT)
}

/// Render every tile, in id order, into one image `columns` tiles wide.
///
/// The sheet is never wider than one row of all tiles.
pub fn render_tileset(tiles: &[TileRecord], columns: u32) -> RgbaImage {
    let count = tiles.len() as u32;
    let columns = columns.clamp(1, count.max(1));
    let rows = count.div_ceil(columns);
    let width = if tiles.is_empty() { 0 } else { columns * TILE_WIDTH };
    let mut canvas = RgbaImage::new(width, rows * TILE_HEIGHT);
    for (index, tile) in tiles.iter().enumerate() {
        let (x0, y0) = cell_origin(index as u32, columns);
        for (x, y, pixel) in tile.pixels.enumerate_pixels() {
            canvas.put_pixel(x0 + x, y0 + y, *pixel);
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use dta_types::TileCategory;
    use image::Rgba;

    fn solid(id: u16, shade: u8) -> TileRecord {
        TileRecord {
            id,
            flags: dta_types::TileFlags::FLOOR,
            category: TileCategory::Terrain,
            is_walkable: true,
            pixels: RgbaImage::from_pixel(TILE_WIDTH, TILE_HEIGHT, Rgba([shade, shade, shade, 255])),
        }
    }

    #[test]
    fn positions_wrap_by_columns() {
        assert_eq!(tileset_position(0, 20), (0, 0));
        assert_eq!(tileset_position(19, 20), (19 * 32, 0));
        assert_eq!(tileset_position(21, 20), (32, 32));
        assert_eq!(tileset_position(3, 0), (0, 96));
    }

    #[test]
    fn grid_dimensions_and_placement() {
        let tiles: Vec<_> = (0..5).map(|i| solid(i, i as u8 * 10)).collect();
        let sheet = render_tileset(&tiles, 2);
        assert_eq!(sheet.dimensions(), (64, 96));
        assert_eq!(sheet.get_pixel(0, 0).0[0], 0);
        assert_eq!(sheet.get_pixel(33, 0).0[0], 10);
        assert_eq!(sheet.get_pixel(5, 70).0[0], 40);
        // unused cell stays transparent
        assert_eq!(sheet.get_pixel(40, 70).0[3], 0);
    }

    #[test]
    fn columns_clamp_to_tile_count() {
        let tiles: Vec<_> = (0..3).map(|i| solid(i, 50)).collect();
        assert_eq!(render_tileset(&tiles, u32::MAX).dimensions(), (96, 32));
        assert_eq!(render_tileset(&tiles[..1], 0).dimensions(), (32, 32));
    }

    #[test]
    fn empty_tileset() {
        assert_eq!(render_tileset(&[], DEFAULT_COLUMNS).dimensions(), (0, 0));
    }
}
