//! 256-colour palette used to expand tile bitmaps.

use image::Rgba;

use crate::error::DecodeError;

/// Size of a palette stored as 256 four-byte `B, G, R, reserved` entries.
pub const PALETTE_BYTES: usize = 256 * 4;

const fn builtin_colors() -> [[u8; 3]; 256] {
    // Static system colours at both ends, colour cube and grey ramp between.
    const LOW: [[u8; 3]; 10] = [
        [0x00, 0x00, 0x00],
        [0x80, 0x00, 0x00],
        [0x00, 0x80, 0x00],
        [0x80, 0x80, 0x00],
        [0x00, 0x00, 0x80],
        [0x80, 0x00, 0x80],
        [0x00, 0x80, 0x80],
        [0xC0, 0xC0, 0xC0],
        [0xC0, 0xDC, 0xC0],
        [0xA6, 0xCA, 0xF0],
    ];
    const HIGH: [[u8; 3]; 10] = [
        [0xFF, 0xFB, 0xF0],
        [0xA0, 0xA0, 0xA4],
        [0x80, 0x80, 0x80],
        [0xFF, 0x00, 0x00],
        [0x00, 0xFF, 0x00],
        [0xFF, 0xFF, 0x00],
        [0x00, 0x00, 0xFF],
        [0xFF, 0x00, 0xFF],
        [0x00, 0xFF, 0xFF],
        [0xFF, 0xFF, 0xFF],
    ];

    let mut colors = [[0u8; 3]; 256];
    let mut i = 0;
    while i < 10 {
        colors[i] = LOW[i];
        colors[246 + i] = HIGH[i];
        i += 1;
    }
    let mut n = 0;
    while n < 216 {
        let r = (n / 36) as u8 * 51;
        let g = (n / 6 % 6) as u8 * 51;
        let b = (n % 6) as u8 * 51;
        colors[10 + n] = [r, g, b];
        n += 1;
    }
    let mut g = 0;
    while g < 20 {
        let v = ((g + 1) * 255 / 21) as u8;
        colors[226 + g] = [v, v, v];
        g += 1;
    }
    colors
}

static BUILTIN: [[u8; 3]; 256] = builtin_colors();

/// Maps palette indices to RGBA. Index 0 is transparent regardless of the
/// colour stored for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; 256],
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: BUILTIN }
    }
}

impl Palette {
    /// Load a palette from 256 `B, G, R, reserved` entries.
    pub fn from_bgra(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() != PALETTE_BYTES {
            return Err(DecodeError::MalformedLength {
                what: "palette",
                length: data.len(),
                offset: 0,
            });
        }
        let mut colors = [[0u8; 3]; 256];
        for (color, entry) in colors.iter_mut().zip(data.chunks_exact(4)) {
            *color = [entry[2], entry[1], entry[0]];
        }
        Ok(Self { colors })
    }

    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[usize::from(index)]
    }

    pub fn rgba(&self, index: u8) -> Rgba<u8> {
        if index == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let [r, g, b] = self.rgb(index);
        Rgba([r, g, b, 0xFF])
    }
}
