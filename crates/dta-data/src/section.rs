use std::fmt;

use serde::Serialize;
use strum::{EnumCount, EnumIter};

/// Top-level section tags. The set is closed; anything else is corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount)]
pub enum SectionTag {
    Vers,
    Stup,
    Snds,
    Zone,
    Tile,
    Puz2,
    Char,
    Chwp,
    Caux,
    Tnam,
    Endf,
}

impl SectionTag {
    pub const fn bytes(self) -> &'static [u8; 4] {
        match self {
            Self::Vers => b"VERS",
            Self::Stup => b"STUP",
            Self::Snds => b"SNDS",
            Self::Zone => b"ZONE",
            Self::Tile => b"TILE",
            Self::Puz2 => b"PUZ2",
            Self::Char => b"CHAR",
            Self::Chwp => b"CHWP",
            Self::Caux => b"CAUX",
            Self::Tnam => b"TNAM",
            Self::Endf => b"ENDF",
        }
    }

    pub fn from_bytes(tag: [u8; 4]) -> Option<Self> {
        Some(match &tag {
            b"VERS" => Self::Vers,
            b"STUP" => Self::Stup,
            b"SNDS" => Self::Snds,
            b"ZONE" => Self::Zone,
            b"TILE" => Self::Tile,
            b"PUZ2" => Self::Puz2,
            b"CHAR" => Self::Char,
            b"CHWP" => Self::Chwp,
            b"CAUX" => Self::Caux,
            b"TNAM" => Self::Tnam,
            b"ENDF" => Self::Endf,
            _ => return None,
        })
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.bytes() {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}
