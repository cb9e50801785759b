use serde::Serialize;
use strum::{EnumCount, EnumIter, FromRepr};

/// The eight facings a creature can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
}

impl Direction {
    /// Unit step in screen coordinates (y grows downward).
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::UpRight => (1, -1),
            Self::Right => (1, 0),
            Self::DownRight => (1, 1),
            Self::Down => (0, 1),
            Self::DownLeft => (-1, 1),
            Self::Left => (-1, 0),
            Self::UpLeft => (-1, -1),
        }
    }

    pub fn clockwise(self) -> Self {
        Self::from_repr((self as u8 + 1) % Self::COUNT as u8).unwrap_or(self)
    }

    pub fn counter_clockwise(self) -> Self {
        Self::from_repr((self as u8 + Self::COUNT as u8 - 1) % Self::COUNT as u8).unwrap_or(self)
    }

    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}

/// Entry from the `CHAR` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureRecord {
    pub id: u16,
    pub name: String,
    /// Tile id per facing, indexed by `Direction as usize`.
    pub images: [u16; Direction::COUNT],
}

impl CreatureRecord {
    /// Facing order of the tile-id slots inside an on-disk record.
    pub const IMAGE_SLOTS: [Direction; Direction::COUNT] = [
        Direction::UpLeft,
        Direction::DownRight,
        Direction::Up,
        Direction::Left,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::Right,
        Direction::Down,
    ];

    pub fn image(&self, direction: Direction) -> u16 {
        self.images[direction as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn count() {
        assert_eq!(Direction::COUNT, 8);
    }

    #[test]
    fn rotation_is_cyclic() {
        for d in Direction::iter() {
            assert_eq!(d.clockwise().counter_clockwise(), d);
            let mut spun = d;
            for _ in 0..8 {
                spun = spun.clockwise();
            }
            assert_eq!(spun, d);
        }
        assert_eq!(Direction::UpLeft.clockwise(), Direction::Up);
        assert_eq!(Direction::Up.counter_clockwise(), Direction::UpLeft);
    }

    #[test]
    fn diagonals() {
        let diagonal: Vec<_> = Direction::iter().filter(|d| d.is_diagonal()).collect();
        assert_eq!(
            diagonal,
            [
                Direction::UpRight,
                Direction::DownRight,
                Direction::DownLeft,
                Direction::UpLeft
            ]
        );
    }

    #[test]
    fn image_slots_cover_every_direction() {
        for d in Direction::iter() {
            assert!(CreatureRecord::IMAGE_SLOTS.contains(&d));
        }
    }
}
