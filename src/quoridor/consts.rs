use crate::utils::prelude::*;

pub const DEFAULT_COLS: usize = 9;
pub const DEFAULT_ROWS: usize = 9;
pub const DEFAULT_TOTAL_FENCES: usize = 20;
pub const MIN_SIDE: usize = 3;
/// Columns are notated with a single letter.
pub const MAX_SIDE: usize = 26;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// A player's place at the table, which fixes their start cell and goal edge.
/// Seats are filled in declaration order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seat {
    North = 0,
    South = 1,
    West = 2,
    East = 3,
}

impl Seat {
    /// Gets the seats in the order they are filled.
    pub fn all() -> [Seat; MAX_PLAYERS] {
        [Seat::North, Seat::South, Seat::West, Seat::East]
    }

    /// Gets the first `count` seats.
    pub fn seated(count: usize) -> impl Iterator<Item = Seat> {
        Seat::all().into_iter().take(count)
    }

    /// Notates the seat.
    pub fn notate(&self) -> String {
        match self {
            Seat::North => "N",
            Seat::South => "S",
            Seat::West  => "W",
            Seat::East  => "E",
        }.into()
    }
}

impl From<u8> for Seat {
    fn from(value: u8) -> Self {
        match value {
            0 => Seat::North,
            1 => Seat::South,
            2 => Seat::West,
            3 => Seat::East,
            _ => panic!("expected Seat of 0-3, received {value}"),
        }
    }
}

impl std::str::FromStr for Seat {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "n" | "N" | "north" => Ok(Seat::North),
            "s" | "S" | "south" => Ok(Seat::South),
            "w" | "W" | "west"  => Ok(Seat::West),
            "e" | "E" | "east"  => Ok(Seat::East),
            _                   => Err(anyhow!("invalid notation {s} for seat"))
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

/// The two ways a fence can lie between cells.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Horizontal = 0,
    Vertical = 1,
}

impl Orientation {
    /// Gets both orientations in order.
    pub fn all() -> [Orientation; 2] {
        [Orientation::Horizontal, Orientation::Vertical]
    }

    /// The orientation that crosses this one.
    pub fn perpendicular(&self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical   => Orientation::Horizontal,
        }
    }

    /// Notates the orientation.
    pub fn notate(&self) -> String {
        match self {
            Orientation::Horizontal => "H",
            Orientation::Vertical   => "V",
        }.into()
    }
}

impl std::str::FromStr for Orientation {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "H" | "h" => Ok(Orientation::Horizontal),
            "V" | "v" => Ok(Orientation::Vertical),
            _         => Err(anyhow!("invalid notation {s} for orientation"))
        }
    }
}
