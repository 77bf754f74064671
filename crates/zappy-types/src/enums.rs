//! Enumeration types for the Zappy world.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource that can lie on a tile or sit in a player's inventory.
///
/// The declaration order is the wire order: observer payloads, inventory
/// replies and look descriptors all list resources food first, then the
/// six stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Eaten to stay alive.
    Food,
    /// First stone, required by every ritual.
    Linemate,
    /// Second stone.
    Deraumere,
    /// Third stone.
    Sibur,
    /// Fourth stone.
    Mendiane,
    /// Fifth stone.
    Phiras,
    /// Sixth and rarest stone.
    Thystame,
}

impl Resource {
    /// Every resource in wire order.
    pub const ALL: [Self; 7] = [
        Self::Food,
        Self::Linemate,
        Self::Deraumere,
        Self::Sibur,
        Self::Mendiane,
        Self::Phiras,
        Self::Thystame,
    ];

    /// The six stones, in wire order. Rituals consume only these.
    pub const STONES: [Self; 6] = [
        Self::Linemate,
        Self::Deraumere,
        Self::Sibur,
        Self::Mendiane,
        Self::Phiras,
        Self::Thystame,
    ];

    /// Position of this resource in wire order (food = 0).
    pub const fn index(self) -> usize {
        match self {
            Self::Food => 0,
            Self::Linemate => 1,
            Self::Deraumere => 2,
            Self::Sibur => 3,
            Self::Mendiane => 4,
            Self::Phiras => 5,
            Self::Thystame => 6,
        }
    }

    /// Resource at the given wire index, if any.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Food),
            1 => Some(Self::Linemate),
            2 => Some(Self::Deraumere),
            3 => Some(Self::Sibur),
            4 => Some(Self::Mendiane),
            5 => Some(Self::Phiras),
            6 => Some(Self::Thystame),
            _ => None,
        }
    }

    /// Lowercase protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Linemate => "linemate",
            Self::Deraumere => "deraumere",
            Self::Sibur => "sibur",
            Self::Mendiane => "mendiane",
            Self::Phiras => "phiras",
            Self::Thystame => "thystame",
        }
    }

    /// Map density in percent: the spawner keeps
    /// `width * height * density / 100` units of this resource on the map.
    pub const fn density(self) -> u64 {
        match self {
            Self::Food => 50,
            Self::Linemate => 30,
            Self::Deraumere => 15,
            Self::Sibur | Self::Mendiane => 10,
            Self::Phiras => 8,
            Self::Thystame => 5,
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = TypesError;

    /// Accepts the protocol name (case-insensitive) or the wire index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Ok(index) = token.parse::<usize>() {
            return Self::from_index(index)
                .ok_or_else(|| TypesError::UnknownResource(token.to_owned()));
        }
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| TypesError::UnknownResource(token.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Facing direction of a player. The protocol encodes it as `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Code 1, towards decreasing `y`.
    #[default]
    North,
    /// Code 2, towards increasing `x`.
    East,
    /// Code 3, towards increasing `y`.
    South,
    /// Code 4, towards decreasing `x`.
    West,
}

impl Orientation {
    /// Every orientation in code order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Protocol code, `1..=4`.
    pub const fn code(self) -> u8 {
        match self {
            Self::North => 1,
            Self::East => 2,
            Self::South => 3,
            Self::West => 4,
        }
    }

    /// Parse a protocol code.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidOrientation`] outside `1..=4`.
    pub const fn from_code(code: u8) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::North),
            2 => Ok(Self::East),
            3 => Ok(Self::South),
            4 => Ok(Self::West),
            other => Err(TypesError::InvalidOrientation(other)),
        }
    }

    /// Quarter turn clockwise (4 wraps to 1).
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Quarter turn counter-clockwise (1 wraps to 4).
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Half turn.
    pub const fn reverse(self) -> Self {
        self.turn_right().turn_right()
    }

    /// Unit step `(dx, dy)` in this direction. North is `(0, -1)`.
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl core::fmt::Display for Orientation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.code())
    }
}
