//! The toroidal tile grid.
//!
//! # Design Principles
//!
//! - Dimensions are fixed at construction.
//! - Every raw coordinate goes through [`Map::wrap`] before it reaches a
//!   tile. Moving off one edge lands on the opposite edge on both axes.
//! - Tiles index players by id; the world owns the players themselves.

use rand::Rng;
use zappy_types::{Inventory, PlayerId, Position, Resource};

use crate::error::WorldError;

/// One cell of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    /// Resources lying on the tile.
    pub resources: Inventory,
    occupants: Vec<PlayerId>,
}

impl Tile {
    /// Ids of the players standing here, in arrival order.
    pub fn occupants(&self) -> &[PlayerId] {
        &self.occupants
    }

    /// Whether anyone stands here.
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub(crate) fn add_occupant(&mut self, player: PlayerId) {
        if !self.occupants.contains(&player) {
            self.occupants.push(player);
        }
    }

    pub(crate) fn remove_occupant(&mut self, player: PlayerId) {
        self.occupants.retain(|p| *p != player);
    }

    /// Look descriptor: `player` once if occupied, then one token per
    /// resource unit, food first.
    pub fn describe(&self) -> String {
        let mut tokens: Vec<&str> = Vec::new();
        if self.is_occupied() {
            tokens.push("player");
        }
        for resource in Resource::ALL {
            for _ in 0..self.resources.get(resource) {
                tokens.push(resource.name());
            }
        }
        tokens.join(" ")
    }
}

/// Fixed-size toroidal grid of [`Tile`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Map {
    /// Create an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is zero or
    /// the tile count does not fit in memory indices.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        let invalid = WorldError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let area = u64::from(width)
            .checked_mul(u64::from(height))
            .and_then(|a| usize::try_from(a).ok())
            .ok_or(invalid)?;
        Ok(Self {
            width,
            height,
            tiles: vec![Tile::default(); area],
        })
    }

    /// Width in tiles.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of tiles.
    pub const fn area(&self) -> u64 {
        // Both factors are u32, the product fits in u64.
        (self.width as u64).saturating_mul(self.height as u64)
    }

    /// Wrap raw coordinates onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        let wx = x.rem_euclid(i64::from(self.width));
        let wy = y.rem_euclid(i64::from(self.height));
        Position::new(
            u32::try_from(wx).unwrap_or(0),
            u32::try_from(wy).unwrap_or(0),
        )
    }

    /// `from` shifted by `(dx, dy)`, wrapped.
    pub fn offset(&self, from: Position, dx: i64, dy: i64) -> Position {
        self.wrap(
            i64::from(from.x).saturating_add(dx),
            i64::from(from.y).saturating_add(dy),
        )
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        let flat = u64::from(pos.y)
            .checked_mul(u64::from(self.width))?
            .checked_add(u64::from(pos.x))?;
        usize::try_from(flat).ok()
    }

    /// Tile at a wrapped position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` was not wrapped.
    pub fn tile(&self, pos: Position) -> Result<&Tile, WorldError> {
        self.index(pos)
            .and_then(|i| self.tiles.get(i))
            .ok_or(WorldError::OutOfBounds(pos))
    }

    /// Mutable tile at a wrapped position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` was not wrapped.
    pub fn tile_mut(&mut self, pos: Position) -> Result<&mut Tile, WorldError> {
        let index = self.index(pos).ok_or(WorldError::OutOfBounds(pos))?;
        self.tiles.get_mut(index).ok_or(WorldError::OutOfBounds(pos))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Every tile with its position, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> {
        self.positions().zip(self.tiles.iter())
    }

    /// Sum of every tile's resources.
    pub fn resource_totals(&self) -> [u64; 7] {
        let mut totals = [0u64; 7];
        for tile in &self.tiles {
            for (total, count) in totals.iter_mut().zip(tile.resources.counts()) {
                *total = total.saturating_add(u64::from(count));
            }
        }
        totals
    }

    /// A uniformly random position.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.random_range(0..self.width), rng.random_range(0..self.height))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_rejected() {
        assert!(Map::new(0, 5).is_err());
        assert!(Map::new(5, 0).is_err());
    }

    #[test]
    fn wrapping_is_periodic() {
        let map = Map::new(10, 7).unwrap();
        for x in -3..13i64 {
            for y in -3..10i64 {
                for k in [-2i64, -1, 1, 3] {
                    assert_eq!(map.wrap(x, y), map.wrap(x + k * 10, y + k * 7));
                }
            }
        }
        assert_eq!(map.wrap(-1, -1), Position::new(9, 6));
        assert_eq!(map.wrap(10, 7), Position::new(0, 0));
    }

    #[test]
    fn unwrapped_position_is_out_of_bounds() {
        let map = Map::new(3, 3).unwrap();
        assert_eq!(
            map.tile(Position::new(3, 0)).unwrap_err(),
            WorldError::OutOfBounds(Position::new(3, 0))
        );
        assert!(map.tile(Position::new(2, 2)).is_ok());
    }

    #[test]
    fn tile_description_lists_units() {
        let mut tile = Tile::default();
        assert_eq!(tile.describe(), "");
        tile.resources.add(Resource::Food, 2).unwrap();
        tile.resources.add(Resource::Thystame, 1).unwrap();
        tile.add_occupant(PlayerId(1));
        assert_eq!(tile.describe(), "player food food thystame");
    }

    #[test]
    fn occupants_are_a_set() {
        let mut tile = Tile::default();
        tile.add_occupant(PlayerId(1));
        tile.add_occupant(PlayerId(1));
        assert_eq!(tile.occupants(), &[PlayerId(1)]);
        tile.remove_occupant(PlayerId(1));
        assert!(!tile.is_occupied());
    }

    #[test]
    fn totals_sum_tiles() {
        let mut map = Map::new(2, 2).unwrap();
        map.tile_mut(Position::new(0, 0)).unwrap().resources.add(Resource::Sibur, 2).unwrap();
        map.tile_mut(Position::new(1, 1)).unwrap().resources.add(Resource::Sibur, 3).unwrap();
        assert_eq!(map.resource_totals()[Resource::Sibur.index()], 5);
    }
}
