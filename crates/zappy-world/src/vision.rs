//! What a player sees with `Look`.
//!
//! The field of view is a cone of `level + 1` rings. Ring `r` holds
//! `2r + 1` tiles, `r` steps ahead of the player, scanned from the
//! player's left to its right. Ring 0 is the player's own tile, so index
//! 0 of every look is always the looker itself.
//!
//! [`VisionCone`] is a plain value; each call to [`VisionCone::iter`]
//! starts a fresh, lazy walk over the map.

use zappy_types::{Orientation, PlayerId, Position};

use crate::error::WorldError;
use crate::map::Map;
use crate::world::World;

/// The tiles a player at `origin`, facing `orientation`, at `level` sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisionCone {
    origin: Position,
    orientation: Orientation,
    level: u8,
}

impl VisionCone {
    /// Describe a cone.
    pub const fn new(origin: Position, orientation: Orientation, level: u8) -> Self {
        Self {
            origin,
            orientation,
            level,
        }
    }

    /// Cone of an existing player.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlayerNotFound`] if no such player exists.
    pub fn of(world: &World, id: PlayerId) -> Result<Self, WorldError> {
        let p = world.player(id)?;
        Ok(Self::new(p.position, p.orientation, p.level))
    }

    /// Number of tiles in the cone: `(level + 1)^2`.
    pub fn len(&self) -> usize {
        let side = usize::from(self.level).saturating_add(1);
        side.saturating_mul(side)
    }

    /// Never true: ring 0 always exists.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Walk the cone's positions, nearest ring first.
    pub const fn iter<'a>(&self, map: &'a Map) -> VisionIter<'a> {
        VisionIter {
            map,
            cone: *self,
            ring: 0,
            lateral: 0,
        }
    }

    /// The `[tile0,tile1,...]` reply sent to the agent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if the origin was not wrapped.
    pub fn render(&self, map: &Map) -> Result<String, WorldError> {
        let mut parts = Vec::with_capacity(self.len());
        for pos in self.iter(map) {
            parts.push(map.tile(pos)?.describe());
        }
        Ok(format!("[{}]", parts.join(",")))
    }
}

/// Lazy iterator over a [`VisionCone`].
#[derive(Debug, Clone)]
pub struct VisionIter<'a> {
    map: &'a Map,
    cone: VisionCone,
    ring: i64,
    lateral: i64,
}

impl Iterator for VisionIter<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.ring > i64::from(self.cone.level) {
            return None;
        }
        let (fx, fy) = self.cone.orientation.delta();
        let (rx, ry) = self.cone.orientation.turn_right().delta();
        let offset = self.lateral.saturating_sub(self.ring);
        let dx = fx.saturating_mul(self.ring).saturating_add(rx.saturating_mul(offset));
        let dy = fy.saturating_mul(self.ring).saturating_add(ry.saturating_mul(offset));
        let pos = self.map.offset(self.cone.origin, dx, dy);

        // Ring r spans laterals 0..=2r.
        if self.lateral >= self.ring.saturating_mul(2) {
            self.ring = self.ring.saturating_add(1);
            self.lateral = 0;
        } else {
            self.lateral = self.lateral.saturating_add(1);
        }
        Some(pos)
    }
}
