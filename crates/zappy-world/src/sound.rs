//! Direction a sound or a push arrives from, as heard by a player.
//!
//! Directions are numbered on an eight-sector compass relative to the
//! listener's facing: 1 is straight ahead, then counter-clockwise
//! (2 front-left, 3 left, 4 back-left, 5 behind, 6 back-right, 7 right,
//! 8 front-right). 0 means the source is on the listener's own tile.
//!
//! All math is integer. A vector lies on an axis sector when its minor
//! component is below `tan(22.5°)` times its major component.

use zappy_types::{Orientation, Position};

use crate::map::Map;

/// `tan(22.5°)` scaled by [`TAN_SCALE`].
const TAN_22_5: i64 = 414_214;

/// Fixed-point scale for [`TAN_22_5`].
const TAN_SCALE: i64 = 1_000_000;

/// Signed shortest displacement from `from` to `to` along one axis of
/// length `len`. Ties resolve to the positive direction.
fn shortest(from: u32, to: u32, len: u32) -> i64 {
    let len = i64::from(len);
    let raw = i64::from(to).saturating_sub(i64::from(from)).rem_euclid(len);
    if raw.saturating_mul(2) > len {
        raw.saturating_sub(len)
    } else {
        raw
    }
}

/// Sector of a world-frame vector `(dx, dy)` as seen by a listener facing
/// `facing`. `(0, 0)` maps to 0.
pub fn sector(dx: i64, dy: i64, facing: Orientation) -> u8 {
    if dx == 0 && dy == 0 {
        return 0;
    }
    let (fx, fy) = facing.delta();
    let (rx, ry) = facing.turn_right().delta();
    let ahead = dx.saturating_mul(fx).saturating_add(dy.saturating_mul(fy));
    let left = dx
        .saturating_mul(rx)
        .saturating_add(dy.saturating_mul(ry))
        .saturating_neg();

    let a = ahead.saturating_abs().saturating_mul(TAN_SCALE);
    let l = left.saturating_abs().saturating_mul(TAN_SCALE);
    let ahead_axis = l < ahead.saturating_abs().saturating_mul(TAN_22_5);
    let left_axis = a < left.saturating_abs().saturating_mul(TAN_22_5);

    match (ahead_axis, left_axis) {
        (true, _) if ahead > 0 => 1,
        (true, _) => 5,
        (_, true) if left > 0 => 3,
        (_, true) => 7,
        _ => match (ahead > 0, left > 0) {
            (true, true) => 2,
            (false, true) => 4,
            (false, false) => 6,
            (true, false) => 8,
        },
    }
}

/// Sector from which a broadcast emitted at `source` reaches a listener at
/// `listener` facing `facing`, along the shortest toroidal path.
pub fn broadcast_direction(map: &Map, source: Position, listener: Position, facing: Orientation) -> u8 {
    let dx = shortest(listener.x, source.x, map.width());
    let dy = shortest(listener.y, source.y, map.height());
    sector(dx, dy, facing)
}

/// Sector an ejected player reports: the side the push came from. The
/// pusher stands one step behind the push direction.
pub fn push_direction(push: Orientation, facing: Orientation) -> u8 {
    let (dx, dy) = push.reverse().delta();
    sector(dx, dy, facing)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn same_tile_is_zero() {
        let map = Map::new(10, 10).unwrap();
        let p = Position::new(3, 3);
        assert_eq!(broadcast_direction(&map, p, p, Orientation::East), 0);
    }

    #[test]
    fn axis_sectors_facing_north() {
        assert_eq!(sector(0, -3, Orientation::North), 1);
        assert_eq!(sector(-2, 0, Orientation::North), 3);
        assert_eq!(sector(0, 4, Orientation::North), 5);
        assert_eq!(sector(1, 0, Orientation::North), 7);
    }

    #[test]
    fn diagonal_sectors_facing_north() {
        assert_eq!(sector(-1, -1, Orientation::North), 2);
        assert_eq!(sector(-1, 1, Orientation::North), 4);
        assert_eq!(sector(1, 1, Orientation::North), 6);
        assert_eq!(sector(1, -1, Orientation::North), 8);
    }

    #[test]
    fn listener_rotation_shifts_sectors() {
        // Source due north of a listener facing east is on its left.
        assert_eq!(sector(0, -1, Orientation::East), 3);
        // Facing south it is behind.
        assert_eq!(sector(0, -1, Orientation::South), 5);
        // Facing west it is on the right.
        assert_eq!(sector(0, -1, Orientation::West), 7);
    }

    #[test]
    fn shallow_angles_snap_to_axis() {
        assert_eq!(sector(-1, -5, Orientation::North), 1);
        assert_eq!(sector(-2, -3, Orientation::North), 2);
    }

    #[test]
    fn broadcast_takes_the_short_way_round() {
        let map = Map::new(10, 10).unwrap();
        // Source at x=9, listener at x=0: one step west across the seam.
        let dir = broadcast_direction(&map, Position::new(9, 5), Position::new(0, 5), Orientation::North);
        assert_eq!(dir, 3);
    }

    #[test]
    fn pushed_player_hears_the_pusher_side() {
        // Pushed north while facing north: the push came from behind.
        assert_eq!(push_direction(Orientation::North, Orientation::North), 5);
        // Pushed east while facing north: the pusher was on the left.
        assert_eq!(push_direction(Orientation::East, Orientation::North), 3);
    }
}
