//! Density-based resource top-up.
//!
//! Each resource has a target of `width * height * density / 100` units on
//! the map. A pass adds the missing units one at a time to uniformly random
//! tiles. Surplus is never removed, and units carried by players do not
//! count towards the target.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;
use zappy_types::{Position, Resource};

use crate::error::WorldError;
use crate::map::Map;

/// Target on-map count of `resource` for `map`.
pub fn target(map: &Map, resource: Resource) -> u64 {
    map.area().saturating_mul(resource.density()) / 100
}

/// Top every resource up to its target.
///
/// Returns the distinct tiles that received at least one unit, in
/// row-major order, so callers can announce each changed tile once.
///
/// # Errors
///
/// Returns [`WorldError::Types`] if a tile counter would overflow.
pub fn top_up<R: Rng + ?Sized>(map: &mut Map, rng: &mut R) -> Result<Vec<Position>, WorldError> {
    let totals = map.resource_totals();
    let mut touched = BTreeSet::new();
    for (resource, current) in Resource::ALL.into_iter().zip(totals) {
        let deficit = target(map, resource).saturating_sub(current);
        if deficit == 0 {
            continue;
        }
        for _ in 0..deficit {
            let pos = map.random_position(rng);
            map.tile_mut(pos)?.resources.add(resource, 1)?;
            touched.insert((pos.y, pos.x));
        }
        debug!(resource = %resource, added = deficit, "resources spawned");
    }
    Ok(touched.into_iter().map(|(y, x)| Position::new(x, y)).collect())
}
