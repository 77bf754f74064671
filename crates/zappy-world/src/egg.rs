//! Eggs: spawn points laid by `Fork` and claimed by joining agents.
//!
//! An egg's state only moves forward:
//!
//! ```text
//! Laid ──► Hatched ──► Connected
//!   │         │
//!   └──► Dead ◄┘
//! ```

use zappy_types::{EggId, PlayerId, Position};

use crate::error::WorldError;

/// Lifecycle state of an egg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggState {
    /// On the ground, waiting.
    Laid,
    /// Hatched but not yet bound to a session.
    Hatched,
    /// Bound to a joining agent. Terminal.
    Connected,
    /// Destroyed before anyone claimed it. Terminal.
    Dead,
}

impl EggState {
    /// Whether `next` is a legal successor of this state.
    pub const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Laid, Self::Hatched | Self::Dead) | (Self::Hatched, Self::Connected | Self::Dead)
        )
    }
}

/// An egg in the world roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Egg {
    /// Unique id.
    pub id: EggId,
    /// Team that may claim it.
    pub team: String,
    /// Spawn tile, fixed at laying time.
    pub position: Position,
    /// Player that laid it, if any.
    pub parent: Option<PlayerId>,
    state: EggState,
}

impl Egg {
    /// A freshly laid egg.
    pub fn new(id: EggId, team: impl Into<String>, position: Position, parent: Option<PlayerId>) -> Self {
        Self {
            id,
            team: team.into(),
            position,
            parent,
            state: EggState::Laid,
        }
    }

    /// Current state.
    pub const fn state(&self) -> EggState {
        self.state
    }

    /// Whether a joining agent of the egg's team may take it over.
    pub const fn is_claimable(&self) -> bool {
        matches!(self.state, EggState::Laid | EggState::Hatched)
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidEggTransition`] if `next` is not a
    /// forward step from the current state.
    pub const fn transition(&mut self, next: EggState) -> Result<(), WorldError> {
        if !self.state.can_become(next) {
            return Err(WorldError::InvalidEggTransition {
                egg: self.id,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn egg() -> Egg {
        Egg::new(EggId(0), "red", Position::new(1, 1), None)
    }

    #[test]
    fn hatch_then_connect() {
        let mut e = egg();
        assert!(e.is_claimable());
        e.transition(EggState::Hatched).unwrap();
        assert!(e.is_claimable());
        e.transition(EggState::Connected).unwrap();
        assert!(!e.is_claimable());
    }

    #[test]
    fn no_backward_transitions() {
        let mut e = egg();
        e.transition(EggState::Hatched).unwrap();
        let err = e.transition(EggState::Laid).unwrap_err();
        assert_eq!(
            err,
            WorldError::InvalidEggTransition {
                egg: EggId(0),
                from: EggState::Hatched,
                to: EggState::Laid,
            }
        );
        assert_eq!(e.state(), EggState::Hatched);
    }

    #[test]
    fn terminal_states_stay_put() {
        let mut e = egg();
        e.transition(EggState::Dead).unwrap();
        assert!(e.transition(EggState::Hatched).is_err());
        assert!(e.transition(EggState::Connected).is_err());
    }

    #[test]
    fn laid_cannot_skip_to_connected() {
        let mut e = egg();
        assert!(e.transition(EggState::Connected).is_err());
    }
}
