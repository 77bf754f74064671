//! Type-safe identifier wrappers around integers.
//!
//! Sessions are numbered by the reactor in accept order. A player's id is
//! derived from the session that owns it, so the observer protocol's
//! `#n` always names the same connection. Eggs draw from their own
//! counter starting at zero.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`u64`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }

            /// Return the identifier that follows this one, or `None` on
            /// overflow.
            pub const fn next(self) -> Option<Self> {
                match self.0.checked_add(1) {
                    Some(n) => Some(Self(n)),
                    None => None,
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of one accepted TCP connection.
    SessionId
}

define_id! {
    /// Identifier of a player. Equal to the owning session's id.
    PlayerId
}

define_id! {
    /// Identifier of an egg, unique for the lifetime of the server.
    EggId
}

impl From<SessionId> for PlayerId {
    fn from(session: SessionId) -> Self {
        Self(session.0)
    }
}

impl From<PlayerId> for SessionId {
    fn from(player: PlayerId) -> Self {
        Self(player.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_follows_session_id() {
        let session = SessionId(7);
        let player = PlayerId::from(session);
        assert_eq!(player.into_inner(), 7);
        assert_eq!(SessionId::from(player), session);
    }

    #[test]
    fn next_stops_at_max() {
        assert_eq!(EggId(0).next(), Some(EggId(1)));
        assert_eq!(EggId(u64::MAX).next(), None);
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(PlayerId(42).to_string(), "42");
    }
}
