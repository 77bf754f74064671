//! Team configuration.

/// A team as configured at boot. Read-only for the life of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Name agents send to join.
    pub name: String,
    /// Maximum number of live players of this team at once.
    pub capacity: u32,
}

impl Team {
    /// Create a team.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}
