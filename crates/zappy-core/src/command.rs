//! The two command grammars and the handshake token.
//!
//! Agents speak capitalised verbs (`Forward`, `Take food`), observers speak
//! three-letter lowercase mnemonics (`msz`, `bct 3 4`). A session's role
//! selects which grammar its lines are parsed with.

use zappy_types::{PlayerId, Resource};

/// First line an observer sends instead of a team name.
pub const OBSERVER_TOKEN: &str = "GRAPHIC";

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The verb is not part of the grammar.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// The verb is known but its arguments are not.
    #[error("bad parameters for {command}: {detail}")]
    BadParameters {
        /// The recognised verb.
        command: &'static str,
        /// What was wrong.
        detail: String,
    },
}

fn bad(command: &'static str, detail: impl Into<String>) -> ParseError {
    ParseError::BadParameters {
        command,
        detail: detail.into(),
    }
}

// ---------------------------------------------------------------------------
// Agent grammar
// ---------------------------------------------------------------------------

/// A command sent by an agent. Every variant becomes one scheduled action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    /// Step one tile ahead.
    Forward,
    /// Quarter turn clockwise.
    Right,
    /// Quarter turn counter-clockwise.
    Left,
    /// Describe the vision cone.
    Look,
    /// Report carried resources.
    Inventory,
    /// Shout a message to every other agent.
    Broadcast(String),
    /// Ask for the team's free slots.
    ConnectNbr,
    /// Lay an egg.
    Fork,
    /// Push everyone else off the tile.
    Eject,
    /// Pick up one unit.
    Take(Resource),
    /// Drop one unit.
    Set(Resource),
    /// Resolve a ritual.
    Incantation,
}

impl AgentCommand {
    /// Parse one agent line. Verbs match exactly; `Broadcast`, `Take` and
    /// `Set` are followed by a single space and their argument.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unknown`] for unknown verbs and
    /// [`ParseError::BadParameters`] for an empty broadcast or an unknown
    /// resource.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let simple = match line {
            "Forward" => Some(Self::Forward),
            "Right" => Some(Self::Right),
            "Left" => Some(Self::Left),
            "Look" => Some(Self::Look),
            "Inventory" => Some(Self::Inventory),
            "Connect_nbr" => Some(Self::ConnectNbr),
            "Fork" => Some(Self::Fork),
            "Eject" => Some(Self::Eject),
            "Incantation" => Some(Self::Incantation),
            _ => None,
        };
        if let Some(command) = simple {
            return Ok(command);
        }

        if let Some(text) = line.strip_prefix("Broadcast ") {
            if text.trim().is_empty() {
                return Err(bad("Broadcast", "empty message"));
            }
            return Ok(Self::Broadcast(text.to_owned()));
        }
        if let Some(arg) = line.strip_prefix("Take ") {
            return arg
                .parse()
                .map(Self::Take)
                .map_err(|e| bad("Take", e.to_string()));
        }
        if let Some(arg) = line.strip_prefix("Set ") {
            return arg
                .parse()
                .map(Self::Set)
                .map_err(|e| bad("Set", e.to_string()));
        }
        Err(ParseError::Unknown(line.to_owned()))
    }

    /// Delay in time units between acceptance and execution.
    pub const fn duration(&self) -> u64 {
        match self {
            Self::Forward
            | Self::Right
            | Self::Left
            | Self::Look
            | Self::Broadcast(_)
            | Self::Eject
            | Self::Take(_)
            | Self::Set(_) => 7,
            Self::Inventory => 1,
            Self::ConnectNbr => 0,
            Self::Fork => 42,
            Self::Incantation => 300,
        }
    }

    /// Protocol verb, for logs.
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Look => "Look",
            Self::Inventory => "Inventory",
            Self::Broadcast(_) => "Broadcast",
            Self::ConnectNbr => "Connect_nbr",
            Self::Fork => "Fork",
            Self::Eject => "Eject",
            Self::Take(_) => "Take",
            Self::Set(_) => "Set",
            Self::Incantation => "Incantation",
        }
    }
}

// ---------------------------------------------------------------------------
// Observer grammar
// ---------------------------------------------------------------------------

/// A request from an observer. Always answered synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverCommand {
    /// `msz`
    MapSize,
    /// `bct X Y`; coordinates are wrapped onto the map.
    TileContent {
        /// Column, any integer.
        x: i64,
        /// Row, any integer.
        y: i64,
    },
    /// `mct`
    MapContent,
    /// `tna`
    TeamNames,
    /// `ppo #n`
    PlayerPosition(PlayerId),
    /// `plv #n`
    PlayerLevel(PlayerId),
    /// `pin #n`
    PlayerInventory(PlayerId),
    /// `sgt`
    GetTimeUnit,
    /// `sst T`
    SetTimeUnit(u32),
}

fn player_arg(command: &'static str, token: Option<&str>) -> Result<PlayerId, ParseError> {
    let token = token.ok_or_else(|| bad(command, "missing player id"))?;
    token
        .strip_prefix('#')
        .unwrap_or(token)
        .parse::<u64>()
        .map(PlayerId)
        .map_err(|e| bad(command, format!("{token}: {e}")))
}

fn int_arg(command: &'static str, token: Option<&str>) -> Result<i64, ParseError> {
    let token = token.ok_or_else(|| bad(command, "missing argument"))?;
    token.parse().map_err(|e| bad(command, format!("{token}: {e}")))
}

impl ObserverCommand {
    /// Parse one observer line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unknown`] (answered `suc`) for unknown verbs
    /// and [`ParseError::BadParameters`] (answered `sbp`) for missing,
    /// extra or unparsable arguments.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let (command, name) = match verb {
            "msz" => (Self::MapSize, "msz"),
            "mct" => (Self::MapContent, "mct"),
            "tna" => (Self::TeamNames, "tna"),
            "sgt" => (Self::GetTimeUnit, "sgt"),
            "bct" => {
                let x = int_arg("bct", parts.next())?;
                let y = int_arg("bct", parts.next())?;
                (Self::TileContent { x, y }, "bct")
            }
            "ppo" => (Self::PlayerPosition(player_arg("ppo", parts.next())?), "ppo"),
            "plv" => (Self::PlayerLevel(player_arg("plv", parts.next())?), "plv"),
            "pin" => (Self::PlayerInventory(player_arg("pin", parts.next())?), "pin"),
            "sst" => {
                let t = int_arg("sst", parts.next())?;
                let t = u32::try_from(t)
                    .ok()
                    .filter(|t| *t > 0)
                    .ok_or_else(|| bad("sst", format!("{t} is not a positive frequency")))?;
                (Self::SetTimeUnit(t), "sst")
            }
            _ => return Err(ParseError::Unknown(line.to_owned())),
        };
        if parts.next().is_some() {
            return Err(bad(name, "unexpected extra arguments"));
        }
        Ok(command)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exact_agent_verbs() {
        assert_eq!(AgentCommand::parse("Forward").unwrap(), AgentCommand::Forward);
        assert_eq!(AgentCommand::parse("Connect_nbr").unwrap(), AgentCommand::ConnectNbr);
        assert!(matches!(AgentCommand::parse("forward"), Err(ParseError::Unknown(_))));
        assert!(matches!(AgentCommand::parse("Forward "), Err(ParseError::Unknown(_))));
        assert!(matches!(AgentCommand::parse(""), Err(ParseError::Unknown(_))));
    }

    #[test]
    fn prefixed_agent_verbs() {
        assert_eq!(
            AgentCommand::parse("Broadcast hello there").unwrap(),
            AgentCommand::Broadcast("hello there".to_owned())
        );
        assert_eq!(AgentCommand::parse("Take food").unwrap(), AgentCommand::Take(Resource::Food));
        assert_eq!(AgentCommand::parse("Set phiras").unwrap(), AgentCommand::Set(Resource::Phiras));
        assert!(matches!(AgentCommand::parse("Take gold"), Err(ParseError::BadParameters { .. })));
        assert!(matches!(AgentCommand::parse("Broadcast  "), Err(ParseError::BadParameters { .. })));
        assert!(matches!(AgentCommand::parse("Take"), Err(ParseError::Unknown(_))));
    }

    #[test]
    fn durations_match_table() {
        assert_eq!(AgentCommand::Forward.duration(), 7);
        assert_eq!(AgentCommand::Take(Resource::Food).duration(), 7);
        assert_eq!(AgentCommand::Inventory.duration(), 1);
        assert_eq!(AgentCommand::ConnectNbr.duration(), 0);
        assert_eq!(AgentCommand::Fork.duration(), 42);
        assert_eq!(AgentCommand::Incantation.duration(), 300);
    }

    #[test]
    fn observer_queries() {
        assert_eq!(ObserverCommand::parse("msz").unwrap(), ObserverCommand::MapSize);
        assert_eq!(
            ObserverCommand::parse("bct -1 12").unwrap(),
            ObserverCommand::TileContent { x: -1, y: 12 }
        );
        assert_eq!(ObserverCommand::parse("ppo #4").unwrap(), ObserverCommand::PlayerPosition(PlayerId(4)));
        assert_eq!(ObserverCommand::parse("pin 4").unwrap(), ObserverCommand::PlayerInventory(PlayerId(4)));
        assert_eq!(ObserverCommand::parse("sst 50").unwrap(), ObserverCommand::SetTimeUnit(50));
    }

    #[test]
    fn observer_errors_split_unknown_from_bad() {
        assert!(matches!(ObserverCommand::parse("xyz"), Err(ParseError::Unknown(_))));
        assert!(matches!(ObserverCommand::parse(""), Err(ParseError::Unknown(_))));
        for line in ["bct 1", "bct a b", "ppo #x", "plv", "sst 0", "sst -3", "msz 1"] {
            assert!(
                matches!(ObserverCommand::parse(line), Err(ParseError::BadParameters { .. })),
                "{line}"
            );
        }
    }
}
