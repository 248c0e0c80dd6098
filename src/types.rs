//! Snapshot model — one player's observed presence at a point in time.
//!
//! Snapshots are immutable once constructed and compare by semantic fields
//! only: the capture timestamp is excluded from equality so that two polls
//! observing the same remote state never count as a transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity fields of an online player's session.
///
/// The Hypixel `/status` endpoint omits any of these keys depending on what
/// the player is doing; an offline session carries none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Game type identifier (e.g. "SKYBLOCK", "BEDWARS"). See [`crate::games`].
    #[serde(rename = "gameType", skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    /// Mode within the game (e.g. "dynamic" for a SkyBlock private island).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Map the player is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
}

/// Whether the player is on the network, and what they are doing if so.
///
/// Offline players have no activity fields by construction, so "offline with
/// a game type" is unrepresentable rather than a lookup miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    Online(Session),
    Offline,
}

/// Immutable observation of one player's presence.
///
/// Created fresh on every successful poll; superseded, never mutated, when a
/// newer snapshot for the same player is cached.
#[derive(Debug, Clone)]
pub struct Snapshot {
    uuid: String,
    presence: Presence,
    captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot captured now. The uuid must be non-empty; no other
    /// validation is performed.
    pub fn new(uuid: impl Into<String>, presence: Presence) -> Option<Self> {
        let uuid = uuid.into();
        if uuid.is_empty() {
            return None;
        }
        Some(Self {
            uuid,
            presence,
            captured_at: Utc::now(),
        })
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn online(&self) -> bool {
        matches!(self.presence, Presence::Online(_))
    }

    /// Game type if the player is online and in a game.
    pub fn game_type(&self) -> Option<&str> {
        self.session().and_then(|s| s.game_type.as_deref())
    }

    /// Game mode if the player is online and the session reports one.
    pub fn mode(&self) -> Option<&str> {
        self.session().and_then(|s| s.mode.as_deref())
    }

    /// Map if the player is online and the session reports one.
    pub fn map(&self) -> Option<&str> {
        self.session().and_then(|s| s.map.as_deref())
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    fn session(&self) -> Option<&Session> {
        match &self.presence {
            Presence::Online(session) => Some(session),
            Presence::Offline => None,
        }
    }
}

// Equality is semantic: uuid + presence, never the capture timestamp.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.presence == other.presence
    }
}

impl Eq for Snapshot {}
