//! Notification rules — predicates over snapshots paired with message templates.
//!
//! A rule fires when the snapshot's presence matches exactly and every filter
//! the rule sets (game type, mode, map) equals the snapshot's corresponding
//! field. An unset filter matches anything. Rules never fail on valid input:
//! evaluation is a pure function of (rule, snapshot).

use crate::types::Snapshot;
use serde::{Deserialize, Serialize};

/// A single notification rule.
///
/// The message template supports the placeholders `{uuid}`, `{gametype}`,
/// `{mode}` and `{map}`; fields absent from the snapshot render as empty
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Message template rendered when the rule matches.
    pub message_format: String,
    /// Required presence state.
    pub online: bool,
    /// Optional game-type filter (database id, see [`crate::games`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    /// Optional game-mode filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<String>,
    /// Optional game-map filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_map: Option<String>,
}

impl Rule {
    /// Match-any rule for a presence state, with no activity filters.
    pub fn fallback(message_format: impl Into<String>, online: bool) -> Self {
        Self {
            message_format: message_format.into(),
            online,
            game_type: None,
            game_mode: None,
            game_map: None,
        }
    }

    /// Evaluate this rule against a snapshot.
    ///
    /// Returns the rendered message if the snapshot passes, otherwise `None`.
    pub fn consume(&self, status: &Snapshot) -> Option<String> {
        if self.online != status.online() {
            return None;
        }
        if !filter_matches(self.game_type.as_deref(), status.game_type()) {
            return None;
        }
        if !filter_matches(self.game_mode.as_deref(), status.mode()) {
            return None;
        }
        if !filter_matches(self.game_map.as_deref(), status.map()) {
            return None;
        }

        Some(render(&self.message_format, status))
    }
}

/// An unset filter matches any value; a set filter must equal the field.
fn filter_matches(filter: Option<&str>, field: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(want) => field == Some(want),
    }
}

/// Render a message template, substituting absent fields as empty strings.
///
/// Unknown placeholders are left verbatim; rendering never fails.
fn render(template: &str, status: &Snapshot) -> String {
    template
        .replace("{uuid}", status.uuid())
        .replace("{gametype}", status.game_type().unwrap_or(""))
        .replace("{mode}", status.mode().unwrap_or(""))
        .replace("{map}", status.map().unwrap_or(""))
}

/// Ordered, short-circuiting sequence of rules.
///
/// Order is semantic: overlapping rules are layered most-specific-first so a
/// generic fallback only fires when nothing more specific matched. Built once
/// at startup, immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Pass a snapshot through the chain in configured order.
    ///
    /// Returns the first matching rule's message; rules after the first match
    /// are not evaluated.
    pub fn dispatch(&self, status: &Snapshot) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.consume(status))
    }
}
