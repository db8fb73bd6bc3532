//! Ownership checks for hook groups.
//!
//! Two strengths on purpose: [`is_ours`] decides what prune may delete and
//! requires every action in a group to be ours; [`has_ours`] decides whether
//! merge should append and fires on a single action. A group that mixes a
//! user's command with ours therefore blocks re-insertion but is never
//! deleted. Anything malformed is "not ours".
use serde_json::Value;
use std::fmt;

fn action_is_ours(action: &Value, signature: &str) -> bool {
    !signature.is_empty()
        && action
            .get("command")
            .and_then(Value::as_str)
            .is_some_and(|cmd| cmd.contains(signature))
}

fn actions(group: &Value) -> Option<&Vec<Value>> {
    group.get("hooks").and_then(Value::as_array)
}

/// Strict: the group has at least one action and all of them are ours.
pub fn is_ours(group: &Value, signature: &str) -> bool {
    match actions(group) {
        Some(list) if !list.is_empty() => list.iter().all(|a| action_is_ours(a, signature)),
        _ => false,
    }
}

/// Loose, per group: at least one action is ours.
pub fn contains_ours(group: &Value, signature: &str) -> bool {
    actions(group).is_some_and(|list| list.iter().any(|a| action_is_ours(a, signature)))
}

/// Loose, per event list. Non-arrays have no entries.
pub fn has_ours(sequence: &Value, signature: &str) -> bool {
    sequence
        .as_array()
        .is_some_and(|groups| groups.iter().any(|g| contains_ours(g, signature)))
}

/// What an event's value looks like from our side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventState {
    /// A group made only of our actions is present.
    Installed,
    /// Our command only appears inside a group shared with other commands.
    Partial,
    Missing,
    /// The event key holds something other than a list.
    Malformed,
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventState::Installed => write!(f, "installed"),
            EventState::Partial => write!(f, "partial"),
            EventState::Missing => write!(f, "missing"),
            EventState::Malformed => write!(f, "malformed"),
        }
    }
}

pub fn classify(value: Option<&Value>, signature: &str) -> EventState {
    let Some(value) = value else {
        return EventState::Missing;
    };
    let Some(groups) = value.as_array() else {
        return EventState::Malformed;
    };
    if groups.iter().any(|g| is_ours(g, signature)) {
        EventState::Installed
    } else if groups.iter().any(|g| contains_ours(g, signature)) {
        EventState::Partial
    } else {
        EventState::Missing
    }
}
