// ── Action vocabularies ──
//
// `TaskAction` is the fixed vocabulary a pipeline host passes as a string;
// `ControlAction` is the subset that maps onto provider verbs.

use strum::{Display, EnumString};

use crate::error::CoreError;

/// A control verb invocable on a running site entry.
///
/// The `Display` form is the wire verb (`start`, `stop`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
    Pause,
    Continue,
}

/// The task-action vocabulary accepted from pipeline hosts.
///
/// Spelled exactly as the host passes them (`Create`, `CheckExists`, ...).
/// Anything else is a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TaskAction {
    Create,
    Delete,
    CheckExists,
    Start,
    Stop,
    Pause,
    Continue,
}

impl TaskAction {
    /// Parse a host-supplied action string, surfacing `InvalidAction` on
    /// anything outside the vocabulary.
    pub fn parse(action: &str) -> Result<Self, CoreError> {
        action.parse().map_err(|_| CoreError::InvalidAction {
            action: action.to_owned(),
        })
    }

    /// The control verb this action maps to, if it is a control action.
    pub fn control_action(self) -> Option<ControlAction> {
        match self {
            Self::Start => Some(ControlAction::Start),
            Self::Stop => Some(ControlAction::Stop),
            Self::Pause => Some(ControlAction::Pause),
            Self::Continue => Some(ControlAction::Continue),
            Self::Create | Self::Delete | Self::CheckExists => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_vocabulary() {
        for (input, expected) in [
            ("Create", TaskAction::Create),
            ("Delete", TaskAction::Delete),
            ("CheckExists", TaskAction::CheckExists),
            ("Start", TaskAction::Start),
            ("Stop", TaskAction::Stop),
            ("Pause", TaskAction::Pause),
            ("Continue", TaskAction::Continue),
        ] {
            assert_eq!(TaskAction::parse(input).unwrap(), expected);
        }
    }

    #[test]
    fn unknown_action_is_a_hard_error() {
        let err = TaskAction::parse("Recycle").unwrap_err();
        assert!(matches!(err, CoreError::InvalidAction { action } if action == "Recycle"));
    }

    #[test]
    fn control_verbs_are_lowercase_on_the_wire() {
        assert_eq!(ControlAction::Start.to_string(), "start");
        assert_eq!(ControlAction::Continue.to_string(), "continue");
    }
}
