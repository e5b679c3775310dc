//! Callback tags carried by the blood group selector buttons
//!
//! Search buttons carry `blood_<GROUP>`, registration buttons carry
//! `register_blood_<GROUP>`, e.g. `register_blood_AB-`.

use std::str::FromStr;

use crate::donor::BloodGroup;

pub const SEARCH_PREFIX: &str = "blood_";
pub const REGISTER_PREFIX: &str = "register_blood_";

/// Which flow a selector belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Search,
    Registration,
}

/// A blood group button press, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    SearchGroupSelected(BloodGroup),
    RegisterGroupSelected(BloodGroup),
}

impl CallbackAction {
    pub fn new(flow: Flow, group: BloodGroup) -> Self {
        match flow {
            Flow::Search => CallbackAction::SearchGroupSelected(group),
            Flow::Registration => CallbackAction::RegisterGroupSelected(group),
        }
    }

    /// Decodes a callback tag. Returns `None` for anything that is not one
    /// of ours, including a known prefix followed by an unknown group.
    pub fn parse(tag: &str) -> Option<Self> {
        if let Some(group) = tag.strip_prefix(REGISTER_PREFIX) {
            return BloodGroup::from_str(group).ok().map(CallbackAction::RegisterGroupSelected);
        }
        if let Some(group) = tag.strip_prefix(SEARCH_PREFIX) {
            return BloodGroup::from_str(group).ok().map(CallbackAction::SearchGroupSelected);
        }
        None
    }

    /// The tag string put on the button.
    pub fn tag(&self) -> String {
        match self {
            CallbackAction::SearchGroupSelected(group) => format!("{}{}", SEARCH_PREFIX, group.label()),
            CallbackAction::RegisterGroupSelected(group) => format!("{}{}", REGISTER_PREFIX, group.label()),
        }
    }

    pub fn flow(&self) -> Flow {
        match self {
            CallbackAction::SearchGroupSelected(_) => Flow::Search,
            CallbackAction::RegisterGroupSelected(_) => Flow::Registration,
        }
    }

    pub fn blood_group(&self) -> BloodGroup {
        match self {
            CallbackAction::SearchGroupSelected(group) | CallbackAction::RegisterGroupSelected(group) => *group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_tag() {
        assert_eq!(
            CallbackAction::parse("blood_AB-"),
            Some(CallbackAction::SearchGroupSelected(BloodGroup::AbNegative))
        );
    }

    #[test]
    fn test_register_tag() {
        assert_eq!(
            CallbackAction::parse("register_blood_AB-"),
            Some(CallbackAction::RegisterGroupSelected(BloodGroup::AbNegative))
        );
    }

    #[test]
    fn test_every_button_tag_parses_back() {
        for group in BloodGroup::all() {
            for flow in [Flow::Search, Flow::Registration] {
                let action = CallbackAction::new(flow, group);
                assert_eq!(CallbackAction::parse(&action.tag()), Some(action));
                assert_eq!(action.flow(), flow);
                assert_eq!(action.blood_group(), group);
            }
        }
    }

    #[test]
    fn test_unknown_tags() {
        for tag in ["", "blood_", "blood_C+", "register_blood_", "register_AB-", "mode:settings", "BLOOD_A+"] {
            assert_eq!(CallbackAction::parse(tag), None, "tag {:?}", tag);
        }
    }

    #[test]
    fn test_tags_fit_telegram_callback_limit() {
        for group in BloodGroup::all() {
            assert!(CallbackAction::RegisterGroupSelected(group).tag().len() <= 64);
        }
    }
}
