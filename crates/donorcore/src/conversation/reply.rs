//! Transport-neutral replies

use itertools::Itertools;

use super::tag::{CallbackAction, Flow};
use super::texts;
use crate::core::config::telegram::BUTTONS_PER_ROW;
use crate::donor::{BloodGroup, DonorRecord};

/// A button on an option keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyButton {
    pub label: String,
    pub tag: String,
}

/// What the bot should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text message
    Text(String),
    /// Text with an inline keyboard, `rows` in display order
    Options { text: String, rows: Vec<Vec<ReplyButton>> },
    /// Search results. The transport may split between blocks but never
    /// inside one.
    Donors { header: String, blocks: Vec<String> },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// The full text content, with donor blocks joined.
    pub fn content(&self) -> String {
        match self {
            Reply::Text(text) | Reply::Options { text, .. } => text.clone(),
            Reply::Donors { header, blocks } => format!("{}{}", header, blocks.iter().join("")),
        }
    }
}

/// The eight-button blood group selector for `flow`, two buttons per row.
pub fn blood_group_selector(flow: Flow) -> Reply {
    let text = match flow {
        Flow::Search => texts::SELECT_GROUP_TO_FIND,
        Flow::Registration => texts::SELECT_GROUP_TO_REGISTER,
    };

    let rows = BloodGroup::all()
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|group| ReplyButton {
                    label: group.label().to_string(),
                    tag: CallbackAction::new(flow, *group).tag(),
                })
                .collect()
        })
        .collect();

    Reply::Options {
        text: text.to_string(),
        rows,
    }
}

/// Reply for a finished search; `donors` keep the store's order.
pub fn search_results(group: BloodGroup, location: &str, donors: &[DonorRecord]) -> Reply {
    if donors.is_empty() {
        return Reply::Text(texts::no_donors_found(group, location));
    }

    Reply::Donors {
        header: texts::results_header(group, location),
        blocks: donors.iter().map(texts::donor_block).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_selector_layout() {
        let Reply::Options { text, rows } = blood_group_selector(Flow::Search) else {
            panic!("selector must carry options");
        };
        assert_eq!(text, texts::SELECT_GROUP_TO_FIND);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 2));

        let labels: Vec<&str> = rows.iter().flatten().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]);
        assert_eq!(rows[2][1].tag, "blood_AB-");
    }

    #[test]
    fn test_registration_selector_tags() {
        let Reply::Options { text, rows } = blood_group_selector(Flow::Registration) else {
            panic!("selector must carry options");
        };
        assert_eq!(text, texts::SELECT_GROUP_TO_REGISTER);
        assert!(rows.iter().flatten().all(|b| b.tag == format!("register_blood_{}", b.label)));
    }

    #[test]
    fn test_search_results_empty() {
        let reply = search_results(BloodGroup::OPositive, "Springfield", &[]);
        assert_eq!(
            reply,
            Reply::Text("❌ No blood donors found for O+ blood group in Springfield.".to_string())
        );
    }

    #[test]
    fn test_search_results_one_block_per_donor() {
        let donors: Vec<DonorRecord> = ["Ann", "Bob"]
            .iter()
            .map(|name| DonorRecord {
                name: name.to_string(),
                phone: "555".to_string(),
                email: "x@example.org".to_string(),
                location: "Springfield".to_string(),
                blood_group: BloodGroup::OPositive,
                user_id: 7,
                registered_at: Utc::now(),
            })
            .collect();

        let reply = search_results(BloodGroup::OPositive, "spring", &donors);
        let Reply::Donors { header, blocks } = &reply else {
            panic!("expected donor list");
        };
        assert_eq!(header, "📋 Available blood donors for O+ in spring:\n\n");
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("👤 Name: Ann\n"));
        assert!(blocks[1].contains("📍 Location: Springfield"));
        assert!(reply.content().find("Ann").unwrap() < reply.content().find("Bob").unwrap());
    }

    #[test]
    fn test_long_search_term_stays_under_message_limit() {
        use crate::core::config::telegram::MAX_MESSAGE_LEN;

        let term = "x".repeat(4090);
        let reply = search_results(BloodGroup::OPositive, &term, &[]);
        let Reply::Text(text) = &reply else {
            panic!("expected a plain text reply");
        };
        assert!(text.encode_utf16().count() <= MAX_MESSAGE_LEN);
        assert!(text.starts_with("❌ No blood donors found for O+ blood group in xxx"));

        assert!(texts::results_header(BloodGroup::OPositive, &term).encode_utf16().count() < 200);
    }
}
