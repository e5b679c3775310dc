//! In-progress flow state
//!
//! Each step variant carries exactly the fields collected before it, so a
//! draft can never claim a step without the data that step depends on.

use chrono::Utc;

use super::texts;
use crate::donor::{BloodGroup, DonorRecord};

/// Registration progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStep {
    AwaitingName,
    AwaitingPhone { name: String },
    AwaitingEmail { name: String, phone: String },
    AwaitingLocation { name: String, phone: String, email: String },
}

impl RegistrationStep {
    /// The question asked while waiting on this step
    pub fn prompt(&self) -> &'static str {
        match self {
            RegistrationStep::AwaitingName => texts::ASK_NAME,
            RegistrationStep::AwaitingPhone { .. } => texts::ASK_PHONE,
            RegistrationStep::AwaitingEmail { .. } => texts::ASK_EMAIL,
            RegistrationStep::AwaitingLocation { .. } => texts::ASK_DONOR_LOCATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub blood_group: BloodGroup,
    pub step: RegistrationStep,
}

/// Result of feeding one answer to a registration draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationAdvance {
    /// More answers are needed
    Next(RegistrationDraft),
    /// All fields collected
    Complete(DonorRecord),
}

impl RegistrationDraft {
    pub fn new(blood_group: BloodGroup) -> Self {
        Self {
            blood_group,
            step: RegistrationStep::AwaitingName,
        }
    }

    /// Records `answer` for the current step.
    ///
    /// Leaves `self` untouched so the caller can keep the old draft if
    /// storing the finished record fails.
    pub fn advance(&self, answer: &str, user_id: i64) -> RegistrationAdvance {
        let answer = answer.to_string();
        let step = match &self.step {
            RegistrationStep::AwaitingName => RegistrationStep::AwaitingPhone { name: answer },
            RegistrationStep::AwaitingPhone { name } => RegistrationStep::AwaitingEmail {
                name: name.clone(),
                phone: answer,
            },
            RegistrationStep::AwaitingEmail { name, phone } => RegistrationStep::AwaitingLocation {
                name: name.clone(),
                phone: phone.clone(),
                email: answer,
            },
            RegistrationStep::AwaitingLocation { name, phone, email } => {
                return RegistrationAdvance::Complete(DonorRecord {
                    name: name.clone(),
                    phone: phone.clone(),
                    email: email.clone(),
                    location: answer,
                    blood_group: self.blood_group,
                    user_id,
                    registered_at: Utc::now(),
                });
            }
        };

        RegistrationAdvance::Next(RegistrationDraft {
            blood_group: self.blood_group,
            step,
        })
    }
}

/// Search waits for a single answer, the location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDraft {
    pub blood_group: BloodGroup,
}

impl SearchDraft {
    pub fn new(blood_group: BloodGroup) -> Self {
        Self { blood_group }
    }

    pub fn prompt(&self) -> &'static str {
        texts::ASK_SEARCH_LOCATION
    }
}

/// A user's unfinished flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Registration(RegistrationDraft),
    Search(SearchDraft),
}

impl Draft {
    pub fn blood_group(&self) -> BloodGroup {
        match self {
            Draft::Registration(draft) => draft.blood_group,
            Draft::Search(draft) => draft.blood_group,
        }
    }

    /// The question the user is currently expected to answer
    pub fn prompt(&self) -> &'static str {
        match self {
            Draft::Registration(draft) => draft.step.prompt(),
            Draft::Search(draft) => draft.prompt(),
        }
    }
}
