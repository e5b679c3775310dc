//! The conversation state machine

use std::sync::Arc;

use super::draft::{Draft, RegistrationAdvance, RegistrationDraft, SearchDraft};
use super::reply::{self, Reply};
use super::sessions::SessionStore;
use super::tag::CallbackAction;
use super::texts;
use crate::storage::{DonorStore, StoreError};

/// Drives registration and search flows for every user.
///
/// All state changes for a user happen under that user's session lock, the
/// store call that finishes a flow included. A failed store call leaves the
/// draft exactly as it was so the user can simply resend the answer.
#[derive(Clone)]
pub struct FlowEngine {
    store: Arc<dyn DonorStore>,
    sessions: Arc<SessionStore>,
}

impl FlowEngine {
    pub fn new(store: Arc<dyn DonorStore>, sessions: Arc<SessionStore>) -> Self {
        Self { store, sessions }
    }

    pub fn store(&self) -> &Arc<dyn DonorStore> {
        &self.store
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Starts the flow a blood group button belongs to.
    ///
    /// Any draft the user already had, from either flow, is replaced.
    pub async fn select_group(&self, user_id: i64, action: CallbackAction) -> Reply {
        let draft = match action {
            CallbackAction::SearchGroupSelected(group) => Draft::Search(SearchDraft::new(group)),
            CallbackAction::RegisterGroupSelected(group) => Draft::Registration(RegistrationDraft::new(group)),
        };
        let prompt = draft.prompt();

        if let Some(previous) = self.sessions.set(user_id, draft).await {
            log::info!(
                "User {} switched flows, dropping {} draft for {}",
                user_id,
                draft_kind(&previous),
                previous.blood_group()
            );
        }
        log::info!("User {} started {:?} for {}", user_id, action.flow(), action.blood_group());

        Reply::text(prompt)
    }

    /// Feeds a free-text message to the user's active flow.
    ///
    /// # Returns
    /// * `Ok(None)` - the user has no active flow; the store is not touched
    /// * `Ok(Some(reply))` - the flow advanced, finished, or re-asked a blank answer
    /// * `Err(StoreError)` - the finishing store call failed; the draft is unchanged
    pub async fn handle_text(&self, user_id: i64, text: &str) -> Result<Option<Reply>, StoreError> {
        let mut slot = self.sessions.lock(user_id).await;
        let Some(draft) = slot.clone() else {
            return Ok(None);
        };

        let answer = text.trim();
        if answer.is_empty() {
            return Ok(Some(Reply::text(draft.prompt())));
        }

        match draft {
            Draft::Registration(registration) => match registration.advance(answer, user_id) {
                RegistrationAdvance::Next(next) => {
                    let prompt = next.step.prompt();
                    *slot = Some(Draft::Registration(next));
                    Ok(Some(Reply::text(prompt)))
                }
                RegistrationAdvance::Complete(record) => {
                    let group = record.blood_group;
                    self.store.insert(record).await?;
                    *slot = None;
                    log::info!("User {} registered as a {} donor", user_id, group);
                    Ok(Some(Reply::text(texts::REGISTERED)))
                }
            },
            Draft::Search(search) => {
                let donors = self
                    .store
                    .find_by_group_and_location(search.blood_group, answer)
                    .await?;
                *slot = None;
                log::info!(
                    "User {} searched {} in {:?}: {} donor(s)",
                    user_id,
                    search.blood_group,
                    answer,
                    donors.len()
                );
                Ok(Some(reply::search_results(search.blood_group, answer, &donors)))
            }
        }
    }

    /// Abandons the user's active flow, returning the dropped draft.
    pub async fn cancel(&self, user_id: i64) -> Option<Draft> {
        let dropped = self.sessions.delete(user_id).await;
        if let Some(draft) = &dropped {
            log::info!("User {} abandoned {} draft", user_id, draft_kind(draft));
        }
        dropped
    }
}

fn draft_kind(draft: &Draft) -> &'static str {
    match draft {
        Draft::Registration(_) => "registration",
        Draft::Search(_) => "search",
    }
}
