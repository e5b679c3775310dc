//! Fake Telegram Bot API for handler tests (wiremock)

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use teloxide::types::{CallbackQuery, Message};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use donorbot::telegram::{Bot, HandlerDeps};
use donorcore::storage::{DonorStore, MemoryDonorStore, StoreError};
use donorcore::{BloodGroup, DonorRecord, FlowEngine, SessionStore};

pub const CHAT_ID: i64 = 123456789;
pub const USER_ID: u64 = 123456789;

/// Mock server plus a bot and handler deps wired to it
pub struct TelegramMock {
    pub server: MockServer,
    pub bot: Bot,
    pub deps: HandlerDeps,
}

impl TelegramMock {
    /// Harness over an empty in-memory store
    pub async fn start() -> (Self, Arc<MemoryDonorStore>) {
        let store = Arc::new(MemoryDonorStore::new());
        let mock = Self::with_store(store.clone()).await;
        (mock, store)
    }

    pub async fn with_store(store: Arc<dyn DonorStore>) -> Self {
        let server = MockServer::start().await;
        let bot = teloxide::Bot::new("test_token_12345:ABCDEF").set_api_url(server.uri().parse().unwrap());
        let deps = HandlerDeps::new(FlowEngine::new(store, Arc::new(SessionStore::new())));

        let mock = Self { server, bot, deps };
        mock.mount_default_responses().await;
        mock
    }

    async fn mount_default_responses(&self) {
        let send_msg = serde_json::json!({
            "ok": true,
            "result": {
                "message_id": 42,
                "from": { "id": 987654321, "is_bot": true, "first_name": "DonorBot", "username": "donor_bot" },
                "chat": { "id": CHAT_ID, "type": "private", "first_name": "Test" },
                "date": 1735992000,
                "text": "Response"
            }
        });
        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendmessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(send_msg))
            .mount(&self.server)
            .await;

        let ok_true = serde_json::json!({ "ok": true, "result": true });
        for api_method in ["answercallbackquery", "setmycommands", "deletewebhook"] {
            Mock::given(method("POST"))
                .and(path_regex(format!("(?i)/bot[^/]+/{}", api_method)))
                .respond_with(ResponseTemplate::new(200).set_body_json(ok_true.clone()))
                .mount(&self.server)
                .await;
        }
    }

    /// Lowercased Bot API method names of every request, in order
    pub async fn methods(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| r.url.path().rsplit('/').next().unwrap().to_lowercase())
            .collect()
    }

    /// JSON bodies of every request to `api_method` (case-insensitive), in order
    pub async fn bodies(&self, api_method: &str) -> Vec<serde_json::Value> {
        let wanted = api_method.to_lowercase();
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path().to_lowercase().ends_with(&format!("/{}", wanted)))
            .map(|r| serde_json::from_slice(&r.body).expect("body should be JSON"))
            .collect()
    }

    /// Texts of every sendMessage request, in order
    pub async fn sent_texts(&self) -> Vec<String> {
        self.bodies("sendMessage")
            .await
            .iter()
            .map(|b| b["text"].as_str().unwrap().to_string())
            .collect()
    }

    pub async fn reset(&self) {
        self.server.reset().await;
        self.mount_default_responses().await;
    }
}

/// Create a Message from JSON (more reliable than struct construction)
pub fn message(text: &str) -> Message {
    let json = serde_json::json!({
        "message_id": 1,
        "date": 1735992000,
        "chat": {
            "id": CHAT_ID,
            "type": "private",
            "first_name": "Test",
            "username": "testuser"
        },
        "from": {
            "id": USER_ID,
            "is_bot": false,
            "first_name": "Test",
            "username": "testuser",
            "language_code": "en"
        },
        "text": text
    });

    serde_json::from_value(json).expect("Failed to deserialize message")
}

/// Create a CallbackQuery from JSON, as if a selector button was pressed
pub fn callback(data: &str) -> CallbackQuery {
    let json = serde_json::json!({
        "id": "callback_123",
        "from": {
            "id": USER_ID,
            "is_bot": false,
            "first_name": "Test",
            "username": "testuser",
            "language_code": "en"
        },
        "message": {
            "message_id": 42,
            "date": 1735992000,
            "chat": {
                "id": CHAT_ID,
                "type": "private",
                "first_name": "Test",
                "username": "testuser"
            },
            "from": {
                "id": 987654321,
                "is_bot": true,
                "first_name": "DonorBot",
                "username": "donor_bot"
            },
            "text": "🩸 Please select your blood group:"
        },
        "chat_instance": "chat_instance_123",
        "data": data
    });

    serde_json::from_value(json).expect("Failed to deserialize callback")
}

pub fn donor(name: &str, group: BloodGroup, location: &str) -> DonorRecord {
    DonorRecord {
        name: name.to_string(),
        phone: "+1 555 0100".to_string(),
        email: format!("{}@example.org", name.to_lowercase()),
        location: location.to_string(),
        blood_group: group,
        user_id: 555,
        registered_at: Utc::now(),
    }
}

/// A store whose database has gone away
pub struct FailingStore;

#[async_trait]
impl DonorStore for FailingStore {
    async fn insert(&self, _record: DonorRecord) -> Result<(), StoreError> {
        Err(StoreError::Database(rusqlite::Error::InvalidQuery))
    }

    async fn find_by_group(&self, _group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError> {
        Err(StoreError::Database(rusqlite::Error::InvalidQuery))
    }

    async fn find_by_group_and_location(
        &self,
        _group: BloodGroup,
        _location: &str,
    ) -> Result<Vec<DonorRecord>, StoreError> {
        Err(StoreError::Database(rusqlite::Error::InvalidQuery))
    }
}
