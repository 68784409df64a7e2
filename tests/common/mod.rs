#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use httpmock::MockServer;
use reefstars_client::{
    ClientConfig, ClientConfigBuilder, MemoryStorage, Notice, NoticeKind, Notifier, ReefStars,
    SessionStorage, User,
};
use serde_json::{json, Value};

/// Keeps everything the client asked the UI to do.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.kind == NoticeKind::Error)
            .map(|notice| notice.message)
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.kind == NoticeKind::Success)
            .map(|notice| notice.message)
            .collect()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn redirect_to_login(&self, login_path: &str) {
        self.redirects.lock().unwrap().push(login_path.to_string());
    }
}

pub fn config(server: &MockServer) -> ClientConfigBuilder {
    ClientConfig::builder()
        .base_url(server.url("/api"))
        .timeout(Duration::from_secs(2))
        .notify_server_on_logout(false)
}

pub fn client_with(config: ClientConfigBuilder) -> (ReefStars, Arc<RecordingNotifier>) {
    client_with_storage(config, MemoryStorage::new())
}

pub fn client_with_storage(
    config: ClientConfigBuilder,
    storage: impl SessionStorage + 'static,
) -> (ReefStars, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ReefStars::new(config.build().unwrap(), storage)
        .unwrap()
        .with_notifier(notifier.clone());

    (client, notifier)
}

pub fn client(server: &MockServer) -> (ReefStars, Arc<RecordingNotifier>) {
    client_with(config(server))
}

pub fn user_json(id: &str, full_name: &str) -> Value {
    json!({
        "id": id,
        "fullName": full_name,
        "email": "a@x.com",
        "phone": "+62 361 000",
        "createdAt": "2024-03-01T10:00:00Z"
    })
}

pub fn user(id: &str, full_name: &str) -> User {
    User::from_value(user_json(id, full_name)).unwrap()
}

/// Puts a valid session in storage, the way a previous run would have left it.
pub fn seed_session(client: &ReefStars, token: &str, user: &User) {
    client
        .storage()
        .set_many(&[
            ("token", token),
            ("user", &serde_json::to_string(user).unwrap()),
        ])
        .unwrap();
}

pub fn auth_response(token: &str, user: Value) -> Value {
    json!({
        "success": true,
        "token": token,
        "data": { "user": user }
    })
}
