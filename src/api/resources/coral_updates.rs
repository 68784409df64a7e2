use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::list::ListRequest;
use crate::api::segment;
use crate::error::RequestError;
use crate::ReefStars;

/// The `/coral-updates` endpoints: field reports on a reef star's health.
pub struct CoralUpdatesApi<'a> {
    client: &'a ReefStars,
}

#[derive(Serialize)]
struct Comment<'a> {
    text: &'a str,
}

impl ReefStars {
    /// Access to the `/coral-updates` endpoints.
    #[must_use]
    pub const fn coral_updates(&self) -> CoralUpdatesApi<'_> {
        CoralUpdatesApi { client: self }
    }
}

impl<'a> CoralUpdatesApi<'a> {
    /// Updates posted for one reef star.
    pub fn for_reef_star<T: DeserializeOwned>(&self, reef_star_id: &str) -> ListRequest<'a, T> {
        ListRequest::new(
            self.client,
            format!("/coral-updates/reefstar/{}", segment(reef_star_id)),
        )
    }

    /// Latest updates across the platform.
    pub fn recent<T: DeserializeOwned>(&self) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/coral-updates/recent".to_string())
    }

    /// Fetch a single update.
    pub async fn get_one<T: DeserializeOwned>(&self, id: &str) -> Result<T, RequestError> {
        let path = format!("/coral-updates/{}", segment(id));
        let request = self.client.request_get(&path, &[]);

        self.client.send_data(request).await
    }

    /// Like or unlike an update. Returns the server's view of the update.
    pub async fn toggle_like<T: DeserializeOwned>(&self, id: &str) -> Result<T, RequestError> {
        let path = format!("/coral-updates/{}/like", segment(id));
        let request = self.client.request(Method::POST, &path);

        self.client.send_data(request).await
    }

    /// Comment on an update.
    pub async fn add_comment<T: DeserializeOwned>(
        &self,
        id: &str,
        text: &str,
    ) -> Result<T, RequestError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequestError::BadRequest("Comment cannot be empty".to_string()));
        }

        let path = format!("/coral-updates/{}/comment", segment(id));
        let request = self
            .client
            .request_json(Method::POST, &path, &Comment { text });

        self.client.send_data(request).await
    }
}
