use serde::de::DeserializeOwned;

use crate::api::list::ListRequest;
use crate::api::segment;
use crate::error::RequestError;
use crate::ReefStars;

/// The `/reefstars` endpoints.
///
/// Record types are chosen by the caller.
pub struct ReefStarsApi<'a> {
    client: &'a ReefStars,
}

impl ReefStars {
    /// Access to the `/reefstars` endpoints.
    #[must_use]
    pub const fn reef_stars(&self) -> ReefStarsApi<'_> {
        ReefStarsApi { client: self }
    }
}

impl<'a> ReefStarsApi<'a> {
    /// Fetch a paginated list of reef stars.
    pub fn list<T: DeserializeOwned>(&self) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/reefstars".to_string())
    }

    /// Reef stars around a position.
    pub fn nearby<T: DeserializeOwned>(&self, latitude: f64, longitude: f64) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/reefstars/near".to_string())
            .param("lat", latitude.to_string())
            .param("lng", longitude.to_string())
    }

    /// Fetch a single reef star.
    pub async fn get_one<T: DeserializeOwned>(&self, id: &str) -> Result<T, RequestError> {
        let path = format!("/reefstars/{}", segment(id));
        let request = self.client.request_get(&path, &[]);

        self.client.send_data(request).await
    }

    /// Look a reef star up by the code printed on its QR tag.
    ///
    /// Surrounding whitespace is ignored. An empty code is refused without
    /// sending anything.
    ///
    /// # Example
    /// ```rust,ignore
    /// let reef_star: ReefStar = client.reef_stars().get_by_qr(" RS4F2K9A ").await?;
    /// ```
    pub async fn get_by_qr<T: DeserializeOwned>(&self, code: &str) -> Result<T, RequestError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(RequestError::BadRequest("QR code cannot be empty".to_string()));
        }

        let path = format!("/reefstars/qr/{}", segment(code));
        let request = self.client.request_get(&path, &[]);

        self.client.send_data(request).await
    }

    /// Growth and health statistics of one reef star.
    pub async fn stats<T: DeserializeOwned>(&self, id: &str) -> Result<T, RequestError> {
        let path = format!("/reefstars/{}/stats", segment(id));
        let request = self.client.request_get(&path, &[]);

        self.client.send_data(request).await
    }
}
