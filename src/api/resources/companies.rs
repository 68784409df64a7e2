use serde::de::DeserializeOwned;

use crate::api::list::ListRequest;
use crate::api::segment;
use crate::error::RequestError;
use crate::ReefStars;

/// The `/companies` endpoints.
pub struct CompaniesApi<'a> {
    client: &'a ReefStars,
}

impl ReefStars {
    /// Access to the `/companies` endpoints.
    #[must_use]
    pub const fn companies(&self) -> CompaniesApi<'_> {
        CompaniesApi { client: self }
    }
}

impl<'a> CompaniesApi<'a> {
    /// Fetch a paginated list of companies.
    pub fn list<T: DeserializeOwned>(&self) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/companies".to_string())
    }

    /// Companies operating in a region.
    pub fn by_region<T: DeserializeOwned>(&self, region: &str) -> ListRequest<'a, T> {
        ListRequest::new(self.client, format!("/companies/region/{}", segment(region)))
    }

    /// Reef stars sponsored by a company.
    pub fn reef_stars<T: DeserializeOwned>(&self, id: &str) -> ListRequest<'a, T> {
        ListRequest::new(self.client, format!("/companies/{}/reefstars", segment(id)))
    }

    /// Best companies according to `metric` (for example `totalReefStars`).
    pub fn top<T: DeserializeOwned>(&self, metric: &str) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/companies/top".to_string()).param("metric", metric)
    }

    /// Fetch a single company.
    pub async fn get_one<T: DeserializeOwned>(&self, id: &str) -> Result<T, RequestError> {
        let path = format!("/companies/{}", segment(id));
        let request = self.client.request_get(&path, &[]);

        self.client.send_data(request).await
    }

    /// Aggregated statistics of a company.
    pub async fn stats<T: DeserializeOwned>(&self, id: &str) -> Result<T, RequestError> {
        let path = format!("/companies/{}/stats", segment(id));
        let request = self.client.request_get(&path, &[]);

        self.client.send_data(request).await
    }
}
