use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::RequestError;
use crate::models::Listing;
use crate::ReefStars;

/// Builder for a paginated list request.
///
/// # Example
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct ReefStar {
///     name: String,
/// }
///
/// let reef_stars = client
///     .reef_stars()
///     .list::<ReefStar>()
///     .region("Bali")
///     .limit(12)
///     .call()
///     .await?;
///
/// println!("{} of {:?}", reef_stars.items.len(), reef_stars.total);
/// ```
#[must_use = "a list request does nothing until `call` is awaited"]
pub struct ListRequest<'a, T> {
    client: &'a ReefStars,
    path: String,
    query: Vec<(String, String)>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> ListRequest<'a, T> {
    pub(crate) fn new(client: &'a ReefStars, path: String) -> Self {
        Self {
            client,
            path,
            query: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// The page of the paginated list, starting at 1.
    pub fn page(self, page: u32) -> Self {
        self.param("page", page.to_string())
    }

    /// The max returned records per page.
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit.to_string())
    }

    /// Only records of the given region.
    pub fn region(self, region: impl Into<String>) -> Self {
        self.param("region", region)
    }

    /// Only records within the given time range (`6months`, `1year`, ...).
    pub fn time_range(self, time_range: impl Into<String>) -> Self {
        self.param("timeRange", time_range)
    }

    /// Only records of the given status (`active`, `monitoring`, ...).
    pub fn status(self, status: impl Into<String>) -> Self {
        self.param("status", status)
    }

    /// Any other query parameter. Setting a key twice keeps the last value.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.query.retain(|(existing, _)| *existing != key);
        self.query.push((key, value.into()));
        self
    }

    /// Execute the request and return the records with the reported total.
    pub async fn call(self) -> Result<Listing<T>, RequestError> {
        let request = self.client.request_get(&self.path, &self.query);
        let envelope = self.client.send::<Vec<T>>(request).await?;

        Ok(Listing::from_envelope(envelope))
    }
}
