use serde::de::DeserializeOwned;

use crate::api::list::ListRequest;
use crate::error::RequestError;
use crate::ReefStars;

/// Narrows platform statistics to a region and/or a time range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsFilter {
    /// Region name. `None` means all regions.
    pub region: Option<String>,
    /// Time range understood by the server (`6months`, `1year`, ...).
    pub time_range: Option<String>,
}

impl StatsFilter {
    /// No filter at all.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the given region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Only the given time range.
    #[must_use]
    pub fn time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = Some(time_range.into());
        self
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(region) = &self.region {
            query.push(("region".to_string(), region.clone()));
        }
        if let Some(time_range) = &self.time_range {
            query.push(("timeRange".to_string(), time_range.clone()));
        }
        query
    }
}

/// The `/stats` endpoints.
pub struct StatsApi<'a> {
    client: &'a ReefStars,
}

impl ReefStars {
    /// Access to the `/stats` endpoints.
    #[must_use]
    pub const fn stats(&self) -> StatsApi<'_> {
        StatsApi { client: self }
    }
}

impl<'a> StatsApi<'a> {
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: &StatsFilter,
    ) -> Result<T, RequestError> {
        let request = self.client.request_get(path, &filter.query());

        self.client.send_data(request).await
    }

    /// Platform-wide totals.
    pub async fn overview<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        self.fetch("/stats/overview", &StatsFilter::all()).await
    }

    /// Per-region summaries.
    pub async fn regions<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        self.fetch("/stats/regions", &StatsFilter::all()).await
    }

    /// Survival rate series.
    pub async fn survival_rate<T: DeserializeOwned>(
        &self,
        filter: &StatsFilter,
    ) -> Result<T, RequestError> {
        self.fetch("/stats/survival-rate", filter).await
    }

    /// Reef coverage series.
    pub async fn coverage<T: DeserializeOwned>(
        &self,
        filter: &StatsFilter,
    ) -> Result<T, RequestError> {
        self.fetch("/stats/coverage", filter).await
    }

    /// Monthly growth series.
    pub async fn monthly_growth<T: DeserializeOwned>(
        &self,
        filter: &StatsFilter,
    ) -> Result<T, RequestError> {
        self.fetch("/stats/monthly-growth", filter).await
    }

    /// Distribution of reef stars per health status.
    pub async fn health_distribution<T: DeserializeOwned>(
        &self,
        filter: &StatsFilter,
    ) -> Result<T, RequestError> {
        self.fetch("/stats/health-distribution", filter).await
    }

    /// Ranking of `kind` (`companies`, `users`, ...).
    pub fn leaderboard<T: DeserializeOwned>(&self, kind: &str) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/stats/leaderboard".to_string()).param("type", kind)
    }
}
