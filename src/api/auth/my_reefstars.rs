use serde::de::DeserializeOwned;

use super::Auth;
use crate::api::list::ListRequest;

impl<'a> Auth<'a> {
    /// Fetch the reef stars of the logged in user.
    ///
    /// # Example
    /// ```rust,ignore
    /// let mine = client
    ///     .auth()
    ///     .my_reefstars::<ReefStar>()
    ///     .status("active")
    ///     .limit(1)
    ///     .call()
    ///     .await?;
    ///
    /// println!("Total reef stars: {}", mine.total.unwrap_or(0));
    /// ```
    pub fn my_reefstars<T: DeserializeOwned>(&self) -> ListRequest<'a, T> {
        ListRequest::new(self.client, "/auth/my-reefstars".to_string())
    }
}
