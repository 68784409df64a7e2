use super::Auth;

impl Auth<'_> {
    /// Tell the server that `token` is no longer in use. Fire-and-forget.
    ///
    /// The request is spawned on the current tokio runtime and its outcome is
    /// only logged. It bypasses the gateway interceptor, so whatever the server
    /// answers can never clear a session established in the meantime. Without
    /// a current runtime the notification is skipped.
    pub fn notify_logout(&self, token: String) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime, skipping server logout notification");
            return;
        };

        // `self.client.request(..)` would attach the token in storage now, not
        // the one being logged out.
        let request = self
            .client
            .reqwest_client
            .post(self.client.endpoint("/auth/logout"))
            .bearer_auth(token);

        runtime.spawn(async move {
            match request.send().await {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "server logout notified");
                }
                Err(error) => tracing::debug!(%error, "server logout notification failed"),
            }
        });
    }
}
