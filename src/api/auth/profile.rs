use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::Auth;
use crate::error::RequestError;
use crate::models::{User, UserData};

/// Changes to the current user's profile, sent as multipart form data.
///
/// # Example
/// ```rust,ignore
/// use reefstars_client::{Part, ProfileUpdate};
///
/// let avatar = Part::bytes(std::fs::read("./me.png")?)
///     .file_name("me.png")
///     .mime_str("image/png")?;
///
/// let update = ProfileUpdate::new()
///     .full_name("Ana Coral")
///     .phone("+62 361 000")
///     .avatar(avatar);
/// ```
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    full_name: Option<String>,
    phone: Option<String>,
    avatar: Option<Part>,
}

impl ProfileUpdate {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New display name.
    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// New phone number.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// New avatar image.
    #[must_use]
    pub fn avatar(mut self, avatar: Part) -> Self {
        self.avatar = Some(avatar);
        self
    }

    pub(crate) fn into_form(self) -> Form {
        let mut form = Form::new();

        if let Some(full_name) = self.full_name {
            form = form.text("fullName", full_name);
        }
        if let Some(phone) = self.phone {
            form = form.text("phone", phone);
        }
        if let Some(avatar) = self.avatar {
            form = form.part("avatar", avatar);
        }

        form
    }
}

impl Auth<'_> {
    /// Fetch the profile of the user owning the current token.
    pub async fn profile(&self) -> Result<User, RequestError> {
        let request = self.client.request_get("/auth/profile", &[]);

        self.client
            .send_data::<UserData>(request)
            .await?
            .into_user()
            .map_err(|error| RequestError::ParseError(error.to_string()))
    }

    /// Update the current user's profile and return the updated user.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User, RequestError> {
        let request = self
            .client
            .request_form(Method::PUT, "/auth/profile", update.into_form());

        self.client
            .send_data::<UserData>(request)
            .await?
            .into_user()
            .map_err(|error| RequestError::ParseError(error.to_string()))
    }
}
