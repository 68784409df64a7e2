use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::RequestError;
use crate::ReefStars;

/// The `/upload` endpoints.
pub struct UploadsApi<'a> {
    client: &'a ReefStars,
}

impl ReefStars {
    /// Access to the `/upload` endpoints.
    #[must_use]
    pub const fn uploads(&self) -> UploadsApi<'_> {
        UploadsApi { client: self }
    }
}

impl UploadsApi<'_> {
    /// Upload one image. Returns the server's description of the stored file.
    ///
    /// # Example
    /// ```rust,ignore
    /// use reefstars_client::Part;
    ///
    /// let image = Part::bytes(std::fs::read("./acropora.jpg")?)
    ///     .file_name("acropora.jpg")
    ///     .mime_str("image/jpeg")?;
    ///
    /// let stored: serde_json::Value = client.uploads().image(image).await?;
    /// ```
    pub async fn image<T: DeserializeOwned>(&self, image: Part) -> Result<T, RequestError> {
        self.upload("/upload/image", Form::new().part("image", image))
            .await
    }

    /// Upload several images at once.
    pub async fn images<T: DeserializeOwned>(
        &self,
        images: impl IntoIterator<Item = Part>,
    ) -> Result<T, RequestError> {
        let form = images
            .into_iter()
            .fold(Form::new(), |form, image| form.part("images", image));

        self.upload("/upload/images", form).await
    }

    /// Upload an avatar image.
    pub async fn avatar<T: DeserializeOwned>(&self, avatar: Part) -> Result<T, RequestError> {
        self.upload("/upload/avatar", Form::new().part("avatar", avatar))
            .await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, RequestError> {
        let request = self.client.request_form(Method::POST, path, form);

        self.client.send_data(request).await
    }
}
