use crate::error::RequestError;
use crate::models::{AuthGrant, Envelope, UserData};
use crate::ReefStars;

mod login;
mod logout;
mod my_reefstars;
mod password;
mod profile;
mod register;

pub use login::Credentials;
pub use password::PasswordChange;
pub use profile::ProfileUpdate;
pub use register::Registration;

/// The `/auth` endpoints.
///
/// These are the raw calls: they go through the gateway interceptor but do not
/// touch the session. Use [`SessionStore`](crate::SessionStore) to log in,
/// register or update the profile while keeping the session in sync.
pub struct Auth<'a> {
    pub(crate) client: &'a ReefStars,
}

impl ReefStars {
    /// Access to the `/auth` endpoints.
    #[must_use]
    pub const fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }
}

/// Turns a login or register response into a grant.
fn grant_from(envelope: Envelope<UserData>) -> Result<AuthGrant, RequestError> {
    let token = envelope
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| RequestError::ParseError("response carries no token".to_string()))?;

    let user = envelope
        .data
        .ok_or_else(|| RequestError::ParseError("response carries no user".to_string()))?
        .into_user()
        .map_err(|error| RequestError::ParseError(error.to_string()))?;

    Ok(AuthGrant { token, user })
}
