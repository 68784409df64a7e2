//! Client-side form validation.
//!
//! Runs before anything is sent: a form that does not validate never reaches
//! the [`SessionStore`](crate::SessionStore). Errors are reported per field so
//! they can be rendered inline.

use thiserror::Error;

use crate::api::auth::{PasswordChange, ProfileUpdate, Registration};

const MIN_NAME_LENGTH: usize = 2;
const MIN_PASSWORD_LENGTH: usize = 6;
const STRONG_PASSWORD_LENGTH: usize = 8;
const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A validation failure on one form field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Name of the field, as used by the API (`fullName`, `email`, ...).
    pub field: &'static str,
    /// Text to show next to the field.
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The first error reported for `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Whether nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Whether `email` looks like an address: non-blank text on both sides of an `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
}

/// The sign-up form, as typed by the user.
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Optional phone number; blank means none.
    pub phone: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirm_password: String,
    /// Whether the terms and conditions were accepted.
    pub accept_terms: bool,
}

impl RegistrationForm {
    /// Checks every field and builds the request to send.
    ///
    /// # Example
    /// ```rust
    /// use reefstars_client::RegistrationForm;
    ///
    /// let form = RegistrationForm {
    ///     full_name: "Ana".into(),
    ///     email: "not-an-email".into(),
    ///     password: "Secret123!".into(),
    ///     confirm_password: "Secret123!".into(),
    ///     accept_terms: true,
    ///     ..Default::default()
    /// };
    ///
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(errors.for_field("email"), Some("Invalid email address"));
    /// ```
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.push("fullName", "Full name is required");
        } else if full_name.chars().count() < MIN_NAME_LENGTH {
            errors.push("fullName", "Name must be at least 2 characters");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.push("email", "Invalid email address");
        }

        check_new_password(&mut errors, "password", &self.password);

        if self.confirm_password.is_empty() {
            errors.push("confirmPassword", "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.push("confirmPassword", "Passwords do not match");
        }

        if !self.accept_terms {
            errors.push("acceptTerms", "You must accept the terms and conditions");
        }

        let mut registration = Registration::new(full_name, email, self.password.clone());
        let phone = self.phone.trim();
        if !phone.is_empty() {
            registration = registration.phone(phone);
        }

        errors.into_result(registration)
    }
}

/// The change-password form.
#[derive(Clone, Debug, Default)]
pub struct PasswordChangeForm {
    /// The password in use.
    pub current_password: String,
    /// The password to switch to.
    pub new_password: String,
    /// The new password typed a second time.
    pub confirm_password: String,
}

impl PasswordChangeForm {
    /// Checks every field and builds the request to send.
    pub fn validate(&self) -> Result<PasswordChange, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.current_password.is_empty() {
            errors.push("currentPassword", "Current password is required");
        }

        check_new_password(&mut errors, "newPassword", &self.new_password);

        if self.confirm_password.is_empty() {
            errors.push("confirmPassword", "Please confirm your new password");
        } else if self.confirm_password != self.new_password {
            errors.push("confirmPassword", "Passwords do not match");
        }

        errors.into_result(PasswordChange::new(
            self.current_password.clone(),
            self.new_password.clone(),
        ))
    }
}

/// The profile settings form. The avatar, if any, is attached afterwards
/// with [`ProfileUpdate::avatar`].
#[derive(Clone, Debug, Default)]
pub struct ProfileForm {
    /// Display name.
    pub full_name: String,
    /// Phone number, possibly blank.
    pub phone: String,
}

impl ProfileForm {
    /// Checks every field and builds the update to send.
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.push("fullName", "Full name is required");
        }

        let update = ProfileUpdate::new()
            .full_name(full_name)
            .phone(self.phone.trim());

        errors.into_result(update)
    }
}

fn check_new_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.push(
            field,
            if field == "password" {
                "Password is required"
            } else {
                "New password is required"
            },
        );
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(field, "Password must be at least 6 characters");
    }
}

/// Which strength criteria a password meets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PasswordChecks {
    /// At least 8 characters.
    pub length: bool,
    /// Contains a lowercase letter.
    pub lowercase: bool,
    /// Contains an uppercase letter.
    pub uppercase: bool,
    /// Contains a digit.
    pub number: bool,
    /// Contains one of `!@#$%^&*(),.?":{}|<>`.
    pub special: bool,
}

/// Result of [`password_strength`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Number of criteria met, from 0 to 5.
    pub score: u8,
    /// `""`, `Very Weak`, `Weak`, `Fair`, `Good` or `Strong`.
    pub label: &'static str,
    /// The individual criteria.
    pub checks: PasswordChecks,
}

/// Scores a password on five criteria, one point each.
///
/// ```rust
/// use reefstars_client::password_strength;
///
/// assert_eq!(password_strength("").score, 0);
/// assert_eq!(password_strength("Secret123!").label, "Strong");
/// ```
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "",
            checks: PasswordChecks::default(),
        };
    }

    let checks = PasswordChecks {
        length: password.chars().count() >= STRONG_PASSWORD_LENGTH,
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
    };

    let score = [
        checks.length,
        checks.lowercase,
        checks.uppercase,
        checks.number,
        checks.special,
    ]
    .into_iter()
    .filter(|met| *met)
    .count();

    let label = match score {
        0 => "",
        1 => "Very Weak",
        2 => "Weak",
        3 => "Fair",
        4 => "Good",
        _ => "Strong",
    };

    PasswordStrength {
        // At most five criteria.
        score: u8::try_from(score).unwrap_or(u8::MAX),
        label,
        checks,
    }
}
