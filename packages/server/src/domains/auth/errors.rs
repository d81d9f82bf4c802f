use thiserror::Error;

use super::models::Role;

/// Auth errors for the school portal.
///
/// The `#[error]` strings are the exact user-facing messages; the route
/// layer serializes them verbatim. Unknown-user and wrong-password are
/// deliberately one variant so the response cannot leak which was wrong.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No user found with this phone number.")]
    PhoneNotFound,

    #[error("No email associated with this phone number.")]
    NoLinkedEmail,

    #[error("Enter a valid email or phone number.")]
    InvalidIdentifier,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Enter a valid email address.")]
    InvalidEmailFormat,

    #[error("Failed to sign in. Please try again later.")]
    SignInFailed,

    #[error("Something went wrong. Please try again.")]
    LookupFailed,

    #[error("This account is not registered for the {0} area.")]
    RoleMismatch(Role),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Failed to sign out. Please try again.")]
    SignOutFailed,
}
