// Login-identifier resolver
//
// Normalizes whatever the user typed into the login form (email or phone
// number) into the canonical account email, then delegates to the identity
// provider's password check. All failures map to the fixed user-facing
// messages in AuthError; store faults never propagate unhandled.

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

use crate::kernel::{BaseAccountStore, BaseIdentityProvider, Identity, IdentityProviderError};

use super::errors::AuthError;

lazy_static! {
    /// Permissive phone shape: optional leading +, then digits, spaces,
    /// hyphens and parentheses. Classification only - no normalization.
    static ref PHONE_SHAPE: Regex = Regex::new(r"^\+?[0-9\s\-()]+$").unwrap();
}

pub struct IdentifierResolver {
    accounts: Arc<dyn BaseAccountStore>,
    identity: Arc<dyn BaseIdentityProvider>,
}

impl IdentifierResolver {
    pub fn new(
        accounts: Arc<dyn BaseAccountStore>,
        identity: Arc<dyn BaseIdentityProvider>,
    ) -> Self {
        Self { accounts, identity }
    }

    /// Resolve an identifier to the account email and verify the password.
    pub async fn resolve(&self, identifier: &str, password: &str) -> Result<Identity, AuthError> {
        let email = if PHONE_SHAPE.is_match(identifier) {
            self.email_for_phone(identifier).await?
        } else if identifier.contains('@') {
            // Merely email-shaped strings pass through unfiltered; the
            // provider performs final validation.
            identifier.to_string()
        } else {
            return Err(AuthError::InvalidIdentifier);
        };

        self.identity
            .sign_in_with_password(&email, password)
            .await
            .map_err(|e| match e {
                IdentityProviderError::InvalidCredentials => AuthError::InvalidCredentials,
                IdentityProviderError::InvalidEmail => AuthError::InvalidEmailFormat,
                IdentityProviderError::Other(code) => {
                    tracing::warn!(code = %code, "Unmapped identity provider error");
                    AuthError::SignInFailed
                }
            })
    }

    /// Look up the account email for a phone-shaped identifier.
    ///
    /// Phone numbers are assumed unique but unenforced; the first record in
    /// store order wins.
    async fn email_for_phone(&self, phone_number: &str) -> Result<String, AuthError> {
        let records = self
            .accounts
            .find_by_phone(phone_number)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Account store lookup failed");
                AuthError::LookupFailed
            })?;

        let record = records.first().ok_or(AuthError::PhoneNotFound)?;

        match record.email.as_deref() {
            Some(email) if !email.is_empty() => Ok(email.to_string()),
            _ => Err(AuthError::NoLinkedEmail),
        }
    }
}
