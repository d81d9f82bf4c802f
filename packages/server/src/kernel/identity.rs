// Identity provider client
//
// REST client for an identitytoolkit-style authentication service. The
// portal only consumes password sign-in and sign-out; session lifecycle
// beyond that is owned by the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::traits::{BaseIdentityProvider, Identity};

/// Errors surfaced by the identity provider, already collapsed to the
/// categories the login flow distinguishes between.
#[derive(Error, Debug)]
pub enum IdentityProviderError {
    /// Unknown user or wrong password. The provider reports these as
    /// separate codes; they are collapsed here so the UI message cannot
    /// leak which part was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("provider error: {0}")]
    Other(String),
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP implementation of the identity provider
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

/// Map a provider error code to the categories the login flow handles.
/// Unrecognized codes fall through to `Other`.
fn map_error_code(code: &str) -> IdentityProviderError {
    // Codes may carry a suffix, e.g. "TOO_MANY_ATTEMPTS_TRY_LATER : ..."
    let code = code.split_whitespace().next().unwrap_or(code);
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            IdentityProviderError::InvalidCredentials
        }
        "INVALID_EMAIL" => IdentityProviderError::InvalidEmail,
        other => IdentityProviderError::Other(other.to_string()),
    }
}

#[async_trait]
impl BaseIdentityProvider for HttpIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityProviderError> {
        let url = format!(
            "{}/v1/accounts:signInWithPassword?key={}",
            self.base_url, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| IdentityProviderError::Other(format!("transport: {}", e)))?;

        if response.status().is_success() {
            let body: SignInResponse = response
                .json()
                .await
                .map_err(|e| IdentityProviderError::Other(format!("malformed response: {}", e)))?;

            tracing::debug!(account_id = %body.local_id, "Identity provider sign-in succeeded");

            Ok(Identity {
                account_id: body.local_id,
                email: body.email,
            })
        } else {
            let status = response.status();
            let body: ErrorResponse = response.json().await.map_err(|e| {
                IdentityProviderError::Other(format!("malformed error ({}): {}", status, e))
            })?;

            tracing::debug!(code = %body.error.message, "Identity provider rejected sign-in");

            Err(map_error_code(&body.error.message))
        }
    }

    async fn sign_out(&self, account_id: &str) -> anyhow::Result<()> {
        // The provider keeps no server-side session for password sign-in;
        // revocation happens implicitly when the portal session is deleted.
        tracing::debug!(account_id = %account_id, "Identity provider sign-out");
        Ok(())
    }
}
