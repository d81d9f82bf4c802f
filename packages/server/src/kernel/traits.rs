// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The resolver, session gate, and assistant bridge are domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseAccountStore)

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::identity::IdentityProviderError;

// =============================================================================
// Identity Provider Trait (Infrastructure - external auth service)
// =============================================================================

/// Session principal issued by the identity provider on a successful
/// password check. Observed by the portal, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub account_id: String,
    pub email: String,
}

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Verify an email/password pair and return the session principal
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityProviderError>;

    /// Invalidate the provider-side session for an account
    async fn sign_out(&self, account_id: &str) -> Result<()>;
}

// =============================================================================
// Account Store Trait (Infrastructure - user document lookups)
// =============================================================================

/// Lookup projection of a user row, as read by the login flows
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

#[async_trait]
pub trait BaseAccountStore: Send + Sync {
    /// All accounts whose phone field equals the value verbatim, in store
    /// order. Callers take the first match; duplicates are not rejected.
    async fn find_by_phone(&self, phone_number: &str) -> Result<Vec<AccountRecord>>;

    /// The account whose email field equals the value, if any
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>>;
}

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;
}
