// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    AccountRecord, BaseAccountStore, BaseAI, BaseIdentityProvider, Identity,
    IdentityProviderError, ServerDeps,
};

// =============================================================================
// Mock Identity Provider
// =============================================================================

pub struct MockIdentityProvider {
    results: Mutex<Vec<Result<Identity, IdentityProviderError>>>,
    sign_in_calls: Mutex<Vec<(String, String)>>,
    sign_out_calls: Mutex<Vec<String>>,
    sign_out_fails: bool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            sign_in_calls: Mutex::new(Vec::new()),
            sign_out_calls: Mutex::new(Vec::new()),
            sign_out_fails: false,
        }
    }

    /// Queue a successful sign-in result
    pub fn with_identity(self, account_id: &str, email: &str) -> Self {
        self.results.lock().unwrap().push(Ok(Identity {
            account_id: account_id.to_string(),
            email: email.to_string(),
        }));
        self
    }

    /// Queue a sign-in failure
    pub fn with_error(self, error: IdentityProviderError) -> Self {
        self.results.lock().unwrap().push(Err(error));
        self
    }

    /// Make sign_out fail
    pub fn failing_sign_out(mut self) -> Self {
        self.sign_out_fails = true;
        self
    }

    /// All (email, password) pairs handed to the provider
    pub fn sign_in_calls(&self) -> Vec<(String, String)> {
        self.sign_in_calls.lock().unwrap().clone()
    }

    pub fn sign_out_calls(&self) -> Vec<String> {
        self.sign_out_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, IdentityProviderError> {
        self.sign_in_calls
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));

        let mut results = self.results.lock().unwrap();
        if !results.is_empty() {
            results.remove(0)
        } else {
            // Default: succeed with the email that was handed in
            Ok(Identity {
                account_id: "mock-account".to_string(),
                email: email.to_string(),
            })
        }
    }

    async fn sign_out(&self, account_id: &str) -> Result<()> {
        self.sign_out_calls
            .lock()
            .unwrap()
            .push(account_id.to_string());

        if self.sign_out_fails {
            anyhow::bail!("mock sign-out failure");
        }
        Ok(())
    }
}

// =============================================================================
// Mock Account Store
// =============================================================================

pub struct MockAccountStore {
    records: Mutex<Vec<AccountRecord>>,
    phone_calls: Mutex<Vec<String>>,
    email_calls: Mutex<Vec<String>>,
    lookup_fails: bool,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            phone_calls: Mutex::new(Vec::new()),
            email_calls: Mutex::new(Vec::new()),
            lookup_fails: false,
        }
    }

    /// Add an account record; store order is insertion order
    pub fn with_record(self, phone_number: Option<&str>, email: Option<&str>, role: &str) -> Self {
        self.records.lock().unwrap().push(AccountRecord {
            phone_number: phone_number.map(String::from),
            email: email.map(String::from),
            role: role.to_string(),
        });
        self
    }

    /// Make every lookup fail (simulates store transport faults)
    pub fn failing(mut self) -> Self {
        self.lookup_fails = true;
        self
    }

    /// All phone numbers that were looked up
    pub fn phone_calls(&self) -> Vec<String> {
        self.phone_calls.lock().unwrap().clone()
    }

    pub fn email_calls(&self) -> Vec<String> {
        self.email_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAccountStore for MockAccountStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Vec<AccountRecord>> {
        self.phone_calls
            .lock()
            .unwrap()
            .push(phone_number.to_string());

        if self.lookup_fails {
            anyhow::bail!("mock store failure");
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.phone_number.as_deref() == Some(phone_number))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        self.email_calls.lock().unwrap().push(email.to_string());

        if self.lookup_fails {
            anyhow::bail!("mock store failure");
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email.as_deref() == Some(email))
            .cloned())
    }
}

// =============================================================================
// Mock AI
// =============================================================================

pub struct MockAI {
    responses: Mutex<Vec<Result<String>>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Queue a text response
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Ok(response.into()));
        self
    }

    /// Queue a failure
    pub fn with_failure(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(anyhow::anyhow!("mock model failure")));
        self
    }

    /// Delay every completion (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// All prompts that were sent to the model
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|p| p.contains(text))
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            Ok("Mock AI response".to_string())
        }
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

pub struct TestDependencies {
    pub identity: Arc<MockIdentityProvider>,
    pub accounts: Arc<MockAccountStore>,
    pub ai: Arc<MockAI>,
    pub assistant_timeout: Duration,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            identity: Arc::new(MockIdentityProvider::new()),
            accounts: Arc::new(MockAccountStore::new()),
            ai: Arc::new(MockAI::new()),
            assistant_timeout: Duration::from_secs(5),
        }
    }

    pub fn mock_identity(mut self, provider: MockIdentityProvider) -> Self {
        self.identity = Arc::new(provider);
        self
    }

    pub fn mock_accounts(mut self, store: MockAccountStore) -> Self {
        self.accounts = Arc::new(store);
        self
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn assistant_timeout(mut self, timeout: Duration) -> Self {
        self.assistant_timeout = timeout;
        self
    }

    /// Convert into ServerDeps for handler and middleware tests
    pub fn into_deps(self) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            None,
            self.accounts,
            self.identity,
            self.ai,
            self.assistant_timeout,
        ))
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
