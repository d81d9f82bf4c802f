// FAQ assistant bridge
//
// Single-turn, stateless question answering over the hosted model. The
// bridge never fails its caller: any fault (validation, timeout, model
// error, empty output) is logged and collapses to one fixed fallback
// answer. No retries, no caching.

use std::sync::Arc;
use std::time::Duration;

use crate::kernel::BaseAI;

/// Returned whenever the model cannot produce an answer
pub const FALLBACK_ANSWER: &str =
    "Sorry, I couldn't find an answer to that right now. Please contact the school office for help.";

/// Fixed instruction template; the query lands in the one placeholder
const PROMPT_TEMPLATE: &str = "Answer the following question about the school.\n\nQuestion: ";

#[derive(Clone)]
pub struct AssistantBridge {
    ai: Arc<dyn BaseAI>,
    timeout: Duration,
}

impl AssistantBridge {
    pub fn new(ai: Arc<dyn BaseAI>, timeout: Duration) -> Self {
        Self { ai, timeout }
    }

    /// Answer a free-text question. Infallible: returns the fallback
    /// string on any failure.
    pub async fn ask(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            tracing::warn!("Assistant query was empty; returning fallback");
            return FALLBACK_ANSWER.to_string();
        }

        let prompt = format!("{}{}", PROMPT_TEMPLATE, query);

        match tokio::time::timeout(self.timeout, self.ai.complete(&prompt)).await {
            Ok(Ok(answer)) if !answer.trim().is_empty() => answer,
            Ok(Ok(_)) => {
                tracing::warn!("Model returned an empty answer; returning fallback");
                FALLBACK_ANSWER.to_string()
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Model call failed; returning fallback");
                FALLBACK_ANSWER.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Model call timed out; returning fallback"
                );
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;

    fn bridge(ai: MockAI) -> (Arc<MockAI>, AssistantBridge) {
        let ai = Arc::new(ai);
        let bridge = AssistantBridge::new(ai.clone(), Duration::from_secs(5));
        (ai, bridge)
    }

    #[tokio::test]
    async fn test_answer_passes_through_unchanged() {
        let (_, bridge) = bridge(MockAI::new().with_response("9am–5pm"));

        assert_eq!(bridge.ask("What are the library hours?").await, "9am–5pm");
    }

    #[tokio::test]
    async fn test_query_lands_verbatim_in_the_template() {
        let (ai, bridge) = bridge(MockAI::new().with_response("ok"));

        bridge.ask("When does term start?").await;

        let prompt = ai.calls().pop().unwrap();
        assert!(prompt.ends_with("Question: When does term start?"));
    }

    #[tokio::test]
    async fn test_model_failure_returns_exact_fallback() {
        let (_, bridge) = bridge(MockAI::new().with_failure());

        assert_eq!(bridge.ask("What are the library hours?").await, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_empty_answer_returns_fallback() {
        let (_, bridge) = bridge(MockAI::new().with_response("   "));

        assert_eq!(bridge.ask("Anything?").await, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_empty_query_never_reaches_the_model() {
        let (ai, bridge) = bridge(MockAI::new());

        assert_eq!(bridge.ask("   ").await, FALLBACK_ANSWER);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn test_slow_model_hits_the_timeout() {
        let ai = Arc::new(MockAI::new().with_delay(Duration::from_secs(60)));
        let bridge = AssistantBridge::new(ai, Duration::from_millis(50));

        assert_eq!(bridge.ask("Slow one").await, FALLBACK_ANSWER);
    }
}
