use std::sync::Arc;

use tdas_models::config::ChatConfig;
use tdas_models::ConversationEntry;
use tracing::{info, warn};

use crate::client::{ChatEndpoint, ChatMessage, CompletionRequest};
use crate::prompts::{system_prompt, NO_DATA_REPLY};

/// Reply from one orchestrated exchange.
///
/// `answered` is true only when the endpoint produced a reply. Guidance
/// and error notices are displayable but should not enter the transcript,
/// so the caller appends the exchange only when `answered` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub text: String,
    pub answered: bool,
}

/// Coordinates one question/answer exchange against the chat endpoint.
///
/// The orchestrator never mutates history and never lets an error escape:
/// endpoint failures come back as a displayable reply string.
pub struct ChatOrchestrator {
    endpoint: Arc<dyn ChatEndpoint>,
    config: ChatConfig,
}

impl ChatOrchestrator {
    pub fn new(endpoint: Arc<dyn ChatEndpoint>, config: ChatConfig) -> Self {
        Self { endpoint, config }
    }

    /// Answer `question` against the data context, forwarding a bounded
    /// trailing window of the transcript.
    pub async fn respond(
        &self,
        history: &[ConversationEntry],
        context: &str,
        question: &str,
    ) -> ChatResponse {
        if context.is_empty() {
            return ChatResponse {
                text: NO_DATA_REPLY.to_string(),
                answered: false,
            };
        }

        let request = self.build_request(history, context, question);

        info!(
            model = %self.config.model,
            history = history.len(),
            forwarded = request.messages.len(),
            "Sending chat completion request"
        );

        match self.endpoint.complete(&request).await {
            Ok(reply) => ChatResponse {
                text: reply,
                answered: true,
            },
            Err(e) => {
                warn!(error = %e, "Chat completion failed");
                ChatResponse {
                    text: format!("Error calling chat API: {e}"),
                    answered: false,
                }
            }
        }
    }

    fn build_request(
        &self,
        history: &[ConversationEntry],
        context: &str,
        question: &str,
    ) -> CompletionRequest {
        let window_start = history.len().saturating_sub(self.config.history_window);
        let recent = &history[window_start..];

        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(ChatMessage::new("system", system_prompt(context)));
        for entry in recent {
            messages.push(ChatMessage::new(entry.role.as_str(), entry.content.clone()));
        }
        messages.push(ChatMessage::new("user", question));

        CompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingEndpoint;

    fn orchestrator(endpoint: Arc<RecordingEndpoint>) -> ChatOrchestrator {
        ChatOrchestrator::new(endpoint, ChatConfig::default())
    }

    fn long_history(len: usize) -> Vec<ConversationEntry> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationEntry::user(format!("question {i}"))
                } else {
                    ConversationEntry::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn empty_context_returns_guidance_without_calling_endpoint() {
        let endpoint = Arc::new(RecordingEndpoint::replying("unused"));
        let orch = orchestrator(endpoint.clone());

        let response = orch.respond(&[], "", "How many trades?").await;

        assert_eq!(response.text, NO_DATA_REPLY);
        assert!(!response.answered);
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test]
    async fn forwards_system_history_window_and_question() {
        let endpoint = Arc::new(RecordingEndpoint::replying("Fund A."));
        let orch = orchestrator(endpoint.clone());
        let history = long_history(4);

        let response = orch.respond(&history, "the context", "Best fund?").await;

        assert!(response.answered);
        assert_eq!(response.text, "Fund A.");

        let requests = endpoint.requests();
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        // system + 4 history entries + new question
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("the context"));
        assert_eq!(messages[1].content, "question 0");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[5], ChatMessage::new("user", "Best fund?"));
    }

    #[tokio::test]
    async fn history_is_trimmed_to_the_window() {
        let endpoint = Arc::new(RecordingEndpoint::replying("ok"));
        let orch = orchestrator(endpoint.clone());
        let history = long_history(25);

        orch.respond(&history, "ctx", "q").await;

        let requests = endpoint.requests();
        let messages = &requests[0].messages;
        // system + last 20 of 25 + new question
        assert_eq!(messages.len(), 22);
        // Oldest five entries dropped: the window starts at entry 5
        assert_eq!(messages[1].content, "answer 5");
        assert_eq!(messages[21].content, "q");
    }

    #[tokio::test]
    async fn endpoint_failure_becomes_a_displayable_reply() {
        let endpoint = Arc::new(RecordingEndpoint::failing());
        let orch = orchestrator(endpoint.clone());

        let response = orch.respond(&[], "ctx", "q").await;

        assert!(!response.answered);
        assert!(response.text.starts_with("Error calling chat API:"));
        assert_eq!(endpoint.call_count(), 1);
    }

    #[tokio::test]
    async fn request_carries_configured_sampling_parameters() {
        let endpoint = Arc::new(RecordingEndpoint::replying("ok"));
        let orch = orchestrator(endpoint.clone());

        orch.respond(&[], "ctx", "q").await;

        let request = &endpoint.requests()[0];
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.max_tokens, 1500);
        assert_eq!(request.temperature, 0.3);
    }
}
