//! Test support: a recording chat endpoint.
//!
//! Captures every outbound request instead of calling a real server, so
//! tests can assert on exactly what would have crossed the wire.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ChatEndpoint, CompletionRequest};
use crate::error::ChatError;

/// Records requests and returns a canned reply, or a simulated outage.
pub struct RecordingEndpoint {
    requests: Mutex<Vec<CompletionRequest>>,
    reply: String,
    should_fail: bool,
}

impl RecordingEndpoint {
    pub fn replying(reply: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: reply.to_string(),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: String::new(),
            should_fail: true,
        }
    }

    /// Everything sent so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests mutex poisoned").len()
    }
}

#[async_trait]
impl ChatEndpoint for RecordingEndpoint {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ChatError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request.clone());

        if self.should_fail {
            return Err(ChatError::Api {
                status: 500,
                body: "simulated outage".to_string(),
            });
        }
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::new("user", "hi")],
            max_tokens: 10,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn records_requests_and_replies() {
        let endpoint = RecordingEndpoint::replying("hello");
        let reply = endpoint.complete(&request()).await.unwrap();

        assert_eq!(reply, "hello");
        assert_eq!(endpoint.call_count(), 1);
        assert_eq!(endpoint.requests()[0].messages[0].content, "hi");
    }

    #[tokio::test]
    async fn failing_endpoint_still_records_the_call() {
        let endpoint = RecordingEndpoint::failing();
        let result = endpoint.complete(&request()).await;

        assert!(result.is_err());
        assert_eq!(endpoint.call_count(), 1);
    }
}
