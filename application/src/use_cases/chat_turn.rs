//! Chat turn use case.
//!
//! Executes one conversational exchange: record the user's turn, replay
//! the prior history to the remote model, and record the reply.
//!
//! The user turn is appended *before* the remote call, so a failed call
//! still leaves the question in the transcript. On failure no model turn
//! is appended and the error is surfaced to the caller; the session
//! stays usable for the next input. There are no automatic retries.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use parley_domain::{Transcript, Turn};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a chat turn.
#[derive(Error, Debug)]
pub enum ChatTurnError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for running one chat turn.
///
/// Flow:
/// 1. Append the user turn to the transcript
/// 2. Open a chat primed with the replay context (everything except the
///    turn just appended)
/// 3. Send the new message and wait for the full reply
/// 4. Append the model turn on success
pub struct ChatTurnUseCase {
    gateway: Arc<dyn ChatGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for ChatTurnUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl ChatTurnUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute one exchange and return the reply text.
    ///
    /// Precondition: `text` is non-empty. The REPL rejects empty
    /// submissions before this is invoked.
    pub async fn execute(
        &self,
        transcript: &mut Transcript,
        text: &str,
    ) -> Result<String, ChatTurnError> {
        debug!("Chat turn: {} prior turns", transcript.len());

        // Record the user turn before any remote call so a failure still
        // leaves the question in the transcript.
        transcript.push(Turn::user(text));
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({ "text": text }),
        ));

        let result = {
            let context = transcript.replay_context();
            let session = self.gateway.start_chat(context).await?;
            session.send(text).await
        };

        match result {
            Ok(reply) => {
                info!("Model replied with {} bytes", reply.len());
                self.conversation_logger.log(ConversationEvent::new(
                    "model_reply",
                    serde_json::json!({
                        "model": self.gateway.model().as_str(),
                        "bytes": reply.len(),
                        "text": &reply,
                    }),
                ));
                transcript.push(Turn::model(reply.as_str()));
                Ok(reply)
            }
            Err(e) => {
                warn!("Chat turn failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_failed",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::ChatSession;
    use async_trait::async_trait;
    use parley_domain::{Model, Role};
    use std::sync::Mutex;

    /// Gateway stub: records the replay context and message it receives,
    /// then answers from a script of outcomes (front of the queue first).
    #[derive(Clone)]
    struct StubGateway {
        model: Model,
        outcomes: Arc<Mutex<Vec<Result<String, GatewayError>>>>,
        seen_history: Arc<Mutex<Vec<Vec<Turn>>>>,
        seen_messages: Arc<Mutex<Vec<String>>>,
    }

    impl StubGateway {
        fn new(outcomes: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                model: Model::default(),
                outcomes: Arc::new(Mutex::new(outcomes)),
                seen_history: Arc::new(Mutex::new(Vec::new())),
                seen_messages: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    struct StubSession {
        outcomes: Arc<Mutex<Vec<Result<String, GatewayError>>>>,
        seen_messages: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ChatGateway for StubGateway {
        async fn start_chat(
            &self,
            history: &[Turn],
        ) -> Result<Box<dyn ChatSession>, GatewayError> {
            self.seen_history.lock().unwrap().push(history.to_vec());
            Ok(Box::new(StubSession {
                outcomes: self.outcomes.clone(),
                seen_messages: self.seen_messages.clone(),
            }))
        }

        fn model(&self) -> &Model {
            &self.model
        }
    }

    #[async_trait]
    impl ChatSession for StubSession {
        async fn send(&self, message: &str) -> Result<String, GatewayError> {
            self.seen_messages.lock().unwrap().push(message.to_string());
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                return Err(GatewayError::Transport("no scripted outcome".to_string()));
            }
            outcomes.remove(0)
        }
    }

    fn transport_err() -> GatewayError {
        GatewayError::Transport("connection reset".to_string())
    }

    #[tokio::test]
    async fn test_success_appends_user_and_model_turns() {
        let gateway = StubGateway::new(vec![Ok("Hi there".to_string())]);
        let use_case = ChatTurnUseCase::new(Arc::new(gateway.clone()));
        let mut transcript = Transcript::new();

        let reply = use_case.execute(&mut transcript, "Hello").await.unwrap();

        assert_eq!(reply, "Hi there");
        assert_eq!(transcript.turns(), &[Turn::user("Hello"), Turn::model("Hi there")]);
    }

    #[tokio::test]
    async fn test_replay_context_excludes_new_message() {
        let gateway = StubGateway::new(vec![Ok("See you".to_string())]);
        let use_case = ChatTurnUseCase::new(Arc::new(gateway.clone()));

        let mut transcript = Transcript::new();
        transcript.push(Turn::user("Hello"));
        transcript.push(Turn::model("Hi there"));

        use_case.execute(&mut transcript, "Bye").await.unwrap();

        let seen = gateway.seen_history.lock().unwrap();
        assert_eq!(
            seen[0],
            vec![Turn::user("Hello"), Turn::model("Hi there")],
            "replay context must not include the just-appended user turn"
        );
        let messages = gateway.seen_messages.lock().unwrap();
        assert_eq!(messages[0], "Bye");
    }

    #[tokio::test]
    async fn test_first_turn_sends_empty_context() {
        let gateway = StubGateway::new(vec![Ok("Hi".to_string())]);
        let use_case = ChatTurnUseCase::new(Arc::new(gateway.clone()));
        let mut transcript = Transcript::new();

        use_case.execute(&mut transcript, "Hello").await.unwrap();

        let seen = gateway.seen_history.lock().unwrap();
        assert!(seen[0].is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_user_turn_only() {
        let gateway = StubGateway::new(vec![Err(transport_err())]);
        let use_case = ChatTurnUseCase::new(Arc::new(gateway.clone()));
        let mut transcript = Transcript::new();

        let result = use_case.execute(&mut transcript, "Hi").await;

        assert!(matches!(
            result,
            Err(ChatTurnError::Gateway(GatewayError::Transport(_)))
        ));
        assert_eq!(transcript.turns(), &[Turn::user("Hi")]);
        assert_eq!(transcript.turns().last().unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn test_turn_count_over_mixed_outcomes() {
        // 4 calls, 2 successes: transcript grows by one user turn per
        // call plus one model turn per success.
        let gateway = StubGateway::new(vec![
            Ok("a".to_string()),
            Err(transport_err()),
            Ok("b".to_string()),
            Err(GatewayError::Service {
                status: Some(429),
                message: "quota".to_string(),
            }),
        ]);
        let use_case = ChatTurnUseCase::new(Arc::new(gateway.clone()));
        let mut transcript = Transcript::new();

        let mut successes = 0;
        for text in ["one", "two", "three", "four"] {
            if use_case.execute(&mut transcript, text).await.is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 2);
        assert_eq!(transcript.len(), 4 + successes);

        // Order is strictly chronological
        let contents: Vec<&str> = transcript
            .turns()
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "a", "two", "three", "b", "four"]);
    }
}
