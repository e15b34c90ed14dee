//! Application layer for parley
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    chat_gateway::{ChatGateway, ChatSession, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    secret_store::{SecretStore, StaticSecretStore},
};
pub use use_cases::chat_turn::{ChatTurnError, ChatTurnUseCase};
