//! Provider adapters for the chat gateway port

pub mod gemini;

pub use gemini::GeminiGateway;
