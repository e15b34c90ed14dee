//! Session domain model: conversation turns and the transcript

pub mod entities;
pub mod transcript;

pub use entities::{Role, Turn};
pub use transcript::Transcript;
