//! Domain layer for parley
//!
//! This crate contains the core conversation entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The transcript is the central concept in parley: an append-only,
//! in-memory record of one chat session. Every user message and every
//! model reply becomes a [`Turn`] appended to the transcript, and the
//! transcript (minus the newest turn) is replayed to the remote model
//! on each exchange so it keeps conversational memory.

pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::core::model::Model;
pub use session::{
    entities::{Role, Turn},
    transcript::Transcript,
};
