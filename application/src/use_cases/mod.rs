//! Use cases — application flows built on the ports

pub mod chat_turn;

pub use chat_turn::{ChatTurnError, ChatTurnUseCase};
