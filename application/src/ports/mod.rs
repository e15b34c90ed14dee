//! Port definitions — interfaces to the outside world.
//!
//! Ports are implemented by adapters in the infrastructure layer and
//! injected into use cases at wiring time.

pub mod chat_gateway;
pub mod conversation_logger;
pub mod secret_store;
