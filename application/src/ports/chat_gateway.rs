//! Chat gateway port
//!
//! Defines the interface for communicating with the remote completion
//! service. The adapter (infrastructure layer) owns wire protocol, auth,
//! and timeouts; the application only sees typed errors and reply text.

use async_trait::async_trait;
use parley_domain::{Model, Turn};
use thiserror::Error;

/// Errors that can occur during chat gateway operations
///
/// Any underlying failure is mapped into one of these kinds at the
/// adapter boundary, preserving a human-readable detail string for
/// display without losing typed discrimination.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Network-level failure: connect, TLS, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote service answered with an explicit failure
    /// (quota, auth, malformed request).
    #[error("Service error: {message}")]
    Service {
        status: Option<u16>,
        message: String,
    },

    /// The service answered 2xx but the response carried no text.
    #[error("Model returned no text in its reply")]
    EmptyReply,
}

impl GatewayError {
    /// Check if this is a transport-level error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status code, when the remote service reported one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }
}

/// Gateway for the remote completion service
///
/// This port defines how the application layer opens a chat against the
/// remote model. Implementations (adapters) live in the infrastructure
/// layer and persist for the process lifetime, reusing one HTTP client
/// across calls.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Establish a chat primed with the given replay context.
    ///
    /// `history` is the ordered prior conversation, oldest first. The
    /// newest user message is not part of it; it is delivered through
    /// [`ChatSession::send`].
    async fn start_chat(&self, history: &[Turn]) -> Result<Box<dyn ChatSession>, GatewayError>;

    /// The model this gateway targets
    fn model(&self) -> &Model;
}

/// An active chat against the remote model
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Send one message and get the full reply text.
    ///
    /// A single blocking round-trip: no retry, no partial tokens. The
    /// reply is obtained atomically or the call fails with a
    /// [`GatewayError`].
    async fn send(&self, message: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_discrimination() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert!(err.is_transport());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_service_error_carries_status() {
        let err = GatewayError::Service {
            status: Some(429),
            message: "quota exceeded".to_string(),
        };
        assert!(!err.is_transport());
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
