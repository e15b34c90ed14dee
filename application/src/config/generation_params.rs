//! Generation parameters — fixed sampling settings for the remote model.
//!
//! [`GenerationParams`] groups the sampling parameters that are forwarded
//! unchanged to the remote completion service on every request. They are
//! supplied once at gateway construction and never re-read per call; the
//! application does not interpret their semantics.

use serde::{Deserialize, Serialize};

/// Fixed sampling parameters for the remote model.
///
/// These are opaque pass-through values: validation beyond basic sanity
/// checks is left to the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
    /// Top-k cutoff.
    pub top_k: u32,
    /// Maximum output token budget per reply.
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}
