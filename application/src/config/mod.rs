//! Application-level configuration types

pub mod generation_params;

pub use generation_params::GenerationParams;
