//! Adapters - Implementations of ports for external systems.
//!
//! - `ai` - Text-generation providers
//! - `http` - REST API

pub mod ai;
pub mod http;
