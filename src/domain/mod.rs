//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, errors)
//! - `assessment` - BFAS scoring: norms, aspect scores, asymmetries, clinical flags

pub mod assessment;
pub mod foundation;
