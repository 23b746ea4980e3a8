//! BFAS Profile - Big Five Aspect Scale scoring service
//!
//! Scores a 100-item BFAS questionnaire into ten aspect percentiles against
//! age- and gender-appropriate norms, aggregates them into the five
//! dimensions, and flags within-dimension asymmetries and clinically
//! relevant aspect combinations. An optional AI provider turns the scored
//! profile into a narrative interpretation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
