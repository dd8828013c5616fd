//! Common types for the exl expression resolver.
//!
//! This crate provides the diagnostic surface shared across all exl crates:
//! - `InvalidExpression` - the resolution failure taxonomy

// Resolution failure taxonomy and message rendering
pub mod diagnostics;
pub use diagnostics::InvalidExpression;
