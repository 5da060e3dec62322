//! Trading Plan Generator
//!
//! Turns user trading preferences into a single structured Gemini request
//! and validates the returned JSON into a fully-typed, print-ready plan:
//!
//! CONFIG → BUILD REQUEST → INVOKE → VALIDATE → PLAN
//!
//! - The request builder is pure: depth-conditioned instructions plus a
//!   fixed response schema
//! - Multiple selected strategies are synthesized into one unified rule set
//! - Validation is all-or-nothing with a distinguishable error taxonomy
//! - Rendering, layout and print/export belong to an external collaborator

pub mod api;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod invoker;
pub mod models;
pub mod prompt;
pub mod schema;
pub mod validator;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use prompt::{build_request, ModelRequest};
pub use validator::parse_plan;
