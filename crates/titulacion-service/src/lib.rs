//! titulacion-service: The rule-evaluation service.
//!
//! A knowledge base of graduation requirements, a forward-chaining
//! inference engine that checks every rule against the submitted facts,
//! and the `POST /api/evaluate` endpoint the wizard talks to.

pub mod engine;
pub mod rules;
pub mod server;

pub use engine::{Evaluation, InferenceEngine, RuleFailure};
pub use rules::{knowledge_base, Facts, Rule};
pub use server::{router, serve};
