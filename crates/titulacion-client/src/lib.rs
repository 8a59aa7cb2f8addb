//! titulacion-client: Evaluation service integration.
//!
//! Implements the `Evaluator` trait over HTTP, plus a scripted mock and the
//! configuration that tells the wizard where the service lives.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{create_evaluator, load_config_from, TitulacionConfig};
pub use error::ClientError;
pub use http::HttpEvaluator;
pub use mock::MockEvaluator;
