//! titulacion-core: Question catalog, answer store and wizard state machine.
//!
//! This crate defines the data model and the state machine that drives a
//! diagnosis: questions are answered one at a time (or a preset answer set
//! is loaded), the complete set is handed to an [`traits::Evaluator`], and
//! the verdict is kept until the user starts over.

pub mod catalog;
pub mod controller;
pub mod error;
pub mod input;
pub mod model;
pub mod presets;
pub mod traits;
pub mod verdict;
pub mod wizard;
