//! Recommendation and coverage-scoring engine for choosing LLM evaluation
//! methods.
//!
//! Given questionnaire answers (task type, reference-data availability,
//! weighted quality/risk selections), the engine filters and ranks a
//! catalogue of evaluation methods, and reports how well an arbitrary chosen
//! subset of methods covers the stated requirements.
//!
//! Every function is pure: the [`catalogue::Catalogue`] is built once and
//! borrowed immutably, inputs are never mutated, and results are freshly
//! allocated on every call.

pub mod catalogue;
pub mod coverage;
pub mod error;
pub mod model;
pub mod preferences;
pub mod rank;

pub use catalogue::Catalogue;
pub use error::CatalogueError;
