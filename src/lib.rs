//! Study material generation from extracted document text.
//!
//! `study-core` turns the plain text of an uploaded document into quiz
//! questions (multiple-choice or true/false), a vocabulary list and a short
//! summary. Vocabulary candidates are picked deterministically from token
//! frequencies; everything else is delegated to an external text generator
//! whose JSON answers are validated and filtered into guaranteed-shape records.

pub mod config;
pub mod document;
pub mod generator;
pub mod nlp;
pub mod pipeline;
pub mod prompt;
pub mod response;
pub mod selection;
pub mod types;

pub use config::PipelineConfig;
pub use pipeline::StudyPipeline;
