pub mod builder;
pub mod templates;

pub use builder::{clip_chars, PromptBuilder, PromptLimits};
