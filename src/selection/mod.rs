pub mod candidates;
pub mod frequency;

pub use candidates::{select_candidates, CandidatePolicy, CandidateSelection, CandidateSelector};
pub use frequency::FrequencyTable;
