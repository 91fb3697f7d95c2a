pub mod extract;
pub mod schema;
pub mod validate;

pub use extract::extract_json_candidate;
pub use schema::{Rejection, RecordSchema};
pub use validate::{
    truncate_results, validate_and_filter, validate_response, MalformedResponse, ValidationReport,
};
