pub mod identifiers;
pub mod output;
pub mod record;
pub mod request;

pub use identifiers::SourceVersion;
pub use output::{Artifact, GenerationMetadata, GenerationStatus, StudyOutput};
pub use record::{QuizQuestion, Record, VocabularyEntry};
pub use request::{GenerationMode, GenerationRequest, InputRejection};
