use study_core::generator::{GeminiConfig, GeminiGenerator, GeneratorError, TextGenerator};
use study_core::types::{GenerationMode, GenerationRequest, GenerationStatus};
use study_core::StudyPipeline;

const API_KEY: &str = "test-key-0123456789";

// Nothing listens on the discard port, so the connection is refused.
fn unreachable_generator() -> GeminiGenerator {
    let mut config = GeminiConfig::new(API_KEY);
    config.base_url = "http://127.0.0.1:9".into();
    config.timeout_secs = 5;
    GeminiGenerator::new(config)
}

#[test]
fn transport_failure_is_a_request_error_without_the_key() {
    let err = unreachable_generator()
        .generate("Summarize nothing.")
        .unwrap_err();

    assert!(matches!(err, GeneratorError::RequestFailed { .. }), "{err:?}");
    assert!(!err.to_string().contains(API_KEY), "{err}");
}

#[test]
fn failure_detail_in_output_does_not_carry_the_key() {
    let pipeline = StudyPipeline::with_generator(unreachable_generator());
    let output = pipeline.run(&GenerationRequest::new(
        "Cells divide and grow.",
        2,
        GenerationMode::TrueFalse,
    ));

    assert_eq!(output.generation.status, GenerationStatus::GeneratorFailed);
    let detail = output.generation.detail.clone().unwrap_or_default();
    assert!(!detail.is_empty());
    assert!(!detail.contains(API_KEY), "{detail}");

    let json = serde_json::to_string(&output).unwrap();
    assert!(!json.contains(API_KEY));
}
