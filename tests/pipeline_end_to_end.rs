use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use study_core::document::SourceDocument;
use study_core::generator::GeneratorError;
use study_core::nlp::LanguageResources;
use study_core::types::{GenerationMode, GenerationRequest, GenerationStatus, SourceVersion};
use study_core::{PipelineConfig, StudyPipeline};

const ARTICLE: &str = "The Amazon rainforest is the largest rainforest in the world. \
    It is home to an incredible diversity of plants and animals. \
    The Amazon river flows through the rainforest. \
    Deforestation is a major threat to this unique ecosystem. \
    Plants and animals of the Amazon depend on the river.";

fn failing(_prompt: &str) -> Result<String, GeneratorError> {
    Err(GeneratorError::RequestFailed {
        message: "quota exceeded".into(),
    })
}

#[test]
fn empty_source_never_reaches_the_generator() {
    let calls = Cell::new(0);
    let generator = |_prompt: &str| -> Result<String, GeneratorError> {
        calls.set(calls.get() + 1);
        Ok("[]".into())
    };
    let pipeline = StudyPipeline::with_generator(generator);

    for mode in [
        GenerationMode::MultipleChoice,
        GenerationMode::TrueFalse,
        GenerationMode::Vocabulary,
        GenerationMode::Summary,
    ] {
        let output = pipeline.run(&GenerationRequest::new("   ", 3, mode));
        assert_eq!(output.generation.status, GenerationStatus::InputRejected);
        assert!(output.artifact.records().is_empty());
    }

    assert_eq!(pipeline.summarize("", 3), "");
    assert!(pipeline.extract_vocabulary("", 5).is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn zero_count_is_rejected() {
    let calls = Cell::new(0);
    let pipeline = StudyPipeline::with_generator(|_prompt: &str| -> Result<String, GeneratorError> {
        calls.set(calls.get() + 1);
        Ok("[]".into())
    });

    let output = pipeline.run(&GenerationRequest::new(ARTICLE, 0, GenerationMode::TrueFalse));
    assert_eq!(output.generation.status, GenerationStatus::InputRejected);
    assert_eq!(calls.get(), 0);
}

#[test]
fn unsupported_mode_string_is_an_input_error() {
    assert!(GenerationRequest::parse(ARTICLE, 2, "short_answer").is_err());
    assert_eq!(
        GenerationRequest::parse(ARTICLE, 2, "true-false").unwrap().mode,
        GenerationMode::TrueFalse
    );
}

#[test]
fn generator_failure_becomes_empty_records() {
    let pipeline = StudyPipeline::with_generator(failing);

    let output = pipeline.run(&GenerationRequest::new(ARTICLE, 2, GenerationMode::MultipleChoice));
    assert_eq!(output.generation.status, GenerationStatus::GeneratorFailed);
    assert!(output.generation.status.is_dependency_failure());
    assert!(output.artifact.records().is_empty());
    assert!(output.generation.detail.unwrap().contains("quota exceeded"));
}

#[test]
fn generator_failure_becomes_summary_sentinel() {
    let pipeline = StudyPipeline::with_generator(failing);
    assert_eq!(pipeline.summarize(ARTICLE, 3), "Failed to generate summary.");
}

#[test]
fn quiz_over_requests_and_truncates() {
    let prompt_seen = RefCell::new(String::new());
    let response = r#"```json
[
  {"question": "Q1", "options": ["a","b","c","d"], "answer": "a", "type": "multiple_choice", "explanation": "E1"},
  {"question": "Q2", "options": ["a","b","c"], "answer": "a", "type": "multiple_choice", "explanation": "E2"},
  {"question": "Q3", "options": ["a","b","c","d"], "answer": "b", "type": "multiple_choice", "explanation": "E3"},
  {"question": "Q4", "options": ["a","b","c","d"], "answer": "c", "type": "multiple_choice", "explanation": "E4"}
]
```"#;
    let pipeline = StudyPipeline::with_generator(|prompt: &str| -> Result<String, GeneratorError> {
        *prompt_seen.borrow_mut() = prompt.to_string();
        Ok(response.to_string())
    });

    let output = pipeline.run(&GenerationRequest::new(ARTICLE, 2, GenerationMode::MultipleChoice));

    assert!(prompt_seen.borrow().contains("Generate 4 multiple choice questions"));
    assert_eq!(output.generation.status, GenerationStatus::Completed);
    assert_eq!(output.generation.elements_received, 4);
    assert_eq!(output.generation.elements_dropped, 1);

    let questions: Vec<_> = output
        .artifact
        .records()
        .iter()
        .filter_map(|r| r.get_str("question"))
        .collect();
    assert_eq!(questions, vec!["Q1", "Q3"]);
}

#[test]
fn malformed_response_is_reported_not_raised() {
    let pipeline = StudyPipeline::with_generator(|_prompt: &str| -> Result<String, GeneratorError> {
        Ok("not json at all".into())
    });

    let output = pipeline.run(&GenerationRequest::new(ARTICLE, 2, GenerationMode::Vocabulary));
    assert_eq!(output.generation.status, GenerationStatus::MalformedResponse);
    assert!(output.artifact.records().is_empty());
}

#[test]
fn vocabulary_prompt_carries_candidates() {
    let prompt_seen = RefCell::new(String::new());
    let pipeline = StudyPipeline::with_generator(|prompt: &str| -> Result<String, GeneratorError> {
        *prompt_seen.borrow_mut() = prompt.to_string();
        Ok(r#"[
            {"word": "rainforest", "definition": "A dense tropical forest.", "part_of_speech": "noun"},
            {"word": "deforestation", "definition": "", "part_of_speech": "noun"},
            {"word": "ecosystem", "definition": "A community of organisms.", "part_of_speech": "noun"},
            {"word": "diversity", "definition": "Variety.", "part_of_speech": "noun"}
        ]"#
        .into())
    });

    let output = pipeline.run(&GenerationRequest::new(ARTICLE, 2, GenerationMode::Vocabulary));

    let candidates = &output.generation.candidates;
    assert!(!candidates.is_empty());
    assert!(candidates.len() <= 4);
    assert!(candidates.contains(&"rainforest".to_string()));
    assert!(prompt_seen
        .borrow()
        .contains(&format!("from this list: {}.", candidates.join(", "))));

    let words: Vec<_> = output
        .artifact
        .records()
        .iter()
        .filter_map(|r| r.get_str("word"))
        .collect();
    assert_eq!(words, vec!["rainforest", "ecosystem"]);
    assert_eq!(
        output.generation.source_version.as_deref(),
        Some(SourceVersion::from_text(ARTICLE).as_str())
    );
}

#[test]
fn text_without_words_skips_vocabulary_generation() {
    let calls = Cell::new(0);
    let pipeline = StudyPipeline::with_generator(|_prompt: &str| -> Result<String, GeneratorError> {
        calls.set(calls.get() + 1);
        Ok("[]".into())
    });

    let output = pipeline.run(&GenerationRequest::new("the 42 of and", 3, GenerationMode::Vocabulary));
    assert_eq!(output.generation.status, GenerationStatus::NoCandidates);
    assert_eq!(calls.get(), 0);
}

#[test]
fn summary_is_returned_as_prose() {
    let pipeline = StudyPipeline::with_generator(|prompt: &str| -> Result<String, GeneratorError> {
        assert!(prompt.contains("approximately 2 sentences"));
        Ok("\n  The Amazon is vast. It is under threat.  \n".into())
    });
    assert_eq!(
        pipeline.summarize(ARTICLE, 2),
        "The Amazon is vast. It is under threat."
    );
}

#[test]
fn generate_quiz_refuses_non_quiz_modes() {
    let calls = Cell::new(0);
    let pipeline = StudyPipeline::with_generator(|_prompt: &str| -> Result<String, GeneratorError> {
        calls.set(calls.get() + 1);
        Ok("[]".into())
    });

    assert!(pipeline.generate_quiz(ARTICLE, 2, GenerationMode::Vocabulary).is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn source_version_matches_the_ingested_document() {
    let raw = "Cells divide.\n\n  Cells   grow.\t";
    let pipeline = StudyPipeline::with_generator(|_prompt: &str| -> Result<String, GeneratorError> {
        Ok("A short summary.".into())
    });

    let output = pipeline.run(&GenerationRequest::new(raw, 1, GenerationMode::Summary));
    let document = SourceDocument::from_text("notes.txt", raw);

    assert_eq!(
        output.generation.source_version.as_deref(),
        Some(document.version.as_str())
    );
}

#[test]
fn custom_config_flows_into_prompts() {
    let mut config = PipelineConfig::v0();
    config.over_request = 0;
    config.summary_failure_message = "no summary".into();

    let prompt_seen = RefCell::new(String::new());
    let pipeline = StudyPipeline::new(
        |prompt: &str| -> Result<String, GeneratorError> {
            *prompt_seen.borrow_mut() = prompt.to_string();
            Err(GeneratorError::EmptyResponse)
        },
        Arc::new(LanguageResources::english()),
        config,
    );

    pipeline.generate_quiz(ARTICLE, 3, GenerationMode::TrueFalse);
    assert!(prompt_seen.borrow().contains("Generate 3 true false questions"));
    assert_eq!(pipeline.summarize(ARTICLE, 1), "no summary");
}

#[test]
fn concurrent_requests_share_nothing_mutable() {
    let calls = AtomicUsize::new(0);
    let pipeline = StudyPipeline::with_generator(|prompt: &str| -> Result<String, GeneratorError> {
        calls.fetch_add(1, Ordering::SeqCst);
        let n = if prompt.contains("Generate 3 ") { 1 } else { 2 };
        let items: Vec<String> = (0..n)
            .map(|i| {
                format!(r#"{{"question":"Q{i}","answer":"True","type":"true_false","explanation":"E"}}"#)
            })
            .collect();
        Ok(format!("[{}]", items.join(",")))
    });

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8)
            .map(|count| {
                let pipeline = &pipeline;
                scope.spawn(move || {
                    pipeline
                        .run(&GenerationRequest::new(ARTICLE, count, GenerationMode::TrueFalse))
                        .artifact
                        .records()
                        .len()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let count = i + 1;
            let expected = if count == 1 { 1 } else { count.min(2) };
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 8);
}
