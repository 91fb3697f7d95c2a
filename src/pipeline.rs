use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::document::clean_text;
use crate::generator::TextGenerator;
use crate::nlp::{LanguageResources, Normalizer};
use crate::prompt::PromptBuilder;
use crate::response::{extract_json_candidate, validate_response};
use crate::selection::{CandidateSelection, CandidateSelector};
use crate::types::identifiers::SourceVersion;
use crate::types::output::{Artifact, GenerationMetadata, GenerationStatus, StudyOutput};
use crate::types::record::Record;
use crate::types::request::{GenerationMode, GenerationRequest};

const RAW_PREVIEW_CHARS: usize = 500;

/// Text in, validated study artifacts out.
///
/// Every request builds its own token sequence, frequency table and result
/// set; the only shared state is the immutable language resources.
pub struct StudyPipeline<G> {
    generator: G,
    resources: Arc<LanguageResources>,
    config: PipelineConfig,
    prompts: PromptBuilder,
    selector: CandidateSelector,
}

impl<G: TextGenerator> StudyPipeline<G> {
    pub fn new(generator: G, resources: Arc<LanguageResources>, config: PipelineConfig) -> Self {
        let prompts = PromptBuilder::new(config.prompt_limits());
        let selector = CandidateSelector::new(config.candidates.clone());
        Self {
            generator,
            resources,
            config,
            prompts,
            selector,
        }
    }

    /// Pipeline over the shared English resources and `v0` config.
    pub fn with_generator(generator: G) -> Self {
        Self::new(generator, LanguageResources::shared(), PipelineConfig::v0())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Vocabulary candidates for a text. No external call.
    pub fn vocabulary_candidates(&self, text: &str, requested_count: usize) -> CandidateSelection {
        let tokens = Normalizer::new(&self.resources).normalize(text);
        self.selector.select(&tokens, requested_count)
    }

    /// Run one request. Never fails; problems are reported in the metadata.
    pub fn run(&self, request: &GenerationRequest) -> StudyOutput {
        let mode = request.mode;
        let mut meta = GenerationMetadata::new(mode, request.requested_count);

        if let Err(rejection) = request.check() {
            tracing::info!(%mode, reason = %rejection, "request rejected before generation");
            meta.status = GenerationStatus::InputRejected;
            meta.detail = Some(rejection.to_string());
            return StudyOutput {
                artifact: Artifact::empty(mode),
                generation: meta,
            };
        }

        // Same hash a SourceDocument built from this text would carry.
        let version = SourceVersion::from_text(&clean_text(&request.source_text));
        meta.source_version = Some(version.as_str().to_string());

        // 1. Candidates (vocabulary only)
        if mode == GenerationMode::Vocabulary {
            let selection = self.vocabulary_candidates(&request.source_text, request.requested_count);
            if selection.words.is_empty() {
                tracing::info!(%mode, "no vocabulary candidates in source text");
                meta.status = GenerationStatus::NoCandidates;
                return StudyOutput {
                    artifact: Artifact::empty(mode),
                    generation: meta,
                };
            }
            meta.candidates = selection.words;
        }

        // 2. Prompt
        let prompt = self.prompts.build(
            mode,
            &request.source_text,
            &meta.candidates,
            request.requested_count,
        );
        meta.prompt_chars = prompt.chars().count();
        tracing::debug!(%mode, prompt_chars = meta.prompt_chars, "prompt built");

        // 3. External call
        let raw = match self.generator.generate(&prompt) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%mode, error = %e, "text generation failed");
                meta.status = GenerationStatus::GeneratorFailed;
                meta.detail = Some(e.to_string());
                let artifact = match mode {
                    GenerationMode::Summary => {
                        Artifact::Summary(self.config.summary_failure_message.clone())
                    }
                    _ => Artifact::Records(Vec::new()),
                };
                return StudyOutput {
                    artifact,
                    generation: meta,
                };
            }
        };

        let candidate = extract_json_candidate(&raw);

        if mode == GenerationMode::Summary {
            tracing::info!(%mode, chars = candidate.chars().count(), "summary generated");
            return StudyOutput {
                artifact: Artifact::Summary(candidate.to_string()),
                generation: meta,
            };
        }

        // 4. Validate, filter, truncate
        let report = validate_response(candidate, mode, request.requested_count);
        meta.elements_received = report.received;
        meta.elements_dropped = report.dropped;

        if let Some(reason) = report.malformed {
            tracing::warn!(
                %mode,
                raw = %crate::prompt::clip_chars(&raw, RAW_PREVIEW_CHARS),
                "raw generator response"
            );
            meta.status = GenerationStatus::MalformedResponse;
            meta.detail = Some(reason.to_string());
        }

        tracing::info!(
            %mode,
            requested = request.requested_count,
            received = report.received,
            dropped = report.dropped,
            returned = report.records.len(),
            "records generated"
        );

        StudyOutput {
            artifact: Artifact::Records(report.records),
            generation: meta,
        }
    }

    /// Multiple-choice or true/false questions; empty on any failure.
    pub fn generate_quiz(&self, text: &str, num_questions: usize, mode: GenerationMode) -> Vec<Record> {
        if !mode.is_quiz() {
            tracing::warn!(%mode, "unsupported question type");
            return Vec::new();
        }
        self.run(&GenerationRequest::new(text, num_questions, mode))
            .artifact
            .into_records()
    }

    /// Vocabulary entries; empty on any failure.
    pub fn extract_vocabulary(&self, text: &str, num_words: usize) -> Vec<Record> {
        self.run(&GenerationRequest::new(text, num_words, GenerationMode::Vocabulary))
            .artifact
            .into_records()
    }

    /// A summary of about `num_sentences` sentences; empty for empty text, the
    /// configured failure message if generation fails.
    pub fn summarize(&self, text: &str, num_sentences: usize) -> String {
        match self
            .run(&GenerationRequest::new(text, num_sentences, GenerationMode::Summary))
            .artifact
        {
            Artifact::Summary(summary) => summary,
            Artifact::Records(_) => String::new(),
        }
    }
}
