use crate::document::clean_text;
use crate::prompt::templates::{MULTIPLE_CHOICE_EXAMPLE, TRUE_FALSE_EXAMPLE, VOCABULARY_EXAMPLE};
use crate::types::request::GenerationMode;

/// Character budgets and over-request margin for prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLimits {
    pub over_request: usize,
    pub quiz_chars: usize,
    pub summary_chars: usize,
    pub vocabulary_chars: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            over_request: 2,
            quiz_chars: 8000,
            summary_chars: 4000,
            vocabulary_chars: 2000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    limits: PromptLimits,
}

impl PromptBuilder {
    pub fn new(limits: PromptLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PromptLimits {
        &self.limits
    }

    /// How many items the prompt asks for. Quiz modes ask for a few extra
    /// to absorb elements the validator will drop.
    pub fn prompt_count(&self, mode: GenerationMode, requested_count: usize) -> usize {
        if mode.is_quiz() {
            requested_count.saturating_add(self.limits.over_request)
        } else {
            requested_count
        }
    }

    pub fn char_budget(&self, mode: GenerationMode) -> usize {
        match mode {
            GenerationMode::MultipleChoice | GenerationMode::TrueFalse => self.limits.quiz_chars,
            GenerationMode::Vocabulary => self.limits.vocabulary_chars,
            GenerationMode::Summary => self.limits.summary_chars,
        }
    }

    /// Build the instruction string for one request.
    ///
    /// `candidates` is only used in vocabulary mode.
    pub fn build(
        &self,
        mode: GenerationMode,
        source_text: &str,
        candidates: &[String],
        requested_count: usize,
    ) -> String {
        let count = self.prompt_count(mode, requested_count);
        let budget = self.char_budget(mode);

        match mode {
            GenerationMode::MultipleChoice => {
                let text = clean_text(source_text);
                format!(
                    "Generate {count} {kind} questions about the following text.\n\
                     For each question, provide 4 options (A, B, C, D), indicating the correct answer.\n\
                     For each question, also provide a concise 'explanation' (as a string) that elaborates on why the correct answer is right or gives additional context.\n\
                     The output MUST be a JSON array of objects. Each object MUST have 'question' (string), 'options' (an array of 4 strings), 'answer' (the correct option string), 'type' (always 'multiple_choice'), and 'explanation' (a string).\n\n\
                     Example JSON structure:\n{MULTIPLE_CHOICE_EXAMPLE}\n\n\
                     Text to generate questions from:\n{body}\n",
                    kind = mode.display_name(),
                    body = clip_chars(&text, budget),
                )
            }
            GenerationMode::TrueFalse => {
                let text = clean_text(source_text);
                format!(
                    "Generate {count} {kind} questions about the following text.\n\
                     For each question, the answer should be either \"True\" or \"False\".\n\
                     For each question, also provide a concise 'explanation' (as a string) that elaborates on why the answer is correct or gives additional context.\n\
                     The output MUST be a JSON array of objects. Each object MUST have 'question' (string), 'answer' (\"True\" or \"False\" string), 'type' (always 'true_false'), and 'explanation' (a string).\n\n\
                     Example JSON structure:\n{TRUE_FALSE_EXAMPLE}\n\n\
                     Text to generate questions from:\n{body}\n",
                    kind = mode.display_name(),
                    body = clip_chars(&text, budget),
                )
            }
            GenerationMode::Vocabulary => format!(
                "Given the following text, identify the {count} most important and relevant vocabulary words from this list: {list}.\n\
                 Choose exactly {count} words. For each word, provide a concise definition and its part of speech.\n\n\
                 Format the result as a JSON array of objects with 'word', 'definition' and 'part_of_speech', like this:\n{VOCABULARY_EXAMPLE}\n\n\
                 Text to analyze:\n{body}\n",
                list = candidates.join(", "),
                body = clip_chars(source_text, budget),
            ),
            GenerationMode::Summary => format!(
                "Summarize the following text concisely into approximately {count} sentences.\n\
                 Focus on the main points and key information.\n\n\
                 Text to summarize:\n{body}\n",
                body = clip_chars(source_text, budget),
            ),
        }
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
