//! Worked JSON examples embedded in prompts.

pub const MULTIPLE_CHOICE_EXAMPLE: &str = r#"[
  {
    "question": "What is the capital of France?",
    "options": ["Berlin", "Madrid", "Paris", "Rome"],
    "answer": "Paris",
    "type": "multiple_choice",
    "explanation": "Paris is the capital and most populous city of France, known globally for its art, fashion, and culture."
  },
  {
    "question": "Which river flows through London?",
    "options": ["Seine", "Thames", "Danube", "Rhine"],
    "answer": "Thames",
    "type": "multiple_choice",
    "explanation": "The River Thames flows through southern England, most notably through London. It is the longest river entirely in England."
  }
]"#;

pub const TRUE_FALSE_EXAMPLE: &str = r#"[
  {
    "question": "The Earth is flat.",
    "answer": "False",
    "type": "true_false",
    "explanation": "The Earth is an oblate spheroid, a sphere flattened at the poles and bulging at the equator, as confirmed by scientific observation and space travel."
  },
  {
    "question": "Photosynthesis is the process by which plants convert light energy into chemical energy.",
    "answer": "True",
    "type": "true_false",
    "explanation": "Photosynthesis occurs in green plants, algae, and some bacteria, using sunlight to synthesize food from carbon dioxide and water."
  }
]"#;

pub const VOCABULARY_EXAMPLE: &str = r#"[
  {
    "word": "Example",
    "definition": "A brief explanation of the word.",
    "part_of_speech": "noun"
  }
]"#;
