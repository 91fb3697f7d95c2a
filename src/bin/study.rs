use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use study_core::document::{SourceDocument, SourceError};
use study_core::generator::GeminiGenerator;
use study_core::nlp::LanguageResources;
use study_core::types::{GenerationMode, GenerationRequest, GenerationStatus, Record, StudyOutput};
use study_core::{PipelineConfig, StudyPipeline};

const EXIT_INPUT: u8 = 2;
const EXIT_GENERATOR: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "study")]
#[command(about = "Generate quizzes, vocabulary lists and summaries from a document", long_about = None)]
struct Cli {
    /// TOML config file (defaults apply for anything it leaves out).
    #[arg(long, env = "STUDY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate quiz questions.
    Quiz {
        /// PDF or UTF-8 text file.
        file: PathBuf,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long, value_enum)]
        kind: Option<QuizKind>,
    },
    /// Extract vocabulary words with definitions.
    Vocab {
        file: PathBuf,
        #[arg(long)]
        count: Option<usize>,
    },
    /// Summarize the document.
    Summary {
        file: PathBuf,
        #[arg(long)]
        sentences: Option<usize>,
    },
    /// Quiz questions plus vocabulary in one response.
    Bundle {
        file: PathBuf,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long, value_enum)]
        kind: Option<QuizKind>,
    },
    /// Print vocabulary candidates without calling the generator.
    Candidates {
        file: PathBuf,
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QuizKind {
    MultipleChoice,
    TrueFalse,
}

impl From<QuizKind> for GenerationMode {
    fn from(kind: QuizKind) -> Self {
        match kind {
            QuizKind::MultipleChoice => GenerationMode::MultipleChoice,
            QuizKind::TrueFalse => GenerationMode::TrueFalse,
        }
    }
}

#[derive(Serialize)]
struct Bundle {
    questions: Vec<Record>,
    vocabulary: Vec<Record>,
}

#[derive(Serialize)]
struct CandidateReport<'a> {
    source_version: &'a str,
    requested_count: usize,
    used_fallback: bool,
    candidates: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            let input_error = e
                .chain()
                .any(|cause| cause.downcast_ref::<SourceError>().is_some());
            ExitCode::from(if input_error { EXIT_INPUT } else { 1 })
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = PipelineConfig::load(cli.config.as_deref()).context("loading config")?;
    let resources = Arc::new(LanguageResources::load(&config.language).context("loading language resources")?);
    let defaults = config.defaults.clone();

    if let Commands::Candidates { file, count } = &cli.command {
        let source = load_source(file)?;
        let count = count.unwrap_or(defaults.num_words);
        let pipeline = StudyPipeline::new(NoGenerator, resources, config);
        let selection = pipeline.vocabulary_candidates(&source.text, count);
        print_json(&CandidateReport {
            source_version: source.version.as_str(),
            requested_count: count,
            used_fallback: selection.used_fallback,
            candidates: selection.words,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    let generator = GeminiGenerator::from_env().context("configuring text generator")?;
    tracing::debug!(model = generator.model(), "text generator ready");
    let pipeline = StudyPipeline::new(generator, resources, config);

    match cli.command {
        Commands::Quiz { file, count, kind } => {
            let source = load_source(&file)?;
            let mode = kind.map(GenerationMode::from).unwrap_or(defaults.question_mode);
            let count = count.unwrap_or(defaults.num_questions);
            let output = pipeline.run(&GenerationRequest::new(source.text, count, mode));
            finish(&output)
        }
        Commands::Vocab { file, count } => {
            let source = load_source(&file)?;
            let count = count.unwrap_or(defaults.num_words);
            let output = pipeline.run(&GenerationRequest::new(source.text, count, GenerationMode::Vocabulary));
            finish(&output)
        }
        Commands::Summary { file, sentences } => {
            let source = load_source(&file)?;
            let count = sentences.unwrap_or(defaults.num_sentences);
            let output = pipeline.run(&GenerationRequest::new(source.text, count, GenerationMode::Summary));
            finish(&output)
        }
        Commands::Bundle { file, count, kind } => {
            let source = load_source(&file)?;
            let mode = kind.map(GenerationMode::from).unwrap_or(defaults.question_mode);
            let questions = pipeline.run(&GenerationRequest::new(
                source.text.clone(),
                count.unwrap_or(defaults.num_questions),
                mode,
            ));
            let vocabulary = pipeline.run(&GenerationRequest::new(
                source.text,
                defaults.num_words,
                GenerationMode::Vocabulary,
            ));
            let failed = questions.generation.status.is_dependency_failure()
                && vocabulary.generation.status.is_dependency_failure();
            print_json(&Bundle {
                questions: questions.artifact.into_records(),
                vocabulary: vocabulary.artifact.into_records(),
            })?;
            Ok(if failed {
                ExitCode::from(EXIT_GENERATOR)
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Candidates { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn load_source(path: &Path) -> Result<SourceDocument> {
    let source = SourceDocument::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(origin = %source.origin, version = %source.version.as_str(), chars = source.text.chars().count(), "source loaded");
    Ok(source)
}

fn finish(output: &StudyOutput) -> Result<ExitCode> {
    print_json(output)?;
    Ok(match output.generation.status {
        GenerationStatus::InputRejected => ExitCode::from(EXIT_INPUT),
        GenerationStatus::GeneratorFailed => ExitCode::from(EXIT_GENERATOR),
        _ => ExitCode::SUCCESS,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Stand-in for commands that never reach the generator.
struct NoGenerator;

impl study_core::generator::TextGenerator for NoGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, study_core::generator::GeneratorError> {
        Err(study_core::generator::GeneratorError::NotConfigured(
            "offline command".into(),
        ))
    }
}
