use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use transcript_align::alignment::flatten::flatten_segments;
use transcript_align::alignment::tokenization::tokenize_original;
use transcript_align::{
    apply_chunk_corrections, AlignerConfig, AlignmentInput, AlignmentResult, AsrSegment,
    AsrTranscript, ChunkTimingPatch, TranscriptAlignerBuilder,
};

#[path = "align_transcript/json_report_formatter.rs"]
mod json_report_formatter;

const DEFAULT_MAX_CELLS: u64 = 25_000_000;

#[derive(Debug, Parser)]
#[command(name = "align_transcript")]
#[command(about = "Map ASR word timings back onto an original text")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Align an ASR transcription against the original text.
    Align(AlignArgs),
    /// Apply chunk start/end corrections to a stored alignment result.
    Correct(CorrectArgs),
}

#[derive(Debug, clap::Args)]
struct AlignArgs {
    /// Original UTF-8 text.
    #[arg(long, env = "TRANSCRIPT_ALIGN_TEXT")]
    text: PathBuf,
    /// ASR JSON: an object with `segments`, or a bare segment array.
    #[arg(long, env = "TRANSCRIPT_ALIGN_ASR")]
    asr: PathBuf,
    #[arg(long, env = "TRANSCRIPT_ALIGN_CONFIG")]
    config: Option<PathBuf>,
    /// Result JSON path; stdout when omitted.
    #[arg(long, env = "TRANSCRIPT_ALIGN_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "TRANSCRIPT_ALIGN_REPORT")]
    report: Option<PathBuf>,
    /// Upper bound on original words × ASR words.
    #[arg(long, env = "TRANSCRIPT_ALIGN_MAX_CELLS", default_value_t = DEFAULT_MAX_CELLS)]
    max_cells: u64,
}

#[derive(Debug, clap::Args)]
struct CorrectArgs {
    /// Alignment result JSON produced by `align`.
    #[arg(long)]
    result: PathBuf,
    /// JSON array of `{index, start, end}` chunk patches.
    #[arg(long)]
    patches: PathBuf,
    /// Corrected result path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    match Args::parse().command {
        Command::Align(args) => run_align(args),
        Command::Correct(args) => run_correct(args),
    }
}

fn run_align(args: AlignArgs) -> Result<(), String> {
    let config = match args.config.as_deref() {
        Some(path) => AlignerConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AlignerConfig::default(),
    };

    let original_text = read_to_string(&args.text)?;
    let segments = load_segments(&args.asr)?;

    let word_count = tokenize_original(&original_text).len() as u64;
    let timed_count = flatten_segments(&segments).len() as u64;
    let cells = (word_count + 1).saturating_mul(timed_count + 1);
    if cells > args.max_cells {
        return Err(format!(
            "alignment table too large: {word_count} words x {timed_count} ASR words \
             exceeds --max-cells {}; split the text first",
            args.max_cells
        ));
    }

    let aligner = TranscriptAlignerBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build aligner: {err}"))?;
    let input = AlignmentInput {
        original_text,
        segments,
    };
    let (result, report) = aligner.align_with_report(&input);

    tracing::info!(
        words = report.counts.word_count,
        matched = report.counts.matched_word_count,
        interpolated = report.counts.interpolated_word_count,
        chunks = report.counts.chunk_count,
        "alignment finished"
    );

    json_report_formatter::write_json(args.out.as_deref(), &result)?;
    if let Some(report_path) = args.report.as_deref() {
        json_report_formatter::write_json(Some(report_path), &report)?;
    }
    Ok(())
}

fn run_correct(args: CorrectArgs) -> Result<(), String> {
    let result: AlignmentResult = parse_json(&args.result)?;
    let patches: Vec<ChunkTimingPatch> = parse_json(&args.patches)?;
    let corrected = apply_chunk_corrections(&result, &patches).map_err(|err| err.to_string())?;
    json_report_formatter::write_json(args.out.as_deref(), &corrected)
}

fn load_segments(path: &Path) -> Result<Vec<AsrSegment>, String> {
    let value: Value = parse_json(path)?;
    if value.is_array() {
        return serde_json::from_value(value)
            .map_err(|err| format!("Invalid ASR segments in '{}': {err}", path.display()));
    }
    if value.get("segments").is_none() {
        return Err(format!(
            "Transcription response '{}' is missing segments",
            path.display()
        ));
    }
    let transcript: AsrTranscript = serde_json::from_value(value)
        .map_err(|err| format!("Invalid ASR response in '{}': {err}", path.display()))?;
    Ok(transcript.segments)
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse JSON '{}': {err}", path.display()))
}

fn read_to_string(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}
