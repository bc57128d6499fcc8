use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings,
    orchestrator::analyze,
    reference::{load_examples, load_syllabary},
    transcribe_and_analyze, AnalysisView, DecodeStep, HttpDecoderClient,
};
use shared::protocol::{ReferenceSign, WorkedExample};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Command-line client for the Linear B decoding service")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transcribe Linear B text; single words are also analyzed.
    Transcribe {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Analyze one transliterated word, e.g. wa-na-ka.
    Analyze { word: String },
    /// List syllabary signs sorted by transliteration.
    Syllabary,
    /// List the worked examples.
    Examples,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let api = HttpDecoderClient::from_settings(&settings)?;
    tracing::debug!(server = %api.base_url(), command = ?args.command, "running");

    match args.command {
        Command::Transcribe { text } => {
            let mut failed = false;
            transcribe_and_analyze(&api, &text.join(" "), |step| match step {
                DecodeStep::Transcribed(Ok(transcription)) => {
                    println!("Transliteration: {}", transcription.transliteration);
                    println!("Phonetic:        {}", transcription.phonetic);
                }
                DecodeStep::Transcribed(Err(err)) => {
                    eprintln!("{}", err.message);
                    failed = true;
                }
                DecodeStep::Analyzed { view, .. } => print_analysis(&view),
            })
            .await;
            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Analyze { word } => match analyze(&api, &word).await {
            Some(view) if view.is_visible() => print_analysis(&view),
            Some(_) => println!("No analysis available for {word}"),
            None => {
                eprintln!("Failed to analyze {word}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Syllabary => {
            let signs = load_syllabary(&api).await?;
            for line in syllabary_lines(&signs) {
                println!("{line}");
            }
        }
        Command::Examples => {
            let examples = load_examples(&api).await?;
            for line in example_lines(&examples) {
                println!("{line}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_analysis(view: &AnalysisView) {
    if !view.is_visible() {
        return;
    }
    println!();
    for line in view.lines() {
        println!("{line}");
    }
}

fn syllabary_lines(signs: &[ReferenceSign]) -> Vec<String> {
    signs
        .iter()
        .map(|s| {
            let phonetic = s.phonetic.as_deref().unwrap_or("");
            let unicode = s.unicode.as_deref().unwrap_or("");
            format!("{}\t{:<6}\t{:<6}\t{}", s.sign, s.transliteration, phonetic, unicode)
                .trim_end()
                .to_string()
        })
        .collect()
}

fn example_lines(examples: &[WorkedExample]) -> Vec<String> {
    examples
        .iter()
        .map(|e| format!("{}\t{}\t{}", e.linear_b, e.name, e.description))
        .collect()
}
