use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;
use serde::Serialize;

use libpinyin::{Engine, PinyinConfig, Segment};

/// Split raw pinyin into every plausible syllable segmentation.
#[derive(ClapParser, Debug)]
#[command(name = "pinyin-segment", version, about)]
struct Cli {
    /// Inputs to segment; lines are read from stdin when none are given
    inputs: Vec<String>,

    /// Show at most this many segmentations per input
    #[arg(short = 'k', long, default_value_t = 5)]
    top: usize,

    /// Print one JSON object per input instead of text
    #[arg(long)]
    json: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Syllable table (one per line) replacing the built-in pinyin table
    #[arg(long)]
    syllables: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    segments: Vec<ScoredSegment<'a>>,
}

#[derive(Serialize)]
struct ScoredSegment<'a> {
    incompleteness: usize,
    units: &'a Segment,
}

fn print_text(out: &mut impl Write, input: &str, segments: &[Segment]) -> io::Result<()> {
    writeln!(out, "{}", input)?;
    if segments.is_empty() {
        writeln!(out, "  → (nothing to segment)")?;
    }
    for (i, seg) in segments.iter().enumerate() {
        let kinds: Vec<String> = seg.iter().map(|u| format!("{:?}", u.kind)).collect();
        writeln!(
            out,
            "  {}. {}  (score: {}, {})",
            i + 1,
            seg,
            seg.incompleteness(),
            kinds.join(" ")
        )?;
    }
    Ok(())
}

fn print_json(out: &mut impl Write, input: &str, segments: &[Segment]) -> anyhow::Result<()> {
    let report = Report {
        input,
        segments: segments
            .iter()
            .map(|seg| ScoredSegment {
                incompleteness: seg.incompleteness(),
                units: seg,
            })
            .collect(),
    };
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => PinyinConfig::load_toml(path)?,
        None => PinyinConfig::default(),
    };
    if cli.syllables.is_some() {
        config.syllable_table = cli.syllables.clone();
    }
    let engine = Engine::from_config(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handle = |input: &str| -> anyhow::Result<()> {
        let segments = engine.input_top_k(input, cli.top);
        if cli.json {
            print_json(&mut out, input, &segments)
        } else {
            print_text(&mut out, input, &segments).context("writing output")
        }
    };

    if cli.inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            handle(input)?;
        }
    } else {
        for input in &cli.inputs {
            handle(input)?;
        }
    }

    let (hits, misses) = engine.cache_stats();
    tracing::debug!(hits, misses, "segment cache");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
