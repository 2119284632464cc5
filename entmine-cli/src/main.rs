//! entmine: mine entity phrases from a Wikipedia link graph.
//!
//! ```bash
//! # Score candidates against a document table, writing gzip results
//! entmine mine --candidates phrases.tsv.gz --index docs.tsv.gz \
//!     --redirects redirects.tsv.gz --entities wikidata.tsv.gz --output entities.gz
//!
//! # Keep only high-precision phrase -> entity pairs
//! entmine subset --input entities.gz --output recommended.tsv
//!
//! # Decode character references on stdin
//! entmine decode < titles.txt
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use entmine_analysis::closure::KnowledgeBaseBuilder;
use entmine_analysis::index::MemoryIndex;
use entmine_analysis::loaders::{open_input, OutputSink};
use entmine_analysis::pipeline::MiningPipeline;
use entmine_analysis::subset::SubsetFilter;
use entmine_analysis::text::{decode_entities, normalize_typography};
use entmine_core::config::{CliOverrides, InputsConfig, MinerConfig};
use entmine_core::errors::{ErrorCode, LoadError, OutputError, PipelineError};
use entmine_core::events::EventDispatcher;
use entmine_core::tracing::init_tracing;
use entmine_core::CancellationToken;

#[derive(Parser)]
#[command(name = "entmine", version, about = "Mine entity phrases from a Wikipedia link graph")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score candidate phrases and write confidence-ranked entities
    Mine(MineArgs),
    /// Select phrases whose best entity is trustworthy
    Subset(SubsetArgs),
    /// Decode character references and clean up typography (stdin to stdout)
    Decode,
}

#[derive(clap::Args)]
struct MineArgs {
    /// Directory holding entmine.toml
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Candidate phrase file; stdin when absent
    #[arg(long)]
    candidates: Option<PathBuf>,
    /// Document table (title, text, anchor/target pairs)
    #[arg(long)]
    index: Option<PathBuf>,
    /// Redirect file
    #[arg(long)]
    redirects: Option<PathBuf>,
    /// Cross-lingual entity file
    #[arg(long)]
    entities: Option<PathBuf>,
    /// Result file (.gz for gzip); stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of scoring workers
    #[arg(long, short = 'j')]
    parallelism: Option<usize>,
    /// Minimum raw mentions and sampled documents
    #[arg(long)]
    minimum_mentions: Option<u32>,
    /// Print run statistics as JSON on stderr
    #[arg(long)]
    stats_json: bool,
}

#[derive(clap::Args)]
struct SubsetArgs {
    /// Directory holding entmine.toml
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Result file written by `mine`
    #[arg(long)]
    input: PathBuf,
    /// Destination; stdout when absent
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    min_phrase_chars: Option<usize>,
    #[arg(long)]
    min_hits: Option<u64>,
    #[arg(long)]
    min_trust: Option<u64>,
    #[arg(long)]
    min_trust_exact: Option<u64>,
    /// Also accept best targets without exact anchor matches
    #[arg(long)]
    allow_inexact: bool,
    #[arg(long)]
    min_contrast: Option<u64>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Mine(args) => mine(args),
        Commands::Subset(args) => subset(args),
        Commands::Decode => decode(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(PipelineError::Cancelled) => {
            eprintln!("entmine: interrupted");
            ExitCode::from(130)
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "run failed");
            eprintln!("entmine: {}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}

fn mine(args: MineArgs) -> Result<(), PipelineError> {
    let overrides = CliOverrides {
        candidates: args.candidates,
        index: args.index,
        redirects: args.redirects,
        entities: args.entities,
        output: args.output,
        parallelism: args.parallelism,
        minimum_mentions: args.minimum_mentions,
    };
    let config = MinerConfig::load(&args.root, Some(&overrides))?;
    let inputs = &config.inputs;
    let entities_path = InputsConfig::require("entities", &inputs.entities)?;
    let index_path = InputsConfig::require("index", &inputs.index)?;

    let token = CancellationToken::new();
    register_signals(&token);
    let events = EventDispatcher::new();

    let mut builder = KnowledgeBaseBuilder::new().decode_entities(inputs.effective_decode_entities());
    if let Some(redirects) = &inputs.redirects {
        builder.load_redirects(redirects, &events)?;
    } else {
        tracing::warn!("no redirect file configured, targets resolve only by exact title");
    }
    builder.load_entities(
        entities_path,
        inputs.effective_site(),
        &inputs.effective_excluded_classes(),
        &events,
    )?;
    let knowledge = builder.build(&events);
    let index = MemoryIndex::load_tsv(index_path)?;

    let input: Box<dyn BufRead + Send> = match &inputs.candidates {
        Some(path) => open_input(path).map_err(|source| load_io(path, source))?,
        None => Box::new(io::BufReader::new(io::stdin())),
    };
    let mut sink = OutputSink::create(inputs.output.as_deref())?;

    let pipeline = MiningPipeline::new(&knowledge, &index, &events)
        .with_config(&config)
        .with_cancellation(token);
    let stats = pipeline.run(input, &mut sink)?;
    sink.finish()?;

    if args.stats_json {
        match serde_json::to_string(&stats) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => tracing::warn!(error = %e, "could not serialize run statistics"),
        }
    }
    Ok(())
}

fn subset(args: SubsetArgs) -> Result<(), PipelineError> {
    let config = MinerConfig::load(&args.root, None)?;
    let mut filter = SubsetFilter::from_config(&config.subset);
    if let Some(v) = args.min_phrase_chars {
        filter.min_phrase_chars = v;
    }
    if let Some(v) = args.min_hits {
        filter.min_hits = v;
    }
    if let Some(v) = args.min_trust {
        filter.min_trust = v;
    }
    if let Some(v) = args.min_trust_exact {
        filter.min_trust_exact = v;
    }
    if args.allow_inexact {
        filter.exact_only = false;
    }
    if let Some(v) = args.min_contrast {
        filter.min_contrast = v;
    }

    let input = open_input(&args.input).map_err(|source| load_io(&args.input, source))?;
    let mut sink = OutputSink::create(args.output.as_deref())?;
    let stats = filter
        .filter(input, &mut sink)
        .map_err(|e| PipelineError::Output(OutputError::Write(e)))?;
    sink.finish()?;
    tracing::info!(
        read = stats.read,
        selected = stats.selected,
        unparsable = stats.unparsable,
        "subset complete"
    );
    Ok(())
}

fn decode() -> Result<(), PipelineError> {
    let stdin = io::stdin().lock();
    let mut out = io::BufWriter::new(io::stdout().lock());
    for line in stdin.lines() {
        let line = line.map_err(PipelineError::Input)?;
        let decoded = decode_entities(&line);
        writeln!(out, "{}", normalize_typography(&decoded)).map_err(OutputError::from)?;
    }
    out.flush().map_err(OutputError::from)?;
    Ok(())
}

fn register_signals(token: &CancellationToken) {
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        if let Err(e) = signal_hook::flag::register(signal, token.flag()) {
            tracing::warn!(signal, error = %e, "could not install signal handler");
        }
    }
}

fn load_io(path: &Path, source: io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}
