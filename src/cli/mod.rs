//! # CLI Module
//!
//! Command-line interface for the frame authenticity detector.
//!
//! ## Usage
//! ```bash
//! # Analyze up to five frames with the default (mock) engine
//! aitube analyze a.jpg b.jpg c.jpg
//!
//! # Real extractors, JSON output
//! aitube analyze a.jpg b.jpg --engine heuristic --face-model seeta.bin --output json
//!
//! # Per-frame diagnostics
//! aitube inspect a.jpg
//!
//! # Version, engine health and effective configuration
//! aitube info
//! ```
//!
//! `USE_REAL_AI_MODEL`, `FACE_MODEL_PATH`, `ANALYSIS_TIMEOUT` and `DEBUG`
//! are read from the environment when the matching flag is absent. The two
//! switches count as off for `0`, `false`, `no`, `off`, `n`, `f` (any case)
//! or an empty value, and as on for anything else.

use aitube_detector::core::analyzer::{AnalysisEnvelope, Analyzer};
use aitube_detector::core::config::AnalysisConfig;
use aitube_detector::core::engine::EngineKind;
use aitube_detector::core::fusion::ConfidenceLevel;
use aitube_detector::core::ingest::load_frames_with_events;
use aitube_detector::core::vision::{inspect_frame, FrameInspection};
use aitube_detector::error::{AnalysisError, DetectorError, Result};
use aitube_detector::events::{event_channel, AnalysisEvent, Event, IngestEvent};
use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// AITube Detector - is this footage synthetic?
#[derive(Parser, Debug)]
#[command(name = "aitube")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, env = "DEBUG", value_parser = FalseyValueParser::new())]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate whether a sequence of frames is AI-generated
    Analyze {
        /// Image files, in frame order (1-5)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Print per-frame diagnostics (quality, edges, FFT pattern, LBP)
    Inspect {
        /// Image files (1-5)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Show version, engine health and configuration
    Info {
        #[command(flatten)]
        engine: EngineArgs,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Detection engine (overrides USE_REAL_AI_MODEL)
    #[arg(short, long)]
    engine: Option<Engine>,

    /// Use the heuristic engine when --engine is not given
    #[arg(long, env = "USE_REAL_AI_MODEL", value_parser = FalseyValueParser::new())]
    use_real_ai_model: bool,

    /// SeetaFace frontal face model for the heuristic engine
    #[arg(long, env = "FACE_MODEL_PATH")]
    face_model: Option<PathBuf>,

    /// Analysis time budget in seconds
    #[arg(short, long, env = "ANALYSIS_TIMEOUT", default_value_t = 2.0)]
    timeout: f64,
}

impl EngineArgs {
    fn to_config(&self) -> Result<AnalysisConfig> {
        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            return Err(DetectorError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout
            )));
        }

        let kind = match self.engine {
            Some(engine) => engine.into(),
            None if self.use_real_ai_model => EngineKind::Heuristic,
            None => EngineKind::Mock,
        };

        let mut config = AnalysisConfig::new()
            .engine(kind)
            .timeout(Duration::from_secs_f64(self.timeout));
        if let Some(path) = &self.face_model {
            config = config.face_model(path.clone());
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Engine {
    /// Fixed signal values, no image analysis
    Mock,
    /// Face, temporal, artifact and content-type extractors
    Heuristic,
}

impl From<Engine> for EngineKind {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::Mock => EngineKind::Mock,
            Engine::Heuristic => EngineKind::Heuristic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    aitube_detector::init_tracing(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Analyze {
            files,
            engine,
            output,
        } => run_analyze(files, engine.to_config()?, output),
        Commands::Inspect { files, output } => run_inspect(files, output),
        Commands::Info { engine, output } => run_info(engine.to_config()?, output),
    }
}

fn run_analyze(files: Vec<PathBuf>, config: AnalysisConfig, output: OutputFormat) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);

    if pretty {
        print_header(&term);
    }

    let analyzer = Analyzer::from_config(&config)?;

    let (sender, receiver) = event_channel();

    let progress = if pretty {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Ingest(IngestEvent::FrameLoaded { index, path, .. }) => {
                    pb.set_message(format!(
                        "Loaded frame {} ({})",
                        index + 1,
                        path.file_name().unwrap_or_default().to_string_lossy()
                    ));
                }
                Event::Analysis(AnalysisEvent::Started { frames }) => {
                    pb.set_message(format!("Analyzing {frames} frame(s)"));
                }
                Event::Analysis(AnalysisEvent::SignalCompleted { signal, duration_ms }) => {
                    pb.set_message(format!("{signal} done ({duration_ms} ms)"));
                }
                Event::Analysis(
                    AnalysisEvent::Completed { .. }
                    | AnalysisEvent::Failed { .. }
                    | AnalysisEvent::TimedOut,
                ) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let outcome = load_frames_with_events(&files, &config.limits, &sender)
        .map_err(DetectorError::from)
        .and_then(|frames| {
            analyzer
                .analyze_with_events(&frames, &sender)
                .map_err(DetectorError::from)
        });

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    analyzer.cleanup();

    let envelope = outcome?;

    match output {
        OutputFormat::Pretty => print_pretty_envelope(&term, &envelope),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&envelope)?),
    }

    Ok(())
}

fn run_inspect(files: Vec<PathBuf>, output: OutputFormat) -> Result<()> {
    let config = AnalysisConfig::default();
    let frames = load_frames_with_events(&files, &config.limits, &aitube_detector::events::null_sender())?;

    let inspections = frames
        .iter()
        .enumerate()
        .map(|(i, frame)| inspect_frame(frame, i))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(AnalysisError::from)?;

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            for (path, inspection) in files.iter().zip(&inspections) {
                print_pretty_inspection(&term, path, inspection);
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = files
                .iter()
                .zip(&inspections)
                .map(|(path, inspection)| {
                    serde_json::json!({
                        "path": path,
                        "inspection": inspection,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn run_info(config: AnalysisConfig, output: OutputFormat) -> Result<()> {
    let (healthy, engine_error) = match Analyzer::from_config(&config) {
        Ok(analyzer) => {
            analyzer.cleanup();
            (true, None)
        }
        Err(e) => (false, Some(e.to_string())),
    };

    let commands = [
        ("analyze", "Estimate whether frames are AI-generated"),
        ("inspect", "Per-frame diagnostics"),
        ("info", "This summary"),
    ];

    match output {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "status": if healthy { "healthy" } else { "unhealthy" },
                "engine_loaded": healthy,
                "engine_error": engine_error,
                "commands": commands.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
                "config": config.summary(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            let term = Term::stdout();
            print_header(&term);

            let status = if healthy {
                style("healthy").green().bold()
            } else {
                style("unhealthy").red().bold()
            };
            term.write_line(&format!(
                "  Engine: {} ({})",
                style(config.engine).cyan(),
                status
            ))
            .ok();
            term.write_line(&format!("  {}", style(config.engine.description()).dim()))
                .ok();
            if let Some(error) = engine_error {
                term.write_line(&format!("  {}", style(error).red())).ok();
            }
            term.write_line("").ok();

            term.write_line(&format!("{}", style("Commands:").bold().underlined()))
                .ok();
            for (name, about) in commands {
                term.write_line(&format!("  {:<10} {}", style(name).cyan(), about))
                    .ok();
            }
            term.write_line("").ok();

            let summary = config.summary();
            term.write_line(&format!("{}", style("Configuration:").bold().underlined()))
                .ok();
            term.write_line(&format!("  timeout            {:.1}s", summary.timeout_secs))
                .ok();
            term.write_line(&format!("  workers            {}", summary.workers))
                .ok();
            term.write_line(&format!(
                "  frames             {}-{}",
                summary.min_frames, summary.max_frames
            ))
            .ok();
            term.write_line(&format!(
                "  max file size      {}",
                format_bytes(summary.max_file_size)
            ))
            .ok();
            term.write_line(&format!(
                "  extensions         {}",
                summary.allowed_extensions.join(", ")
            ))
            .ok();
            term.write_line(&format!(
                "  decision threshold > {}",
                summary.decision_threshold
            ))
            .ok();
            term.write_line(&format!(
                "  weights            face {} / temporal {} / artifacts {} / animal {}",
                summary.weights.face_consistency,
                summary.weights.temporal_consistency,
                summary.weights.ai_artifacts,
                summary.weights.animal_penalty
            ))
            .ok();
        }
    }

    Ok(())
}

fn print_header(term: &Term) {
    term.write_line(&format!(
        "{} {}",
        style("AITube Detector").bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    term.write_line("").ok();
}

fn print_pretty_envelope(term: &Term, envelope: &AnalysisEnvelope) {
    let verdict = if envelope.is_ai_generated() {
        style("Likely AI-generated").red().bold()
    } else {
        style("Likely authentic").green().bold()
    };
    let confidence = match envelope.confidence_level() {
        ConfidenceLevel::Low => style("low").dim(),
        ConfidenceLevel::Medium => style("medium").yellow(),
        ConfidenceLevel::High => style("high").cyan(),
    };

    term.write_line(&format!("{} {}", style("●").bold(), verdict)).ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} AI probability ({} confidence)",
        style(format!("{:.3}", envelope.ai_probability())).cyan(),
        confidence
    ))
    .ok();

    let details = &envelope.analysis_details;
    term.write_line(&format!(
        "  {} face consistency (faces per frame: {:?})",
        style(format!("{:.3}", details.face_analysis.face_consistency)).cyan(),
        details.face_analysis.face_count
    ))
    .ok();
    term.write_line(&format!(
        "  {} temporal consistency (mean frame difference {:.2})",
        style(format!("{:.3}", details.frame_analysis.temporal_consistency)).cyan(),
        details.frame_analysis.frame_diff_score
    ))
    .ok();
    term.write_line(&format!(
        "  {} artifact score",
        style(format!("{:.3}", details.artifact_analysis.ai_artifact_score)).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} animal content",
        style(if details.is_animal_content { "yes" } else { "no" }).cyan()
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!("{}", style("Recommendations:").bold().underlined()))
        .ok();
    for recommendation in &envelope.recommendations {
        term.write_line(&format!("  {} {}", style("→").yellow(), recommendation))
            .ok();
    }
    term.write_line("").ok();

    term.write_line(&format!("{}", style("Limitations:").dim())).ok();
    for limitation in &envelope.limitations {
        term.write_line(&format!("  {}", style(limitation).dim())).ok();
    }
    term.write_line("").ok();

    term.write_line(&format!(
        "{}",
        style(format!(
            "{} engine, {:.2}s",
            details.engine, envelope.total_processing_time
        ))
        .dim()
    ))
    .ok();
}

fn print_pretty_inspection(term: &Term, path: &std::path::Path, inspection: &FrameInspection) {
    term.write_line(&format!(
        "{} {}x{}",
        style(path.display()).bold(),
        inspection.width,
        inspection.height
    ))
    .ok();
    term.write_line(&format!(
        "  blur variance      {:.2}",
        inspection.quality.blur_variance
    ))
    .ok();
    term.write_line(&format!("  noise              {:.2}", inspection.quality.noise))
        .ok();
    term.write_line(&format!("  contrast           {:.3}", inspection.quality.contrast))
        .ok();
    term.write_line(&format!("  edge density       {:.4}", inspection.edge_density))
        .ok();
    term.write_line(&format!(
        "  pattern score      {:.4}",
        inspection.repetitive_pattern_score
    ))
    .ok();

    if let Some((code, count)) = inspection
        .lbp_histogram
        .iter()
        .enumerate()
        .max_by_key(|(_, count)| **count)
    {
        term.write_line(&format!(
            "  dominant LBP code  {} ({} px)",
            style(code).cyan(),
            count
        ))
        .ok();
    }
    term.write_line("").ok();
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
