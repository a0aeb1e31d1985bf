use std::path::PathBuf;
use std::process;

use clap::Parser;

use facetrack_core::events::infrastructure::action_log_sink::ActionLogSink;
use facetrack_core::pipeline::frame_report::FrameReport;
use facetrack_core::pipeline::track_identity_use_case::TrackIdentityUseCase;
use facetrack_core::recognition::infrastructure::json_lines_recognizer::JsonLinesRecognizer;
use facetrack_core::shared::config::TrackerConfig;
use facetrack_core::tracking::domain::tracking_overlay::LogOverlay;

/// Follow one person through recorded face recognition output and log
/// their head, eye and mouth behavior.
#[derive(Parser)]
#[command(name = "facetrack")]
struct Cli {
    /// Recognizer output: one JSON array of faces per line, one line per frame.
    observations: PathBuf,

    /// Config file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enrolled name of the person to track.
    #[arg(long)]
    target: Option<String>,

    /// Recognition similarity that must be exceeded to start tracking (0.0-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Consecutive frames the target may be missing before tracking stops.
    #[arg(long)]
    max_missing: Option<u32>,

    /// Nose movement between frames, in pixels, reported as a head movement.
    #[arg(long)]
    head_threshold: Option<f64>,

    /// Mouth corner span, in pixels, reported as a smile.
    #[arg(long)]
    smile_threshold: Option<f64>,

    /// Eye openness below which a frame counts as eyes closed.
    #[arg(long)]
    blink_threshold: Option<f64>,

    /// Directory for the action log file.
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if !cli.observations.exists() {
        return Err(format!(
            "Observations file not found: {}",
            cli.observations.display()
        )
        .into());
    }

    let mut recognizer = JsonLinesRecognizer::open(&cli.observations)?;
    let mut use_case = TrackIdentityUseCase::new(
        &config,
        Box::new(ActionLogSink::new(&cli.log_dir)),
        Box::new(LogOverlay::new()),
    )?;

    log::info!(
        "Tracking {} (confidence > {}, up to {} missed frames)",
        config.target_identity,
        config.confidence_threshold,
        config.max_missing_frames
    );
    let stats = use_case.run(&mut recognizer, report_frame);
    log::info!("\n\n{}", stats.summary_string());
    Ok(())
}

/// Loads the config file and applies command-line overrides. The result is
/// validated when the tracker is built.
fn build_config(cli: &Cli) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    let mut config = TrackerConfig::load_or_default(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut TrackerConfig, cli: &Cli) {
    if let Some(target) = &cli.target {
        config.target_identity = target.clone();
    }
    if let Some(v) = cli.confidence {
        config.confidence_threshold = v;
    }
    if let Some(v) = cli.max_missing {
        config.max_missing_frames = v;
    }
    if let Some(v) = cli.head_threshold {
        config.head_movement_threshold = v;
    }
    if let Some(v) = cli.smile_threshold {
        config.smile_threshold = v;
    }
    if let Some(v) = cli.blink_threshold {
        config.blink_threshold = v;
    }
}

fn report_frame(report: &FrameReport) {
    if let Some(transition) = &report.transition {
        log::debug!("Frame {}: {transition}", report.frame_index);
    }
    if report.rejected > 0 {
        log::debug!(
            "Frame {}: {} malformed face(s) skipped",
            report.frame_index,
            report.rejected
        );
    }
}
