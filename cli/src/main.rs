//! CLI entrypoint for Realism Enhancer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use realism_application::{
    AnalyzeImageUseCase, EnhanceImageUseCase, ImageEditor, NoRunLogger, ReasoningGateway,
    Router, RunEventLogger, SceneClassifier, SignalDetector, VisionGateway,
};
use realism_domain::{AgentRegistry, ImageData};
use realism_infrastructure::codec::sniff_mime;
use realism_infrastructure::{
    ConfigLoader, FileConfig, HttpImageEditor, JsonlRunLogger, OpenAiChatClient,
    VisionSceneClassifier, VisionSignalDetector,
};
use realism_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    if cli.show_config {
        print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    if let Some(max) = cli.max_iterations {
        config.enhancement.max_iterations = max;
    }

    let image_path = cli.image.clone().context("IMAGE is required")?;
    let image = read_image(&image_path)?;
    info!("Starting Realism Enhancer on {}", image_path.display());

    if cli.analyze_only {
        return analyze(&cli, &config, image).await;
    }

    // === Dependency Injection ===
    config.validate()?;
    let (classifier, detector) = vision_adapters(&config)?;
    let editor: Arc<dyn ImageEditor> = Arc::new(HttpImageEditor::from_config(&config.editor)?);
    let registry = AgentRegistry::standard();
    let router = if cli.heuristic {
        Router::heuristic(registry.clone())
    } else {
        let reasoning: Arc<dyn ReasoningGateway> = Arc::new(OpenAiChatClient::from_config(
            &config.reasoning,
            &config.reasoning.model,
        )?);
        Router::with_reasoning(registry.clone(), reasoning)
    };

    let logger: Arc<dyn RunEventLogger> = match &cli.run_log {
        Some(path) => match JsonlRunLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoRunLogger),
        },
        None => Arc::new(NoRunLogger),
    };

    // Ctrl-C stops the run at the next safe point
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            warn!("Interrupted, cancelling run");
            cancel.cancel();
        }
    });

    let use_case = EnhanceImageUseCase::new(Arc::new(router), registry, classifier, detector, editor)
        .with_params(config.enhancement.to_params())
        .with_poll_params(config.poll_params())
        .with_logger(logger)
        .with_cancellation(token);

    let result = if cli.quiet {
        use_case.process(image).await
    } else {
        let progress = ProgressReporter::new();
        use_case.process_with_progress(image, &progress).await
    };

    if result.image_changed()
        && let Some(out) = cli.output_path()
    {
        std::fs::write(&out, result.enhanced_image.bytes())
            .with_context(|| format!("Failed to write {}", out.display()))?;
        if !cli.quiet && cli.output != OutputFormat::Json {
            println!("Enhanced image written to {}", out.display());
        }
    }

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };
    println!("{}", output);

    Ok(if result.stopped_reason.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Analyze only: classify, detect and print.
async fn analyze(cli: &Cli, config: &FileConfig, image: ImageData) -> Result<ExitCode> {
    config.validate_analysis()?;
    let (classifier, detector) = vision_adapters(config)?;
    let analysis = AnalyzeImageUseCase::new(classifier, detector)
        .execute(&image)
        .await?;

    let output = match cli.output {
        OutputFormat::Json => ConsoleFormatter::format_analysis_json(&analysis),
        OutputFormat::Full | OutputFormat::Summary => ConsoleFormatter::format_analysis(&analysis),
    };
    println!("{}", output);
    Ok(ExitCode::SUCCESS)
}

fn vision_adapters(
    config: &FileConfig,
) -> Result<(Arc<dyn SceneClassifier>, Arc<dyn SignalDetector>)> {
    let vision: Arc<dyn VisionGateway> = Arc::new(OpenAiChatClient::from_config(
        &config.reasoning,
        config.vision_model(),
    )?);
    Ok((
        Arc::new(VisionSceneClassifier::new(vision.clone())),
        Arc::new(VisionSignalDetector::new(vision)),
    ))
}

fn read_image(path: &Path) -> Result<ImageData> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mime = sniff_mime(&bytes);
    Ok(ImageData::new(bytes, mime))
}

/// Console logging at the `-v` level, plus a daily file under `log_dir`.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "realism-enhancer.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn print_config_sources() {
    println!("Configuration sources (in priority order):");
    println!("  [ENV  ] REALISM_* variables (e.g. REALISM_EDITOR__ENDPOINT)");

    match ConfigLoader::project_config_path(Path::new(".")) {
        Some(path) => println!("  [FOUND] Project: {}", path.display()),
        None => println!("  [     ] Project: ./realism.toml or ./.realism.toml"),
    }

    if let Some(path) = ConfigLoader::global_config_path() {
        let mark = if path.exists() { "FOUND" } else { "     " };
        println!("  [{}] Global:  {}", mark, path.display());
    }

    println!("  [     ] Default: built-in defaults");
}
