//! Event-sourcing configuration checker
//!
//! Validates a bundle document, builds its wiring plan and prints a JSON
//! report on stdout. The exit status is zero only for a valid document.
//!
//! Usage:
//!   es-config-check [DOCUMENT] [--settings EsConfig] [--pretty] [--include-resolved]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use es_config::shared::LoggingUtils;
use es_config::{
    AppConfig, AppError, AppResult, ConfigValidator, DocumentLoader, ValidationReport, WiringPlan,
};

#[derive(Parser, Debug)]
#[command(name = "es-config-check")]
#[command(about = "Validate an event-sourcing bundle configuration document")]
struct Args {
    /// Bundle document; defaults to the path from the checker settings
    document: Option<PathBuf>,

    /// Settings file name, without extension
    #[arg(long, env = "ES_CONFIG_SETTINGS", default_value = "EsConfig")]
    settings: String,

    /// Environment prefix overlaid on the document
    #[arg(long)]
    env_prefix: Option<String>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    /// Embed the resolved tree in the report
    #[arg(long)]
    include_resolved: bool,
}

fn main() {
    let args = Args::parse();

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("es-config-check: {:#}", e);
            e.downcast_ref::<AppError>()
                .map(AppError::exit_code)
                .unwrap_or(70)
        }
    };

    std::process::exit(code);
}

fn run(args: Args) -> anyhow::Result<i32> {
    let mut settings = AppConfig::load_from(&args.settings)
        .with_context(|| format!("Failed to load checker settings from {}", args.settings))?;

    if let Some(document) = &args.document {
        settings.document.path = document.display().to_string();
    }
    if args.env_prefix.is_some() {
        settings.document.env_prefix = args.env_prefix.clone();
    }
    settings.output.pretty |= args.pretty;
    settings.output.include_resolved |= args.include_resolved;
    settings
        .validate_config()
        .context("Invalid checker settings")?;

    LoggingUtils::initialize(
        &settings.logging.level,
        &settings.logging.format,
        settings.logging.structured,
    )?;

    let source = settings.document.path.clone();
    let (report, code) = match check(&settings) {
        Ok(report) => (report, 0),
        Err(e) => {
            match e.validation_errors() {
                Some(errors) => LoggingUtils::log_validation_failed(&source, errors),
                None => LoggingUtils::log_error(&source, &e),
            }
            (ValidationReport::failure(&source, &e), e.exit_code())
        }
    };

    println!("{}", report.to_json(settings.output.pretty)?);
    Ok(code)
}

fn check(settings: &AppConfig) -> AppResult<ValidationReport> {
    let source = &settings.document.path;
    let started = Instant::now();
    LoggingUtils::log_validation_started(source);

    let mut loader = DocumentLoader::new();
    if let Some(prefix) = &settings.document.env_prefix {
        loader = loader.with_env_prefix(prefix);
    }
    let document = loader.load_file(source)?;

    let resolved = ConfigValidator::new().validate(&document)?;
    let plan = WiringPlan::build(&resolved, &settings.upcasters)?;

    LoggingUtils::log_validation_succeeded(
        source,
        plan.aggregates.len(),
        started.elapsed().as_millis() as u64,
    );

    let tree = settings.output.include_resolved.then(|| resolved.into_tree());
    Ok(ValidationReport::success(source, tree, plan))
}
