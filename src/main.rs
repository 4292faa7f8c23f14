use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use digital_concierge::catalog::{taxonomy, ServiceCatalog};
use digital_concierge::config::AppConfig;
use digital_concierge::error::AppError;
use digital_concierge::recommend::{
    rank_badge, recommendation_router, AnswerSet, RecommendationEngine,
};
use digital_concierge::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Digital Concierge",
    about = "Serve and exercise the service recommendation engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the scorer once against a catalog and print the shortlist
    Recommend(RecommendArgs),
    /// Catalog preparation utilities
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct RecommendArgs {
    /// Path to a services.json catalog (defaults to the embedded catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long)]
    persona: Option<String>,
    #[arg(long)]
    employment_type: Option<String>,
    #[arg(long)]
    immediate_need: Option<String>,
    #[arg(long)]
    urgency: Option<String>,
    #[arg(long)]
    life_stage: Option<String>,
    #[arg(long)]
    membership: Option<String>,
    #[arg(long)]
    channel: Option<String>,
}

impl RecommendArgs {
    fn answer_set(&self) -> AnswerSet {
        AnswerSet {
            persona: self.persona.clone(),
            employment_type: self.employment_type.clone(),
            immediate_need: self.immediate_need.clone(),
            urgency: self.urgency.clone(),
            life_stage: self.life_stage.clone(),
            membership: self.membership.clone(),
            channel: self.channel.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Transform a master taxonomy file into the concierge catalog
    Sync(SyncArgs),
    /// Structurally validate a services.json catalog
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct SyncArgs {
    /// Path to the master taxonomy JSON
    #[arg(long)]
    taxonomy: PathBuf,
    /// Where to write the synced catalog (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Validate the transform without writing anything
    #[arg(long)]
    validate_only: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to a services.json catalog (defaults to the embedded catalog)
    #[arg(long)]
    services: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Catalog {
            command: CatalogCommand::Sync(args),
        } => run_catalog_sync(args),
        Command::Catalog {
            command: CatalogCommand::Validate(args),
        } => run_catalog_validate(args),
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ServiceCatalog, AppError> {
    let catalog = match path {
        Some(path) => ServiceCatalog::from_path(path)?,
        None => ServiceCatalog::embedded()?,
    };
    Ok(catalog)
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(config.catalog.path.as_ref())?;
    let report = catalog.validate();
    for warning in &report.warnings {
        warn!(%warning, "catalog warning");
    }
    if !report.is_ok() {
        return Err(AppError::Catalog(
            digital_concierge::catalog::CatalogError::Invalid(report),
        ));
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(recommendation_router(Arc::new(catalog)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "digital concierge ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_ref())?;
    let answers = args.answer_set();
    let engine = RecommendationEngine::new();
    let shortlist = engine.recommend(&answers, &catalog);

    if shortlist.is_empty() {
        println!("No services to recommend (catalog is empty)");
        return Ok(());
    }

    println!("Your recommendations");
    for (index, entry) in shortlist.iter().enumerate() {
        let rank = index + 1;
        println!(
            "\n{rank}. {} [{}] - {} confidence (score {})",
            entry.service.name,
            rank_badge(rank),
            entry.confidence.label(),
            entry.score
        );
        println!("   Pillar: {}", entry.service.pillar);
        for reason in &entry.reasons {
            println!("   - {reason}");
        }
        println!("   Benefit: {}", entry.service.benefit);
        println!("   Access: {}", entry.access);
    }

    Ok(())
}

fn run_catalog_sync(args: SyncArgs) -> Result<(), AppError> {
    let master = taxonomy::load_taxonomy(&args.taxonomy)?;
    let outcome = taxonomy::sync(&master)?;

    for warning in &outcome.report.warnings {
        println!("warning: {warning}");
    }

    println!(
        "Synced {} services at {}",
        outcome.catalog.len(),
        outcome.synced_at.format("%Y-%m-%d %H:%M:%S")
    );
    for (pillar, count) in &outcome.pillar_counts {
        println!("  {pillar}: {count} services");
    }

    if args.validate_only {
        println!("Validation complete (--validate-only set, nothing written)");
        return Ok(());
    }

    let rendered = taxonomy::render_catalog(&outcome.catalog)?;
    match &args.out {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("Wrote catalog to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn run_catalog_validate(args: ValidateArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.services.as_ref())?;
    let report = catalog.validate();

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("error: {error}");
    }

    if !report.is_ok() {
        return Err(AppError::Catalog(
            digital_concierge::catalog::CatalogError::Invalid(report),
        ));
    }

    println!("Catalog is valid ({} services)", catalog.len());
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_args_map_onto_the_answer_set() {
        let args = RecommendArgs {
            persona: Some("worker".to_string()),
            urgency: Some("immediate".to_string()),
            ..RecommendArgs::default()
        };

        let answers = args.answer_set();
        assert_eq!(answers.persona.as_deref(), Some("worker"));
        assert_eq!(answers.urgency.as_deref(), Some("immediate"));
        assert!(answers.membership.is_none());
        assert!(!answers.is_member());
    }

    #[test]
    fn cli_parses_the_catalog_sync_subcommand() {
        let cli = Cli::parse_from([
            "digital-concierge",
            "catalog",
            "sync",
            "--taxonomy",
            "taxonomy.json",
            "--validate-only",
        ]);

        match cli.command {
            Some(Command::Catalog {
                command: CatalogCommand::Sync(args),
            }) => {
                assert_eq!(args.taxonomy, PathBuf::from("taxonomy.json"));
                assert!(args.validate_only);
                assert!(args.out.is_none());
            }
            other => panic!("expected catalog sync, got {other:?}"),
        }
    }
}
