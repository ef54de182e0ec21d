mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tag_recommender::store::{Dataset, InMemoryStore};
use tag_recommender::{Recommendation, Recommender, RecommenderConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tag-recommender", about = "Tag recommendation engine")]
struct Cli {
    /// Path to a TOML config file (defaults to config/recommender.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Recommend(RecommendArgs),
    Serve(ServeArgs),
    /// Write the effective configuration to a TOML file
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct RecommendArgs {
    #[arg(long)]
    dataset: PathBuf,
    #[arg(long)]
    post_id: i64,
    #[arg(long, default_value_t = 10)]
    limit: i64,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long)]
    dataset: PathBuf,
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8788)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/recommender.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = RecommenderConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Recommend(args) => run_recommend(args, config).await,
        Command::Serve(args) => {
            let recommender = build_recommender(&args.dataset, config).await?;
            server::serve(args, recommender).await
        }
        Command::InitConfig(args) => {
            config.write(&args.path)?;
            println!("Wrote config to {}", args.path.display());
            Ok(())
        }
    }
}

async fn run_recommend(args: RecommendArgs, config: RecommenderConfig) -> Result<(), String> {
    let recommender = build_recommender(&args.dataset, config).await?;
    let recommendations = recommender
        .recommend_tags(args.post_id, args.limit)
        .await
        .map_err(|err| err.to_string())?;

    if args.json {
        let payload = serde_json::to_string_pretty(&recommendations)
            .map_err(|err| format!("failed to serialize recommendations: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No tag recommendations for post {}", args.post_id);
        return Ok(());
    }

    println!("Tag recommendations for post {}:", args.post_id);
    for (rank, recommendation) in recommendations.iter().enumerate() {
        print_recommendation(rank + 1, recommendation);
    }
    Ok(())
}

fn print_recommendation(rank: usize, recommendation: &Recommendation) {
    let signals = &recommendation.signals;
    println!(
        "{:>2}. {} [{}] score {:.2} ({})",
        rank,
        recommendation.tag.name,
        recommendation.tag.pillar.label(),
        recommendation.score,
        recommendation.reasons.join("; ")
    );
    println!(
        "    content {:.2} | co-occurrence {:.2} | balance {:.2} | popularity {:.2} | platform {:.2}",
        signals.content,
        signals.co_occurrence,
        signals.pillar_balance,
        signals.popularity,
        signals.platform
    );
}

async fn build_recommender(dataset: &Path, config: RecommenderConfig) -> Result<Recommender, String> {
    let dataset = Dataset::load(dataset)
        .await
        .map_err(|err| format!("{:#}", err))?;
    let store = InMemoryStore::from_dataset(&dataset, config.statistics.min_pair_frequency)
        .map_err(|err| format!("{:#}", err))?;
    tracing::info!(
        posts = store.post_count(),
        tags = store.tag_count(),
        "loaded dataset"
    );
    Ok(Recommender::from_store(Arc::new(store), config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
