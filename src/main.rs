use aisle_api::{HttpEncoder, RestApi, ServiceState};
use aisle_classify::{ClassifierConfig, ConfidencePolicy, Engine, SuggestConfig};
use aisle_core::{Catalog, TextEncoder};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Best neighbor similarity
    Top,
    /// Mean similarity of all neighbors
    Mean,
}

impl From<PolicyArg> for ConfidencePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Top => ConfidencePolicy::TopNeighbor,
            PolicyArg::Mean => ConfidencePolicy::MeanSimilarity,
        }
    }
}

/// Grocery item classifier and autocomplete server
#[derive(Parser, Debug)]
#[command(name = "aisle")]
#[command(about = "Embedding-based item classifier and autocomplete server", long_about = None)]
struct Args {
    /// Path to the precomputed catalog (JSON array of {name, vector, category})
    #[arg(short, long, env = "AISLE_CATALOG")]
    catalog: PathBuf,

    /// Address to bind the HTTP API to
    #[arg(long, env = "AISLE_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// HTTP API port
    #[arg(long, env = "AISLE_HTTP_PORT", default_value_t = 3001)]
    http_port: u16,

    /// Base URL of the embedding service; lexical matching only when absent
    #[arg(long, env = "AISLE_ENCODER_URL")]
    encoder_url: Option<String>,

    /// Embedding request timeout in milliseconds
    #[arg(long, env = "AISLE_ENCODER_TIMEOUT_MS", default_value_t = 5000)]
    encoder_timeout_ms: u64,

    /// Number of neighbors consulted per classification
    #[arg(long, env = "AISLE_K", default_value_t = 5)]
    k: usize,

    /// Below this confidence the answer is "Other"
    #[arg(long, env = "AISLE_CONFIDENCE_THRESHOLD", default_value_t = 0.5)]
    confidence_threshold: f32,

    /// Top similarity above which the best neighbor wins outright
    #[arg(long, env = "AISLE_TOP_MATCH_THRESHOLD", default_value_t = 0.95)]
    top_match_threshold: f32,

    /// Disable the top-match override
    #[arg(long)]
    no_top_match: bool,

    /// How confidence is derived from neighbor similarities
    #[arg(long, env = "AISLE_CONFIDENCE_POLICY", value_enum, default_value = "top")]
    confidence_policy: PolicyArg,

    /// Inputs shorter than this never use embedding search for suggestions
    #[arg(long, env = "AISLE_MIN_EMBED_CHARS", default_value_t = 3)]
    min_embed_chars: usize,

    /// Log level
    #[arg(long, env = "AISLE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting aisle v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::from_json_file(&args.catalog)?;

    // The blocking HTTP client must be built outside the async runtime
    let encoder: Option<Arc<dyn TextEncoder>> = match &args.encoder_url {
        Some(url) => {
            let encoder = HttpEncoder::new(url, Duration::from_millis(args.encoder_timeout_ms))?;
            info!("Text encoder: {}", encoder.embed_url());
            if !encoder.is_ready() {
                warn!("Embedding service not ready yet; lexical fallback until it is");
            }
            Some(Arc::new(encoder))
        }
        None => {
            warn!("No encoder configured, running lexical-only");
            None
        }
    };

    let classifier = ClassifierConfig {
        k: args.k,
        confidence_threshold: args.confidence_threshold,
        top_match_threshold: (!args.no_top_match).then_some(args.top_match_threshold),
        confidence_policy: args.confidence_policy.into(),
    };
    let suggest = SuggestConfig {
        min_embed_chars: args.min_embed_chars,
        ..SuggestConfig::default()
    };
    info!("Classifier: {:?}", classifier);

    let engine = Engine::new(Arc::new(catalog), classifier, suggest, encoder)?;
    let state = Arc::new(ServiceState::new(engine, Some(args.catalog.clone())));

    info!("HTTP API: http://{}:{}/api", args.bind, args.http_port);

    let sys = actix_web::rt::System::new();
    sys.block_on(async {
        tokio::select! {
            result = RestApi::start(state.clone(), &args.bind, args.http_port) => {
                if let Err(e) = result {
                    return Err(anyhow::anyhow!("HTTP server error: {}", e));
                }
                info!("HTTP server stopped");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
            }
        }
        Ok(())
    })?;

    // Last engine handle goes away here, off the runtime, with the blocking client
    drop(state);
    info!("Shutting down...");
    Ok(())
}
