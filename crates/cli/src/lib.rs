use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{ClientConfig, ConfigOverrides};
use std::path::PathBuf;
use std::sync::Arc;
use superglue_lineage::{HttpTransport, LineageSession};
use superglue_protocol::{
    serialize_json, serialize_json_pretty, Depth, ErrorEnvelope, LineageQuery, ProtocolError,
    ResponseOrdering, SuggestionRecord,
};
use superglue_search::{build_query, ElasticsearchIndex, SearchSession};

pub mod config;
mod report;

#[derive(Parser)]
#[command(name = "superglue")]
#[command(about = "Search data entities and inspect their lineage", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file (overrides SUPERGLUE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lineage service base URL (overrides SUPERGLUE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Search index host (overrides ELASTICSEARCH_HOST)
    #[arg(long, global = true)]
    elasticsearch_host: Option<String>,

    /// Search index name
    #[arg(long, global = true)]
    search_index: Option<String>,

    /// Request timeout in seconds, 0 to disable
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Stale response handling: last_arrival_wins|latest_request_wins
    #[arg(long, global = true, value_parser = parse_ordering)]
    ordering: Option<ResponseOrdering>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the lineage graph of an entity
    Lineage(LineageArgs),

    /// Search entities by name
    Search(SearchArgs),

    /// Print the index query a search term turns into
    Query(QueryArgs),

    /// Print the resolved configuration
    Config,

    /// Print JSON schemas of the records this tool emits
    Schema,
}

#[derive(Args)]
struct LineageArgs {
    /// Entity type, e.g. "table"
    entity_type: String,

    /// Entity name, e.g. "CFG_IOP_ETL_STATE"
    entity_name: String,

    /// Traversal depth: a positive integer or "Full"
    #[arg(short, long, default_value = "1", value_parser = parse_depth)]
    depth: Depth,

    /// Output JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Search term
    term: String,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct QueryArgs {
    /// Search term
    term: String,
}

fn parse_depth(raw: &str) -> std::result::Result<Depth, ProtocolError> {
    raw.parse()
}

fn parse_ordering(raw: &str) -> std::result::Result<ResponseOrdering, ProtocolError> {
    raw.parse()
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    let json_output = match &cli.command {
        Commands::Lineage(args) => args.json,
        Commands::Search(args) => args.json,
        Commands::Query(_) | Commands::Config | Commands::Schema => true,
    };
    if json_output && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper internals are noisy at debug
    builder.filter_module("hyper", log::LevelFilter::Warn);
    builder.filter_module("reqwest", log::LevelFilter::Warn);
    builder.target(env_logger::Target::Stderr).init();

    let overrides = ConfigOverrides {
        api_url: cli.api_url.clone(),
        elasticsearch_host: cli.elasticsearch_host.clone(),
        search_index: cli.search_index.clone(),
        request_timeout_secs: cli.timeout_secs,
        response_ordering: cli.ordering,
    };
    let config = ClientConfig::resolve(cli.config.as_deref(), &overrides)?;
    log::debug!("Resolved config: {config:?}");

    match cli.command {
        Commands::Lineage(args) => run_lineage(args, &config).await?,
        Commands::Search(args) => run_search(args, &config).await?,
        Commands::Query(args) => run_query(args)?,
        Commands::Config => println!("{}", serialize_json_pretty(&config)?),
        Commands::Schema => run_schema()?,
    }

    Ok(())
}

async fn run_lineage(args: LineageArgs, config: &ClientConfig) -> Result<()> {
    let query = LineageQuery::new(args.entity_name, args.entity_type, args.depth)?;
    let transport = HttpTransport::new(&config.api_url, config.request_timeout())
        .context("Failed to set up lineage transport")?;
    let session = LineageSession::new(Arc::new(transport)).with_ordering(config.response_ordering);

    let outcome = session.fetch_lineage(&query).await;
    let snapshot = session.snapshot();
    let error = outcome.as_ref().err().map(|err| {
        ErrorEnvelope::new("lineage_not_found", "No lineage found")
            .with_hint(format!("{err} (service: {})", config.api_url))
    });

    if args.json {
        let report = report::LineageReport::new(&query, &snapshot, error.clone());
        println!("{}", serialize_json(&report)?);
    } else {
        print!("{}", report::render_lineage(&query, &snapshot));
    }

    if let Some(error) = error {
        anyhow::bail!(
            "{} for {}/{}: {}",
            error.message,
            query.entity_type,
            query.entity_name,
            error.hint.unwrap_or_default()
        );
    }
    Ok(())
}

async fn run_search(args: SearchArgs, config: &ClientConfig) -> Result<()> {
    let index = ElasticsearchIndex::new(&config.elasticsearch_host, config.request_timeout())
        .context("Failed to set up search index client")?;
    let session = SearchSession::new(Arc::new(index))
        .with_index_name(config.search_index.clone())
        .with_ordering(config.response_ordering);

    let suggestions: Vec<SuggestionRecord> = session.search(&args.term).await;

    if args.json {
        println!("{}", serialize_json(&suggestions)?);
    } else {
        print!("{}", report::render_suggestions(&suggestions));
    }
    Ok(())
}

fn run_query(args: QueryArgs) -> Result<()> {
    let body = build_query(&args.term).to_body();
    println!("{}", serialize_json_pretty(&body)?);
    Ok(())
}

fn run_schema() -> Result<()> {
    let schemas = serde_json::json!({
        "LineageQuery": schemars::schema_for!(LineageQuery),
        "SuggestionRecord": schemars::schema_for!(SuggestionRecord),
        "ErrorEnvelope": schemars::schema_for!(ErrorEnvelope),
    });
    println!("{}", serialize_json_pretty(&schemas)?);
    Ok(())
}
