//! Metaquery client CLI - submit a query to the aggregation backend.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use metaquery_client::{
    fetch_response, EngineId, HttpBackend, Node, QueryController, SubmitOutcome, KNOWN_ENGINES,
    NO_CONTENT_PLACEHOLDER,
};

/// Metaquery client - query a multi-engine aggregation API
#[derive(Parser)]
#[command(name = "metaquery-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a query and render the outcome
    Query(QueryArgs),

    /// List known search engines
    Engines,

    /// Probe the backend health endpoint
    Health(EndpointArgs),
}

#[derive(Parser)]
struct QueryArgs {
    /// Query text
    query: String,

    /// Search engines to query (comma-separated)
    /// Available: google, bing, baidu, sogou, quark, jina
    #[arg(short, long, value_delimiter = ',', default_value = "google,bing")]
    engines: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    endpoint: EndpointArgs,
}

#[derive(Parser)]
struct EndpointArgs {
    /// Base URL of the aggregation backend
    #[arg(long, default_value = "http://localhost:5000")]
    endpoint: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// Raw response as pretty JSON
    Json,
    /// Materialized markup
    Markup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Query(args) => run_query(args).await,
        Commands::Engines => list_engines(),
        Commands::Health(args) => run_health(args).await,
    }
}

fn list_engines() -> Result<()> {
    println!("Known search engines:\n");
    for id in KNOWN_ENGINES {
        let engine = EngineId::new(*id);
        println!("    {:8} - {}", id, engine.display_name());
    }
    println!();
    println!("Usage: metaquery-client query \"text\" -e google,bing");
    Ok(())
}

async fn run_health(args: EndpointArgs) -> Result<()> {
    let backend = HttpBackend::new(&args.endpoint)?;
    let status = backend.health().await?;
    println!("Backend status: {status}");
    Ok(())
}

async fn run_query(args: QueryArgs) -> Result<()> {
    let backend = HttpBackend::new(&args.endpoint.endpoint)?;

    if matches!(args.format, OutputFormat::Json) {
        let response = fetch_response(&backend, &args.query, &args.engines).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let mut controller = QueryController::new(backend);
    match controller.submit(&args.query, &args.engines).await {
        SubmitOutcome::Invalid(advisory) => {
            eprintln!("{advisory}");
            std::process::exit(2);
        }
        SubmitOutcome::Failed { message } => {
            eprintln!("Query failed: {message}");
            std::process::exit(1);
        }
        SubmitOutcome::Success { .. } => {}
    }

    match args.format {
        OutputFormat::Markup => {
            for node in controller.render() {
                println!("{}", node.to_markup());
            }
        }
        _ => {
            for node in controller.render() {
                print_node(&node, 0);
            }
        }
    }

    Ok(())
}

fn print_node(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Section { name, children } => {
            println!("{indent}[{name}]");
            for child in children {
                print_node(child, depth + 1);
            }
        }
        Node::Placeholder(message) => println!("{indent}{message}"),
        Node::ResultEntry {
            index,
            title,
            url,
            host,
            content,
            engine,
            relevance,
            authority,
        } => {
            println!("{indent}{index}. {title}");
            println!("{indent}   {host} > {url}");
            if let Some(engine) = engine {
                println!("{indent}   Engine: {engine}");
            }
            println!(
                "{indent}   {}",
                content.as_deref().unwrap_or(NO_CONTENT_PLACEHOLDER)
            );
            println!(
                "{indent}   Relevance: {} ({}) | Authority: {} ({})",
                relevance.score, relevance.reason, authority.score, authority.reason
            );
        }
        Node::TabStrip(tabs) => {
            let strip: Vec<String> = tabs
                .iter()
                .map(|tab| {
                    let marker = if tab.active { "*" } else { " " };
                    format!("{marker}{} ({})", tab.label, tab.count)
                })
                .collect();
            println!("{indent}{}", strip.join(" | "));
        }
        Node::LoadingStep { index, label, state } => {
            println!("{indent}step {}: {label} ({state:?})", index + 1);
        }
        Node::Stats {
            query,
            total_raw,
            total_filtered,
        } => {
            println!("{indent}Query: \"{query}\" - {total_raw} raw, {total_filtered} after filtering");
        }
        Node::ErrorMessage(message) => println!("{indent}Error: {message}"),
    }
}
