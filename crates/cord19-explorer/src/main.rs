//! CORD-19 Explorer - Entry Point
//!
//! Prints the dashboard report, exports the filtered CSV, or serves both over HTTP.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cord19_explorer::{
    Config, DashboardView, DataLoader, FilterControls, MokaTableCache, Resolver, Uncached,
    config::defaults, export, formatters::format_dashboard_markdown, models::FilterQuery, pipeline,
    server::DashboardServer,
};

#[derive(Parser, Debug)]
#[command(name = "cord19-explorer")]
#[command(about = "Explore CORD-19 research paper metadata")]
#[command(version)]
struct Cli {
    /// Pre-cleaned metadata CSV (tried first)
    #[arg(long, env = "CORD19_CLEANED_PATH")]
    cleaned: Option<PathBuf>,

    /// Raw metadata CSV (cleaned inline when the cleaned file is unusable)
    #[arg(long, env = "CORD19_RAW_PATH")]
    raw: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dashboard for a filter
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format
        #[arg(long, default_value = "markdown")]
        format: OutputFormat,
    },
    /// Write the filtered view as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file
        #[arg(long, short, default_value = defaults::EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Serve the dashboard over HTTP
    Serve {
        /// HTTP server port
        #[arg(long, default_value_t = defaults::PORT, env = "PORT")]
        port: u16,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// First publication year
    #[arg(long)]
    year_lo: Option<i32>,

    /// Last publication year
    #[arg(long)]
    year_hi: Option<i32>,

    /// Journal to keep ("All" for every journal)
    #[arg(long)]
    journal: Option<String>,

    /// Minimum abstract word count
    #[arg(long)]
    words_lo: Option<usize>,

    /// Maximum abstract word count
    #[arg(long)]
    words_hi: Option<usize>,
}

impl From<FilterArgs> for FilterQuery {
    fn from(args: FilterArgs) -> Self {
        Self {
            year_lo: args.year_lo,
            year_hi: args.year_hi,
            journal: args.journal,
            words_lo: args.words_lo,
            words_hi: args.words_hi,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    #[default]
    Markdown,
    /// Full dashboard view as JSON
    Json,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if let Some(path) = cli.cleaned {
        config.cleaned_path = path;
    }
    if let Some(path) = cli.raw {
        config.raw_path = path;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        cleaned = %config.cleaned_path.display(),
        raw = %config.raw_path.display(),
        "Starting CORD-19 explorer"
    );

    let resolver = Resolver::from_config(&config);

    match cli.command {
        Command::Summary { filter, format } => {
            let resolved = DataLoader::new(resolver, Uncached).load();
            let filter = FilterControls::from_table(&resolved.table)
                .resolve(&FilterQuery::from(filter))
                .map_err(|e| anyhow::anyhow!(e.to_user_message()))?;
            let view = DashboardView::build(&resolved, &filter);

            match format {
                OutputFormat::Markdown => println!("{}", format_dashboard_markdown(&view)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            }
        }
        Command::Export { filter, output } => {
            let resolved = DataLoader::new(resolver, Uncached).load();
            let filter = FilterControls::from_table(&resolved.table)
                .resolve(&FilterQuery::from(filter))
                .map_err(|e| anyhow::anyhow!(e.to_user_message()))?;
            let filtered = pipeline::apply(&resolved.table, &filter);

            let file = std::fs::File::create(&output)?;
            export::write_csv(&filtered, std::io::BufWriter::new(file))?;
            tracing::info!(
                rows = filtered.len(),
                path = %output.display(),
                "Exported filtered data"
            );
        }
        Command::Serve { port } => {
            let server = DashboardServer::new(DataLoader::new(resolver, MokaTableCache::new()));
            server.run_http(port).await?;
        }
    }

    Ok(())
}
