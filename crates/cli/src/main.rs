use clap::{Parser, Subcommand};

mod commands;

use commands::{AddArgs, ExportArgs, ListArgs, ReportArgs, ResolveArgs, ScoreArgs};

#[derive(Parser)]
#[command(name = "catalyst-rater")]
#[command(about = "Rate biotech catalyst events and recommend options structures", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a catalyst event to the tracker
    Add(AddArgs),
    /// Score an event and store the rating
    Score(ScoreArgs),
    /// Record the realized outcome of an event
    Resolve(ResolveArgs),
    /// List tracked events
    List(ListArgs),
    /// Benchmark report over resolved events
    Report(ReportArgs),
    /// Write the combined event+rating export
    Export(ExportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = catalyst_rater_core::ConfigLoader::load_from(&cli.config)?;

    match cli.command {
        Commands::Add(args) => commands::add::run(&config, args).await,
        Commands::Score(args) => commands::score::run(&config, &args),
        Commands::Resolve(args) => commands::resolve::run(&config, &args),
        Commands::List(args) => commands::list::run(&config, &args),
        Commands::Report(args) => commands::report::run(&config, &args),
        Commands::Export(args) => commands::export::run(&config, &args),
    }
}
