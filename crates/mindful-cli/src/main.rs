use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mindful", version, about = "Guided meditation and breathing sessions")]
struct Cli {
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run or simulate a session
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Browse meditations, breathing exercises and coping techniques
    Catalog {
        #[command(subcommand)]
        action: Option<commands::catalog::CatalogAction>,
        /// Print as JSON
        #[arg(long, global = true)]
        json: bool,
    },
    /// Suggestions for how you feel right now (anxious, stressed, sad)
    Recommend {
        mood: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mood pattern insights
    Insights(commands::insights::InsightsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "mindful=debug,mindful_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("MINDFUL_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Catalog { action, json } => commands::catalog::run(action, json),
        Commands::Recommend { mood, json } => commands::catalog::recommend(&mood, json),
        Commands::Insights(args) => commands::insights::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
