//! Simplyfi CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "simplyfi")]
#[command(about = "Simplyfi - Multi-Language Code Visualization Tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the browser front end
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },
    /// Build a flowchart from comment and declaration lines
    Flowchart {
        /// Source file; stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Language label (Python, JavaScript, Java, C++, C#)
        #[arg(short, long, default_value = "Python")]
        language: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Dot)]
        format: OutputFormat,
    },
    /// Graph the syntax tree of Python source
    SyntaxTree {
        /// Source file; stdin when omitted or "-"
        file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Dot)]
        format: OutputFormat,
    },
    /// Ask the configured language model to explain code
    Explain {
        /// Source file; stdin when omitted or "-"
        file: Option<PathBuf>,

        /// Additional instruction appended to the request
        #[arg(short, long)]
        prompt: Option<String>,
    },
    /// Syntax-highlight code to HTML
    Highlight {
        /// Source file; stdin when omitted or "-"
        file: Option<PathBuf>,

        #[arg(short, long, default_value = "Python")]
        language: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("simplyfi={}", log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Simplyfi v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { port, host, open } => {
            let config = config::AppConfig::load(&cli.config)?;
            commands::serve(config, host, port, open).await
        }
        Commands::Flowchart { file, language, format } => {
            commands::flowchart(file.as_deref(), &language, format)
        }
        Commands::SyntaxTree { file, format } => commands::syntax_tree(file.as_deref(), format),
        Commands::Explain { file, prompt } => {
            let config = config::AppConfig::load(&cli.config)?;
            commands::explain(config, file.as_deref(), prompt.as_deref()).await
        }
        Commands::Highlight { file, language } => commands::highlight(file.as_deref(), &language),
        Commands::Version => {
            println!("Simplyfi v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
