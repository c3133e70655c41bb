//! Repolink CLI - link local git working copies to a repository catalog

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use repolink_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CleanupArgs, CloneArgs, OpenArgs, RepoArgs, ScanArgs};

/// Repolink: link local git working copies to a repository catalog
#[derive(Parser, Debug)]
#[command(name = "repolink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace root folder (overrides config and env)
    #[arg(long, global = true, env = "REPOLINK_ROOT")]
    root: Option<PathBuf>,

    /// Catalog database path (defaults to the data directory)
    #[arg(long, global = true, env = "REPOLINK_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Scan the workspace root and link discovered working copies
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Clear links whose working copies are gone or no longer match
    Cleanup(CleanupArgs),

    /// Clone a catalog repository into the workspace root and link it
    Clone(CloneArgs),

    /// Open a linked working copy in an external tool
    #[command(visible_alias = "o")]
    Open(OpenArgs),

    /// Maintain catalog entries
    Repo(RepoArgs),

    /// Show current configuration
    Config,

    /// Create a secrets file template
    InitSecrets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.root.clone())?;

    if cli.verbose {
        tracing::info!(
            root = %config.workspace.root.display(),
            "Configuration loaded"
        );
    }

    let db_path = cli.db.as_deref();

    match cli.command {
        Some(Commands::Version) => {
            println!("repolink {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Scan(args)) => {
            args.execute(&config, db_path).await?;
        }
        Some(Commands::Cleanup(args)) => {
            args.execute(db_path).await?;
        }
        Some(Commands::Clone(args)) => {
            args.execute(&config, db_path).await?;
        }
        Some(Commands::Open(args)) => {
            args.execute(&config, db_path).await?;
        }
        Some(Commands::Repo(args)) => {
            args.execute(db_path).await?;
        }
        Some(Commands::Config) => {
            println!("Repolink Configuration");
            println!("======================");
            println!();
            println!("Workspace:");
            println!("  root: {}", config.workspace.root.display());
            println!();
            println!("Launchers:");
            println!("  editor: {}", config.launchers.editor);
            println!("  ide: {}", config.launchers.ide);
            println!("  file_browser: {}", config.launchers.file_browser);
            println!("  terminal: {}", config.launchers.terminal);
            println!("  fallback_shell: {}", config.launchers.fallback_shell);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::InitSecrets) => {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
        }
        None => {
            println!("Repolink - link local git working copies to a repository catalog");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
