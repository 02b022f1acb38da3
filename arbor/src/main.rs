mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use arbor_core::Strategy;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Bootstrap dependency environments for freshly created git worktrees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short, long, action, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the language ecosystems used in a project
    Detect {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, action)]
        json: bool,
    },
    /// Show monorepo type and workspace packages
    Monorepo {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, action)]
        json: bool,
    },
    /// Link dependency caches from the source checkout into a worktree
    Bootstrap {
        worktree: PathBuf,
        #[arg(long, default_value = ".")]
        source: PathBuf,
        /// Overrides the default strategy from arbor.toml
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        #[arg(long, action)]
        json: bool,
    },
    /// Add workspace path mappings to every tsconfig.json in a worktree
    Patch {
        worktree: PathBuf,
        #[arg(long, action)]
        json: bool,
    },
    /// Remove dependency links from a worktree
    Cleanup { worktree: PathBuf },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum StrategyArg {
    Symlink,
    Install,
    None,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Symlink => Strategy::Symlink,
            StrategyArg::Install => Strategy::Install,
            StrategyArg::None => Strategy::None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Detect { path, json } => commands::cmd_detect(path, json)?,
        Commands::Monorepo { path, json } => commands::cmd_monorepo(path, json)?,
        Commands::Bootstrap {
            worktree,
            source,
            strategy,
            json,
        } => commands::cmd_bootstrap(worktree, source, strategy.map(Into::into), json)?,
        Commands::Patch { worktree, json } => commands::cmd_patch(worktree, json)?,
        Commands::Cleanup { worktree } => commands::cmd_cleanup(worktree)?,
    }

    Ok(())
}
