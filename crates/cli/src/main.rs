mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use photofolio_core::domain::{Scope, DEFAULT_FOLDER};
use photofolio_core::Gallery;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Photofolio: client-side photo portfolio library
#[derive(Parser)]
#[command(name = "photofolio", version, about)]
struct Cli {
    /// Path to the library database
    #[arg(long, default_value_t = default_library_path())]
    library: String,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload image files (or directories of images) into a folder
    Upload {
        /// Files or directories to ingest
        paths: Vec<PathBuf>,
        /// Target folder for the whole batch
        #[arg(long, default_value = DEFAULT_FOLDER)]
        folder: String,
        /// Fix the display aspect instead of auto-detecting
        /// (portrait, landscape, square, wide, panorama, cinema, instant)
        #[arg(long, default_value = "auto")]
        format: String,
    },
    /// List photos, optionally filtered
    Ls {
        /// Case-insensitive search over name and folder
        #[arg(long, default_value = "")]
        search: String,
        /// all, favorites, archive, or a folder name
        #[arg(long, default_value = "all")]
        scope: String,
    },
    /// Show collection statistics
    Status,
    /// List folders in first-use order
    Folders,
    /// Move a photo to a folder (creates the folder if needed)
    Mv {
        /// Photo id
        id: String,
        /// Target folder name
        folder: String,
    },
    /// Delete a photo by id
    Rm {
        /// Photo id
        id: String,
    },
    /// Delete every photo matching a scope
    Clear {
        /// all, favorites, archive, or a folder name
        scope: String,
        /// Actually delete; without this flag the command only reports what would go
        #[arg(long)]
        yes: bool,
    },
}

fn default_library_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".photofolio")
        .join("library.db")
        .to_string_lossy()
        .to_string()
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let library_path = PathBuf::from(&cli.library);
    let mut gallery = Gallery::open(&library_path)?;

    match cli.command {
        Commands::Upload {
            paths,
            folder,
            format,
        } => commands::upload::run(&mut gallery, paths, &folder, &format)?,
        Commands::Ls { search, scope } => {
            commands::ls::run(&gallery, &search, &Scope::parse(&scope))?
        }
        Commands::Status => commands::status::run(&gallery)?,
        Commands::Folders => commands::folders::run(&gallery)?,
        Commands::Mv { id, folder } => commands::photos::mv(&mut gallery, &id, &folder)?,
        Commands::Rm { id } => commands::photos::rm(&mut gallery, &id)?,
        Commands::Clear { scope, yes } => {
            commands::photos::clear(&mut gallery, &Scope::parse(&scope), yes)?
        }
    }

    Ok(())
}
