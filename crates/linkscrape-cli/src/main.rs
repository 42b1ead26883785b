use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use linkscrape_cli::OutputFormat;
use linkscrape_cli::commands::{self, scrape::ScrapeArgs};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "linkscrape")]
#[command(author, version)]
#[command(
    about = "Scrape structured LinkedIn profile data through a real Chrome browser",
    long_about = "linkscrape logs in to LinkedIn (reusing a cached session when possible), \
                  visits each target profile, and exports the extracted records as \
                  output_raw.json and output_raw.csv."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for reports (pretty, json)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Execution log written during a scrape
    #[arg(long, global = true, value_name = "FILE", default_value = "execution.log")]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one profile or a CSV list of profiles
    Scrape(ScrapeArgs),

    /// Inspect or delete the cached login session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Validate an exported output_raw.json file
    Validate {
        /// Path to the JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for linkscrape.\n\n\
        SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash: linkscrape completion --shell bash >> ~/.bashrc\n  \
        zsh:  linkscrape completion --shell zsh > ~/.zfunc/_linkscrape  (add ~/.zfunc to fpath in ~/.zshrc)\n  \
        fish: linkscrape completion --shell fish > ~/.config/fish/completions/linkscrape.fish")]
    Completion {
        /// Target shell
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the cached session for an account
    Show {
        /// Account the session belongs to (defaults to LINKEDIN_USERNAME)
        #[arg(long, env = "LINKEDIN_USERNAME")]
        account: Option<String>,

        /// Session cache file
        #[arg(long, value_name = "FILE")]
        session_file: Option<PathBuf>,
    },

    /// Delete the cached session so the next run logs in again
    Clear {
        /// Account the session belongs to (defaults to LINKEDIN_USERNAME)
        #[arg(long, env = "LINKEDIN_USERNAME")]
        account: Option<String>,

        /// Session cache file
        #[arg(long, value_name = "FILE")]
        session_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = matches!(cli.command, Commands::Scrape(_)).then_some(cli.log_file.as_path());
    init_logging(cli.verbose, log_file)?;

    match cli.command {
        Commands::Scrape(args) => commands::scrape::execute(args),
        Commands::Session { action } => match action {
            SessionAction::Show {
                account,
                session_file,
            } => {
                let store = commands::session::store_for(session_file, account.as_deref())?;
                commands::session::show(&store, cli.format)
            }
            SessionAction::Clear {
                account,
                session_file,
            } => {
                let store = commands::session::store_for(session_file, account.as_deref())?;
                commands::session::clear(&store)
            }
        },
        Commands::Validate { file } => commands::validate::execute(&file, cli.format),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("linkscrape=debug,linkscrape_cli=debug,linkscrape_core=debug,linkscrape_browser=debug")
    } else {
        EnvFilter::new("linkscrape=info,linkscrape_cli=info,linkscrape_core=info,linkscrape_browser=info")
    };

    let console = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    let file = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}
