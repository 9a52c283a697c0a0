use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod output;

use config::Config;
use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "refalign")]
#[command(about = "refalign - reference-guided sequence alignment and translation")]
#[command(version)]
#[command(long_about = "
refalign aligns many query sequences against one reference, refines coding
regions at the codon level and writes the queries in reference coordinates.

Examples:
  refalign run --sequences queries.fasta --reference ref.fasta --output-dir out
  refalign run -i queries.fasta -r ref.fasta -m genemap.gff --genes E,M,N -j 8
  refalign config --example > refalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align query sequences to the reference
    Run(commands::run::RunArgs),

    /// Print or write the configuration
    Config {
        /// Print an example configuration with every default
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(&config, args, cli.quiet),
        Commands::Config { example, output } => {
            let config = if example { Config::default() } else { config };
            match output {
                Some(path) => {
                    config.save_to_file(&path)?;
                    log::info!("Configuration written to: {}", path.display());
                }
                None if example => print!("{}", Config::example_toml()?),
                None => print!("{}", toml::to_string_pretty(&config).map_err(CliError::from)?),
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match execute(cli) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<CliError>() {
            Some(cli_error) => {
                log::error!("{}", format_error_with_suggestions(cli_error));
                std::process::exit(1);
            }
            None => Err(err),
        },
    }
}
