use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use seatforge::config::Config;
use seatforge::error::SfResult;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line take precedence
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seat a roster and optimize the arrangement
    Optimize(cmd::optimize::OptimizeArgs),
    /// Optimize once per (initial temperature, cooling rate) grid point
    Sweep(cmd::sweep::SweepArgs),
    /// Score an existing arrangement
    Stats(cmd::stats::StatsArgs),
    /// Run a JSON search request in the background
    Request(cmd::request::RequestArgs),
}

fn resolve_config(
    path: Option<&Path>,
    cli_config: &Config,
    sub_matches: Option<&ArgMatches>,
) -> SfResult<Config> {
    let config = match (path, sub_matches) {
        (Some(path), Some(matches)) => {
            info!("Loading config from: {}", path.display());
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, matches);
            file_config
        }
        _ => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Optimize(args) => {
            resolve_config(config_path, &args.config, matches.subcommand_matches("optimize"))
                .and_then(|config| cmd::optimize::run(args, config))
        }
        Commands::Sweep(args) => {
            resolve_config(config_path, &args.config, matches.subcommand_matches("sweep"))
                .and_then(|config| cmd::sweep::run(args, config))
        }
        Commands::Stats(args) => {
            resolve_config(config_path, &args.config, matches.subcommand_matches("stats"))
                .and_then(|config| cmd::stats::run(args, config))
        }
        Commands::Request(args) => cmd::request::run(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
