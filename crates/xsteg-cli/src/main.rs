mod cli;
mod commands;

use clap::Parser;
use env_logger::Env;
use xsteg_core::XstegError;

use crate::cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, XstegError>;

fn main() -> CliResult<()> {
    let args = CliArgs::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let options = args.codec_options();
    match args.command {
        Commands::Encode(cmd) => cmd.run(options),
        Commands::Decode(cmd) => cmd.run(options),
        Commands::Key(cmd) => cmd.run(),
        Commands::DiffMap(cmd) => cmd.run(options),
        Commands::VisualMaps(cmd) => cmd.run(options),
        Commands::Resize(cmd) => cmd.run(options),
    }
}
