#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use age_life::{log_error, Config, Result};
use clap::Parser;

const DEFAULT_CONFIG_PATH: &str = "life.toml";

#[derive(Parser, Debug)]
#[command(name = "life", about = "Game of Life with cell ages")]
struct Args {
    /// Settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print this many generations to stdout instead of opening a window
    #[arg(long)]
    text: Option<u64>,
    /// Board to start from; also where the window saves to
    board_file: Option<PathBuf>,
}

fn try_main(args: Args) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(config_path)?;
    let mut board = age_life::setup_board(&config, args.board_file.as_ref())?;

    match args.text {
        Some(generations) => {
            let mut stdout = std::io::stdout().lock();
            age_life::run_text(&mut board, generations, &mut stdout)
        }
        None => age_life::run(config, board, args.board_file),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match try_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error("life", err);
            ExitCode::FAILURE
        }
    }
}
