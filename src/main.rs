use clap::Parser;
use log::{error, info, Level};
use simple_logger::init_with_level;

use transpipe::{cli::Args, config::Config, core::orchestrate};

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();

    let config = Config::read(args.config.clone()).unwrap_or_else(|e| {
        error!("ERROR: Could not read config file -> {}", e);
        std::process::exit(1);
    });

    orchestrate(args, config).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
