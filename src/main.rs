mod config;
mod device;
mod driver;
mod dump;
mod error;
mod frame;
mod sink;
mod tracker;
mod transport;

use std::fs::File;
use std::io::{self, Read};

use clap::Parser;

use config::{Cli, Command, Config};
use driver::ScrollDevice;
use sink::UinputSink;
use transport::FrameReader;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Some(Command::Dump) => "warn",
        None => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(&cli)?;
    config.validate()?;

    let mut reader = FrameReader::new(open_input(&config.input)?);
    let mut device = ScrollDevice::attach(config.variant, config.tracker);

    if let Some(Command::Dump) = cli.command {
        return dump::run_dump(&mut reader, &mut device);
    }

    log::info!(
        "fjs-scroll starting (input={}, variant={})",
        config.input,
        config.variant
    );

    let mut sink = UinputSink::create(config.variant.policy())?;
    driver::run(&mut reader, &mut device, &mut sink)?;

    Ok(())
}

fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    log::debug!("Opening {}", path);
    Ok(Box::new(File::open(path)?))
}
