//! linkmgr - Raw Link-Layer Device Manager

mod check_sudo;
mod cli;
mod common;
mod netdev;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};

use cli::Cli;
use netdev::DeviceRegistry;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Opening AF_PACKET sockets needs CAP_NET_RAW; bail out early with a
    // clear message instead of a cryptic EPERM mid-discovery.
    if !check_sudo::is_root() {
        error!("{}", common::globals::ERROR_PERMISSION_DENIED);
        std::process::exit(1);
    }

    if let Err(err) = run(&cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!("{} starting up", common::globals::APP_NAME);

    let mut registry = DeviceRegistry::new();
    netdev::discover(&mut registry, &cli.ignore)?;

    if registry.is_empty() {
        bail!("{}", common::globals::ERROR_NO_DEVICE);
    }

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("failed to install signal handler")?;
    }

    info!("polling {} device(s)", registry.len());
    netdev::poll::run(&mut registry, &stop);

    // Reached only on Ctrl-C; dropping the registry closes every channel.
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
