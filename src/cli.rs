// src/cli.rs

use clap::Parser;

/// linkmgr - raw link-layer device manager.
///
/// Discovers the host's network interfaces, opens a raw packet channel per
/// usable interface, and busy-polls them for incoming Ethernet frames.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Additional interface names to ignore, on top of the built-in set
    /// (exact match, e.g. docker0)
    #[arg(short = 'i', long = "ignore", value_name = "INTERFACE")]
    pub ignore: Vec<String>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
