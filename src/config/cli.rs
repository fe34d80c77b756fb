use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::device::DeviceVariant;

#[derive(Parser)]
#[command(name = "fjs-scroll")]
#[command(about = "Turn Fujitsu scroll wheel and scroll sensor packets into input events")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Raw packet source, e.g. a serio_raw node ("-" reads stdin)
    #[arg(long, env = "FJS_SCROLL_INPUT")]
    pub input: Option<String>,

    /// Device variant (wheel, sensor)
    #[arg(long, value_parser = clap::value_parser!(DeviceVariant))]
    pub variant: Option<DeviceVariant>,

    /// GETINFO response as hex bytes, e.g. "04 43 00" (overrides --variant)
    #[arg(long)]
    pub getinfo: Option<String>,

    /// Minimum weight to register a touch (0-63)
    #[arg(long)]
    pub weight_threshold: Option<u8>,

    /// Minimum position change before motion is reported
    #[arg(long)]
    pub position_threshold: Option<u16>,

    /// Right-shift applied to reported motion
    #[arg(long)]
    pub bitshift: Option<u32>,

    /// Reverse the scroll direction
    #[arg(long)]
    pub reverse: bool,

    /// Track touches but do not emit events
    #[arg(long)]
    pub no_send_events: bool,

    /// Log every decoded packet (debug level)
    #[arg(long)]
    pub log_packets: bool,

    /// Log touch begin/end and motion decisions (debug level)
    #[arg(long)]
    pub log_events: bool,

    /// Path to config file
    #[arg(long, env = "FJS_SCROLL_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print decoded packets and resulting events instead of forwarding them
    Dump,
}
