//! Cadence CLI - cadence command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

/// Cadence - debounce, throttle and timer primitives on a simulated or real clock
#[derive(Parser)]
#[command(name = "cadence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (default: $CADENCE_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate calls through a debounced wrapper
    Debounce {
        /// Quiet period in seconds (default: debounce.wait_secs)
        #[arg(long)]
        wait: Option<f64>,
        /// Longest delay in seconds before a forced invocation
        #[arg(long)]
        max_wait: Option<f64>,
        /// Invoke on the first call of a burst
        #[arg(long)]
        leading: bool,
        /// Skip the trailing invocation
        #[arg(long)]
        no_trailing: bool,
        /// Call times in seconds, comma separated and ascending
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<f64>,
        /// Heartbeat frame length in seconds (default: host.frame_secs)
        #[arg(long)]
        frame: Option<f64>,
    },
    /// Simulate calls through a throttled wrapper
    Throttle {
        /// Window in seconds (default: debounce.wait_secs)
        #[arg(long)]
        wait: Option<f64>,
        /// Skip the leading invocation
        #[arg(long)]
        no_leading: bool,
        /// Skip the trailing invocation
        #[arg(long)]
        no_trailing: bool,
        /// Call times in seconds, comma separated and ascending
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<f64>,
        /// Heartbeat frame length in seconds (default: host.frame_secs)
        #[arg(long)]
        frame: Option<f64>,
    },
    /// Simulate a repeating timer
    Interval {
        /// Period in seconds
        #[arg(long)]
        every: f64,
        /// Simulated duration in seconds
        #[arg(long = "for")]
        total: f64,
        /// Heartbeat frame length in seconds (default: host.frame_secs)
        #[arg(long)]
        frame: Option<f64>,
    },
    /// Simulate a one-shot timer
    Timeout {
        /// Delay in seconds
        #[arg(long)]
        after: f64,
        /// Simulated duration in seconds
        #[arg(long = "for")]
        total: f64,
        /// Heartbeat frame length in seconds (default: host.frame_secs)
        #[arg(long)]
        frame: Option<f64>,
    },
    /// Count down to zero in real time (Ctrl-C cancels)
    Countdown {
        /// Starting value
        count: u32,
        /// Seconds between values (default: countdown.interval_secs)
        #[arg(long)]
        interval: Option<f64>,
    },
    /// View and edit the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all settings
    List,
    /// Print a single setting
    Get {
        /// Setting key (e.g. debounce.wait_secs)
        key: String,
    },
    /// Change a single setting
    Set {
        key: String,
        value: String,
    },
    /// Show the settings file location
    Path {
        /// Write default settings if the file does not exist
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example settings file
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (RUST_LOG), keeping stdout for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Debounce { wait, max_wait, leading, no_trailing, at, frame } => {
            let args = cmd::debounce::DebounceArgs {
                wait,
                max_wait,
                leading,
                no_trailing,
                at,
                frame,
            };
            cmd::debounce::run(args, config)
        }
        Commands::Throttle { wait, no_leading, no_trailing, at, frame } => {
            let args = cmd::throttle::ThrottleArgs {
                wait,
                no_leading,
                no_trailing,
                at,
                frame,
            };
            cmd::throttle::run(args, config)
        }
        Commands::Interval { every, total, frame } => {
            cmd::interval::run(every, total, frame, config)
        }
        Commands::Timeout { after, total, frame } => {
            cmd::timeout::run(after, total, frame, config)
        }
        Commands::Countdown { count, interval } => {
            cmd::countdown::run(count, interval, config).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(config),
            ConfigCommands::Get { key } => cmd::config::run_get(&key, config),
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value, config),
            ConfigCommands::Path { create } => cmd::config::run_path(create, config),
            ConfigCommands::Example => cmd::config::run_example(),
        },
    }
}
