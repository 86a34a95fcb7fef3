//! Vesta command line: preview vesting curves and replay ledger scripts.

mod replay;
mod schedule;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use vesta_ledger::LedgerConfig;
use vesta_types::TokenAmount;
use vesta_utils::LogFormat;
use vesta_vesting::ScheduleKind;

#[derive(Parser)]
#[command(name = "vesta", about = "Vesting token ledger tools")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true, env = "VESTA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the config file; `RUST_LOG` overrides both.
    #[arg(long, global = true, env = "VESTA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "VESTA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print how a grant unlocks over time.
    Schedule {
        /// immediate, private-sale or investor.
        #[arg(long)]
        kind: ScheduleKind,

        /// Grant size in tokens, e.g. "300" or "12.5".
        #[arg(long)]
        amount: TokenAmount,

        /// Seconds after creation to sample; repeatable. Defaults to the
        /// cliff end, quarter points of the unlock window and its end.
        #[arg(long = "at")]
        at: Vec<u64>,
    },

    /// Apply a JSON script of operations to a fresh ledger and print the result.
    Replay {
        /// Path to the script: a JSON array of operations.
        script: PathBuf,

        /// Record rejected operations and continue instead of failing.
        #[arg(long)]
        keep_going: bool,

        /// Clock reading at the start of the replay, in seconds.
        #[arg(long, default_value_t = 0)]
        start: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    let level = cli.log_level.as_deref().unwrap_or(config.logging.level.as_str());
    let format = cli.log_format.unwrap_or(config.logging.format);
    vesta_utils::init_logging(format, level);

    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Schedule { kind, amount, at } => {
            for line in schedule::render(&config, kind, amount, &at) {
                println!("{line}");
            }
        }
        Command::Replay {
            script,
            keep_going,
            start,
        } => {
            let content = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let ops = replay::parse_script(&content)
                .with_context(|| format!("parsing script {}", script.display()))?;
            let report = replay::run(&config, &ops, start, keep_going)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
