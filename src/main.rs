use clap::{Parser, Subcommand};
use rxfind_core::config::Config;
use rxfind_rxnav::RxNavClient;
use std::{path::PathBuf, process::ExitCode, sync::Arc};

mod headless;

const DEBUG_LOG: &str = "/tmp/rxfind-debug.log";

#[derive(Parser)]
#[command(name = "rxfind", version, about = "Look up drugs and their NDCs on RxNav")]
struct Cli {
    /// Write debug logs (TUI: /tmp/rxfind-debug.log, subcommands: stderr).
    #[arg(long, global = true)]
    debug: bool,

    /// RxNav REST base URL, overriding the config file.
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Config file to use instead of ~/.config/rxfind/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one search and print the candidates.
    Search {
        query: String,
        /// Print JSON instead of one candidate per line.
        #[arg(long)]
        json: bool,
    },
    /// Print the record and NDC codes for a drug name.
    Show {
        name: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        init_logging(cli.command.is_none())?;
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config load failed, using defaults");
            Config::defaults()
        }),
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let client = RxNavClient::from_config(&config.api)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        None => {
            let _guard = runtime.enter();
            rxfind_tui::run(config, Arc::new(client), runtime.handle().clone())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Cmd::Search { query, json }) => {
            runtime.block_on(headless::search(&client, &config, &query, json))
        }
        Some(Cmd::Show { name, json }) => {
            runtime.block_on(headless::show(&client, &config, &name, json))
        }
    }
}

fn init_logging(tui: bool) -> anyhow::Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"))
    };

    if tui {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter())
            .init();
        tracing::info!("rxfind debug log started, tail -f {DEBUG_LOG}");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .init();
    }
    Ok(())
}
