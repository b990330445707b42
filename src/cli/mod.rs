pub mod display;
pub mod output;

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;

use display::Palette;
use notebook_lister::config;
use notebook_lister::config::types::ListerConfig;
use notebook_lister::core::lister;

#[derive(Parser)]
#[command(
    name = "notebook-lister",
    about = "List the notebooks and tools an MCP server exposes.",
    version
)]
pub struct Cli {
    /// Server command to launch [default: notebooklm-mcp]
    #[arg(long)]
    pub server: Option<String>,

    /// Argument passed to the server; repeat for several
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Config file to read instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Log protocol activity to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl Cli {
    /// Flags win over config file values.
    pub fn apply_overrides(&self, cfg: &mut ListerConfig) {
        if let Some(ref server) = self.server {
            cfg.server.command = server.clone();
        }
        if !self.args.is_empty() {
            cfg.server.args = self.args.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.server.request_timeout_secs = Some(secs);
        }
    }
}

/// Run one listing and print it. Reported failures still return `Ok`.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let is_terminal = stdout.is_terminal();
    let mut out = stdout.lock();

    let loaded = match cli.config {
        Some(ref path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let mut cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            let command = cli
                .server
                .clone()
                .unwrap_or_else(|| config::types::DEFAULT_SERVER_COMMAND.to_string());
            return output::output_failure(&command, &e, cli.format, &Palette::plain(), &mut out);
        }
    };
    cli.apply_overrides(&mut cfg);

    let palette = Palette::new(cfg.display.color.enabled(is_terminal));
    let command = cfg.server.command.clone();

    if cli.format == OutputFormat::Human {
        writeln!(out, "{}", display::render_connecting(&command))?;
        out.flush()?;
    }

    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(lister::fetch_listing(&cfg.server)) {
        Ok(listing) => output::output_listing(&listing, cli.format, &palette, &mut out)?,
        Err(e) => {
            tracing::debug!(error = ?e, "run ended before listing");
            output::output_failure(&command, &e, cli.format, &palette, &mut out)?;
        }
    }

    Ok(())
}
