//! Tag Station
//!
//! Interactive terminal for generating and printing equipment tags.
//!
//! Usage:
//!   tag-station --work-dir /srv/tags --printer 192.168.1.60

use anyhow::{Context, Result};
use clap::Parser;
use tag_station::{
    Config, PrintHost, TagStation, TerminalLines, TerminalPrompt, print_banner, repl, setup_environment,
};

#[derive(Parser, Debug)]
#[command(name = "tag-station")]
#[command(about = "Branch equipment tag generator")]
struct Args {
    /// Working directory for data, exports and print sheets
    #[arg(short, long, env = "WORK_DIR")]
    work_dir: Option<String>,

    /// Option catalog database file
    #[arg(long, env = "DATA_FILE")]
    data_file: Option<String>,

    /// Directory for exported images
    #[arg(long, env = "EXPORT_DIR")]
    export_dir: Option<String>,

    /// Directory for printable queue sheets
    #[arg(long, env = "PRINT_DIR")]
    print_dir: Option<String>,

    /// Network label printer (`host[:port]`); an HTML sheet is written when unset
    #[arg(short, long, env = "PRINTER_ADDR")]
    printer: Option<String>,

    /// Max log level
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Write logs to daily files in this directory
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<String>,
}

impl Args {
    fn into_config(self) -> Config {
        let mut config = match self.work_dir {
            Some(dir) => Config::with_overrides(dir),
            None => Config::from_env(),
        };
        if let Some(v) = self.data_file {
            config.data_file = v;
        }
        if let Some(v) = self.export_dir {
            config.export_dir = v;
        }
        if let Some(v) = self.print_dir {
            config.print_dir = v;
        }
        if self.printer.is_some() {
            config.printer_addr = self.printer;
        }
        if let Some(v) = self.log_level {
            config.log_level = v;
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Args::parse().into_config();
    setup_environment(&config);

    print_banner();
    tracing::info!(work_dir = %config.work_dir, "Tag station starting...");

    let mut station = TagStation::open(&config, Box::new(TerminalPrompt::stdio()))
        .context("failed to open tag station")?;

    if !station.host().is_online().await {
        tracing::warn!(printer = %station.host().describe(), "Label printer is not reachable");
    }

    let mut stdout = std::io::stdout();
    println!("{}", repl::help());
    repl::run(&mut station, &mut TerminalLines::stdio(), &mut stdout)
        .await
        .context("terminal closed")?;

    tracing::info!("Tag station stopped");
    Ok(())
}
