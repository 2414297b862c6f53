//! LINBO Kiosk - terminal front end for the LINBO imaging client
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use linbo_app::config::{default_settings_path, init_settings_file};
use linbo_kiosk::LaunchOptions;

/// LINBO Kiosk - terminal front end for the LINBO imaging client
#[derive(Parser, Debug)]
#[command(name = "linbo-kiosk")]
#[command(about = "Kiosk front end for the LINBO network-boot imaging client", long_about = None)]
struct Args {
    /// Client configuration file (TOML); a demo client is used when omitted
    #[arg(long, value_name = "FILE")]
    client: Option<PathBuf>,

    /// Settings file (defaults to <config dir>/linbo-kiosk/settings.toml)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Password accepted by the simulated backend
    #[arg(long)]
    password: Option<String>,

    /// Run in headless mode (commands on stdin, JSON events on stdout)
    #[arg(long)]
    headless: bool,

    /// Write a default settings file and exit
    #[arg(long)]
    write_settings: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    if args.write_settings {
        let Some(path) = args.settings.clone().or_else(default_settings_path) else {
            eprintln!("❌ No configuration directory available, pass --settings <FILE>");
            std::process::exit(1);
        };
        init_settings_file(&path)?;
        eprintln!("✅ Settings file: {}", path.display());
        return Ok(());
    }

    linbo_kiosk::run(LaunchOptions {
        client: args.client,
        settings: args.settings,
        password: args.password,
        headless: args.headless,
    })
    .await?;
    Ok(())
}
