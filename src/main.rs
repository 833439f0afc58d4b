use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use navstack::screens::MenuScreen;
use navstack::state::{RuntimeConfig, Theme, ThemeVariant};

#[derive(Parser)]
#[command(name = "navstack", about = "Screen-stack navigation demo", version)]
struct Cli {
    /// Theme override: dark or light
    #[arg(long)]
    theme: Option<String>,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load_from(path)?,
        None => RuntimeConfig::load()?,
    };

    if let Some(theme) = &cli.theme {
        config.variant = match theme.to_ascii_lowercase().as_str() {
            "dark" => ThemeVariant::Dark,
            "light" => ThemeVariant::Light,
            other => anyhow::bail!("unknown theme '{}' (expected 'dark' or 'light')", other),
        };
        config.theme = Theme::new(config.variant);
    }

    navstack::store_runtime_config(config);

    navstack::runtime::run(Box::new(MenuScreen::new())).await
}
