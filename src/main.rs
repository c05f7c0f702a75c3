//! Linemark - a line-oriented markdown editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! linemark
//! linemark notes.md
//! linemark --inspector --log-file linemark.log notes.md
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use linemark::app::App;
use linemark::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use linemark::ui::style::set_light_background;

/// A line-oriented markdown editor
#[derive(Parser, Debug)]
#[command(name = "linemark", version, about, long_about = None)]
struct Cli {
    /// Markdown file to seed the buffer with (never written back)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start with the debug inspector visible
    #[arg(long)]
    inspector: bool,

    /// Force the color palette background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Write tracing events to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linemark=debug"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let theme = effective.theme.unwrap_or(cli.theme);
    let colorfgbg = std::env::var("COLORFGBG").ok();
    set_light_background(theme.is_light(colorfgbg.as_deref()));

    let mut app = App::new().with_inspector(effective.inspector);
    if let Some(path) = cli.file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        app = app.with_source(path, text);
    }

    app.run().context("Application error")
}
