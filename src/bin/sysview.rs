//! sysview - live terminal dashboard for local system resources.
//!
//! Usage:
//!   sysview                       # settings from the config file
//!   sysview -i 2                  # sample every 2 seconds
//!   sysview -t nord               # use the nord theme (saved to config)
//!   sysview --log-file /tmp/sv.log -vv

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::Ordering;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sysview::collector::SystemSource;
use sysview::config::{ConfigStore, GraphSymbol, Overrides};
use sysview::provider::LiveProvider;
use sysview::theme::ThemeSet;
use sysview::tui::{App, CrosstermKeys};

/// Live terminal dashboard for CPU, memory, network, disks and processes.
#[derive(Parser)]
#[command(name = "sysview", about = "System resource dashboard", version)]
struct Args {
    /// Update interval in seconds. Overrides `update_ms` from the config.
    #[arg(short, long, value_name = "SECONDS")]
    interval: Option<f64>,

    /// Color theme name (default, nord, dracula, gruvbox or a theme file).
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// Path to the configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Graph glyphs: braille, block or tty.
    #[arg(long, value_name = "SYMBOL")]
    graph_symbol: Option<GraphSymbol>,

    /// Write logs to this file. Logging is off otherwise.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initializes the tracing subscriber writing to `path`.
fn init_logging(path: &Path, verbose: u8) -> std::io::Result<()> {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let file = File::create(path)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("Error: cannot open log file {}: {}", path.display(), e);
        std::process::exit(1);
    }

    let store = match args.config.clone() {
        Some(path) => Some(ConfigStore::new(path)),
        None => match ConfigStore::default_location() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "no config location, settings will not be saved");
                None
            }
        },
    };
    let mut config = store.as_ref().map(ConfigStore::load).unwrap_or_default();

    let mut overrides = Overrides {
        graph_symbol: args.graph_symbol,
        ..Overrides::default()
    };
    if let Some(secs) = args.interval {
        if secs.is_finite() && secs > 0.0 {
            overrides.update_ms = Some((secs * 1000.0).round() as u64);
        } else {
            eprintln!("Error: interval must be a positive number of seconds");
            std::process::exit(1);
        }
    }

    let themes = match store.as_ref().and_then(ConfigStore::dir) {
        Some(dir) => ThemeSet::with_dir(&dir.join("themes")),
        None => ThemeSet::builtin(),
    };
    let requested = args.theme.as_deref().unwrap_or(&config.color_theme).to_string();
    let theme = themes.resolve(&requested);
    if args.theme.is_some() && config.color_theme != theme.name() {
        config.color_theme = theme.name().to_string();
        if let Some(store) = &store {
            store.save_or_warn(&config);
        }
    }

    let source = match SystemSource::new() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read system metrics: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        theme = theme.name(),
        update_ms = overrides.apply(&config).update_ms,
        "starting sysview"
    );

    let app = App::new(
        LiveProvider::new(source),
        CrosstermKeys,
        config,
        store,
        theme,
    )
    .with_overrides(overrides);

    let interrupted = app.interrupt_flag();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        interrupted.store(true, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    if let Err(e) = app.run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    info!("sysview stopped");
}
