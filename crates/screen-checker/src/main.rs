//! Screen Checker entry point.
//!
//! Loads the configuration, picks a display source, and runs one of the
//! output modes.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config / init logging
//!  └─ display source and clipboard (native, or mock with --mock)
//!  └─ mode
//!       ├─ --json         -> ui_bridge::get_report / copy_row, printed as JSON
//!       ├─ --copy <ROW>   -> ui_bridge::copy_row
//!       ├─ --interactive  -> render loop: collect, present, read a row number
//!       └─ (default)      -> collect, present once
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use screen_checker::application::collect_profile::{
    collect_profile, DisplaySignalSource, ResourceLookup,
};
use screen_checker::application::present_profile::{
    handle_input, present, ClipboardSink, ImmersiveModeController, InputOutcome, NoImmersiveMode,
    ProfileView,
};
use screen_checker::infrastructure::clipboard::{CommandClipboard, MemoryClipboard};
use screen_checker::infrastructure::display_signals::{MockDisplaySource, SourceOptions};
use screen_checker::infrastructure::storage::config::{self, AppConfig, ConfigError};
use screen_checker::infrastructure::terminal::{TerminalImmersiveMode, TerminalSurface};
use screen_checker::infrastructure::ui_bridge;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Shows the screen's characteristics; any value can be copied to the
/// clipboard by its row number.
#[derive(Debug, Parser)]
#[command(
    name = "screen-checker",
    about = "Shows screen characteristics and copies any value to the clipboard",
    version
)]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, env = "SCREEN_CHECKER_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report (or the copy result) as a JSON envelope.
    #[arg(long)]
    json: bool,

    /// Copy the value of row ROW (1-based) and exit.
    #[arg(long, value_name = "ROW")]
    copy: Option<usize>,

    /// Keep the profile on screen and read row numbers from stdin.
    #[arg(long, conflicts_with = "json")]
    interactive: bool,

    /// Density scale override, e.g. 1.5 for 150 % scaling.
    #[arg(long, env = "SCREEN_CHECKER_SCALE")]
    scale: Option<f32>,

    /// Stay on the normal screen in interactive mode.
    #[arg(long)]
    no_immersive: bool,

    /// Use a fixed desktop display and an in-memory clipboard instead of the
    /// OS ones.
    #[arg(long)]
    mock: bool,

    /// Write the default config file and exit.
    #[arg(long)]
    init_config: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging needs the configured level, so the config is read first and
    // any fallback is reported once the subscriber exists.
    let (cfg, fallback) = load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.app.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(reason) = fallback {
        warn!(%reason, "using default configuration");
    }

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => {
                config::save_config_to(&cfg, path)?;
                path.clone()
            }
            None => config::save_config(&cfg)?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    let source = display_source(&cli, &cfg)?;
    let clipboard: Box<dyn ClipboardSink> = if cli.mock {
        Box::new(MemoryClipboard::new())
    } else {
        Box::new(CommandClipboard::new())
    };

    if cli.json {
        return print_json(&cli, source.as_ref(), &cfg.resources, clipboard.as_ref());
    }

    if let Some(row) = cli.copy {
        let result = ui_bridge::copy_row(source.as_ref(), &cfg.resources, row, clipboard.as_ref());
        match (result.data, result.error) {
            (Some(copied), _) => println!("Copied: {}", copied.value),
            (None, error) => bail!(error.unwrap_or_else(|| "copy failed".to_string())),
        }
        return Ok(());
    }

    if cli.interactive {
        let immersive = cfg.app.immersive && !cli.no_immersive;
        return run_interactive(source.as_ref(), &cfg.resources, clipboard.as_ref(), immersive);
    }

    let collected = collect_profile(source.as_ref(), &cfg.resources)
        .context("failed to read the display profile")?;
    let mut surface = TerminalSurface::new(std::io::stdout());
    surface.set_current_dpi(collected.profile.density_dpi);
    present(
        &ProfileView::new(&collected.profile),
        &mut surface,
        &mut NoImmersiveMode,
        false,
    )?;
    Ok(())
}

/// Loads the config from `path` or the platform default.
///
/// A missing platform config directory is not fatal: defaults are returned
/// together with the reason.
fn load_config(
    path: Option<&std::path::Path>,
) -> anyhow::Result<(AppConfig, Option<ConfigError>)> {
    let result = match path {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    match result {
        Ok(cfg) => Ok((cfg, None)),
        Err(e @ ConfigError::NoPlatformConfigDir) => Ok((AppConfig::default(), Some(e))),
        Err(e) => Err(e).context("failed to load configuration"),
    }
}

/// Builds the display source for this run.
fn display_source(cli: &Cli, cfg: &AppConfig) -> anyhow::Result<Box<dyn DisplaySignalSource>> {
    let options = cfg.source_options(cli.scale);
    if cli.mock {
        let scale = options.scale.unwrap_or(1.0);
        info!(scale, "using mock desktop display");
        return Ok(Box::new(MockDisplaySource::desktop_1080p_at(scale)));
    }
    native_source(options)
}

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
fn native_source(options: SourceOptions) -> anyhow::Result<Box<dyn DisplaySignalSource>> {
    use screen_checker::infrastructure::display_signals::NativeDisplaySource;
    Ok(Box::new(NativeDisplaySource::new(options)))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn native_source(_options: SourceOptions) -> anyhow::Result<Box<dyn DisplaySignalSource>> {
    bail!("no native display source for this platform; run with --mock")
}

/// Prints the `--json` envelope; a failed command exits non-zero.
fn print_json(
    cli: &Cli,
    source: &dyn DisplaySignalSource,
    resources: &dyn ResourceLookup,
    clipboard: &dyn ClipboardSink,
) -> anyhow::Result<()> {
    let (json, success) = match cli.copy {
        Some(row) => {
            let result = ui_bridge::copy_row(source, resources, row, clipboard);
            (serde_json::to_string_pretty(&result)?, result.success)
        }
        None => {
            let result = ui_bridge::get_report(source, resources);
            (serde_json::to_string_pretty(&result)?, result.success)
        }
    };
    println!("{json}");
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Interactive session: every pass re-reads the display, redraws, and waits
/// for one line on stdin.
///
/// A row number copies that row; `r` or an empty line redraws; `q` or end of
/// input quits.  Copy failures are logged and shown, never fatal.
fn run_interactive(
    source: &dyn DisplaySignalSource,
    resources: &dyn ResourceLookup,
    clipboard: &dyn ClipboardSink,
    immersive: bool,
) -> anyhow::Result<()> {
    let mut surface = TerminalSurface::new(std::io::stdout()).clearing();
    let mut chrome: Box<dyn ImmersiveModeController> = if immersive {
        Box::new(TerminalImmersiveMode::new(std::io::stdout()))
    } else {
        Box::new(NoImmersiveMode)
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut status = String::new();

    let outcome = loop {
        let collected = match collect_profile(source, resources) {
            Ok(collected) => collected,
            Err(e) => break Err(anyhow::Error::new(e).context("failed to read the display profile")),
        };
        let view = ProfileView::new(&collected.profile);
        surface.set_current_dpi(collected.profile.density_dpi);
        if let Err(e) = present(&view, &mut surface, chrome.as_mut(), true) {
            break Err(e.into());
        }

        if !status.is_empty() {
            surface.status(&status)?;
        }
        print!("Row to copy (1-{}), r to refresh, q to quit: ", view.rows().len());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break Ok(());
        };
        let line = line?;

        match handle_input(&view, &line, clipboard) {
            InputOutcome::Quit => break Ok(()),
            outcome => status = outcome.status().unwrap_or_default(),
        }
    };

    chrome.restore_system_chrome()?;
    outcome
}
