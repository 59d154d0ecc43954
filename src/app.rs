//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the interrupt handler,
//! validates the source, and runs the mirror engine.

use anyhow::{Result, bail};
use dirsync::cli::{Args, USAGE_HINT};
use dirsync::output as out;
use dirsync::{CONFIG_ENV, Config, SyncError, config_path, load_config_file, shutdown, sync_dirs_with};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    if args.trees().is_none() {
        out::print_error(&format!("Source and destination folders are required. {USAGE_HINT}"));
        bail!("missing -src or -dst");
    }

    // Config file first, CLI flags win.
    let mut cfg = Config::default();
    let loaded_from = load_config_file()?.map(|(path, file_cfg)| {
        file_cfg.apply_to(&mut cfg);
        path
    });
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    // Guard is dropped on interrupt to flush the file appender.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        if let Err(e) = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current entry...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        }) {
            warn!(error = %e, "could not install interrupt handler");
        }
    }

    if let Some(path) = &loaded_from {
        debug!(path = %path.display(), "loaded config file");
    }
    debug!(?cfg, "starting dirsync");

    let result = (|| -> Result<()> {
        if let Err(e) = cfg.validate() {
            log_failure(&e, "Error validating source directory");
            return Err(anyhow::Error::new(e).context("Error validating source directory"));
        }

        match sync_dirs_with(&cfg.src_dir, &cfg.dst_dir, &cfg.sync_options()) {
            Ok(report) => {
                info!(
                    src = %cfg.src_dir.display(),
                    dst = %cfg.dst_dir.display(),
                    dry_run = cfg.dry_run,
                    %report,
                    "Directory sync complete"
                );
                if cfg.dry_run {
                    out::print_info(&format!("Dry-run: {report}"));
                }
                out::print_success("Directory sync complete");
                Ok(())
            }
            Err(e) => {
                log_failure(&e, "Error syncing directories");
                Err(anyhow::Error::new(e).context("Error syncing directories"))
            }
        }
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location() {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            std::path::Path::new(&explicit).display()
        ));
        return;
    }
    match config_path() {
        Some(p) => {
            out::print_info(&format!("Default dirsync config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

fn log_failure(e: &SyncError, what: &str) {
    error!(code = e.code(), kind = e.kind(), error = ?e, "{what}");
    out::print_error(&format!("{what}: {e}"));
    if let Some(hint) = e.hint() {
        out::print_info(&format!("hint: {hint}"));
    }
}
