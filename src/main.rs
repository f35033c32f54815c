//! folio's main application entry point.
//! Parses arguments, loads the site configuration from the working
//! directory and runs a one-shot build or watch mode.

use folio::{
    builder::Builder,
    cli::{get_args, Args},
    config::SiteConfig,
    error::{default_error_handler, Result},
    events::{BuildMode, LogSink},
    logger::init_logger,
    watch::watch,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the site configuration from the current directory
/// 2. Runs a full build
/// 3. In watch mode, keeps rebuilding incrementally on every change;
///    a failed initial build is reported and watching continues
fn run(args: Args) -> Result<()> {
    let site_root = std::env::current_dir()?;
    let config = SiteConfig::load(&site_root)?;
    let sink = LogSink;

    if args.watch {
        log::info!("Starting watch mode...");
        if let Err(e) = Builder::new(&config, &sink).run(BuildMode::Full) {
            log::error!("Build failed: {e}");
        }
        return watch(&config, &sink);
    }

    Builder::new(&config, &sink).run(BuildMode::Full)?;
    Ok(())
}
