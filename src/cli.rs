//! Command-line interface implementation for folio.
//! Provides argument parsing using clap.

use clap::Parser;

/// Command-line arguments structure for folio.
#[derive(Parser, Debug)]
#[command(author, version, about = "folio: build a personal site from content folders", long_about = None)]
pub struct Args {
    /// Keep running after the initial build and rebuild whenever content,
    /// templates or static files change
    #[arg(short, long)]
    pub watch: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
