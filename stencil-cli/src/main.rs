//! stencil — render environment-specific Kubernetes and Argo CD manifests.
//!
//! # Usage
//!
//! ```text
//! render --environment dev|prod [--image-tag TAG] [--version VER]
//!        [--output-dir DIR] [--config-dir DIR] [--template-dir DIR] [--dry-run]
//! ```

mod commands;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use commands::render::RenderArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "render",
    about = "Render Kubernetes and Argo CD manifests from an environment config",
    long_about = None,
    // `--version` sets the application version; there is no binary version flag.
    disable_version_flag = true,
)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match cli.render.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("❌ {}", format!("{err:#}").red());
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; stdout carries the progress lines.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
