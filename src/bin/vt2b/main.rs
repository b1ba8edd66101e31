//! vt2b - terminal front end for the VT-2B Black glue processor
//!
//! Run with: cargo run --release
//! Logs go to stderr; set RUST_LOG (e.g. RUST_LOG=info) and redirect
//! stderr to a file to keep them out of the UI.

mod app;
mod source;
mod ui;

use app::Vt2b;
use source::Source;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    Vt2b::new()
        .source(Source::Drums {
            bpm: 120.0,
            amplitude: 0.9,
        })
        .drive(4.0)
        .mix(100.0)
        .run()
}
