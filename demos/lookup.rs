//! Build a store for the current and the "stage" environment and print the
//! `user` property from each.
//!
//! Run with `--verbose` to see which sources were applied.

use anyhow::Result;
use confstack::ConfigStore;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let verbose = std::env::args().any(|arg| arg == "--verbose" || arg == "-v");

    // RUST_LOG in the environment always takes precedence; --verbose falls
    // back to DEBUG so the per-source load diagnostics show up.
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();

    let store = ConfigStore::load();
    println!("user = {:?}", store.get_property("user"));

    let store = ConfigStore::builder().environment("stage").load();
    println!("user = {:?}", store.get_property("user"));

    Ok(())
}
