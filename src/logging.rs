//! Debug trace setup for the `zoinks` binary.

use crate::error::Result;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where `--debug` sends the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugTarget {
    Stderr,
    File(String),
}

impl DebugTarget {
    /// `-` means the console; anything else is a file path.
    pub fn parse(s: &str) -> Self {
        if s == "-" {
            Self::Stderr
        } else {
            Self::File(s.to_string())
        }
    }
}

/// Install a subscriber writing debug-level events for this crate.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_debug_logger(target: &DebugTarget) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zoinks=debug,warn"));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .compact();

    match target {
        DebugTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::stderr))
            .init(),
        DebugTarget::File(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(Mutex::new(file)))
                .init()
        }
    }
    Ok(())
}
