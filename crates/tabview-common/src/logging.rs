//! Logging bootstrap for embedders.
//!
//! The library crates only emit `tracing` events. A host that has no
//! subscriber of its own can call [`init`] once at startup.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Directive used when none is configured or the configured one is invalid.
pub const DEFAULT_DIRECTIVE: &str = "tabview=info";

/// Parse a log directive such as `tabview=debug` or `warn`.
pub fn parse_directive(directive: &str) -> Option<Directive> {
    directive.trim().parse().ok()
}

/// Install a global `fmt` subscriber filtered by `RUST_LOG` plus `directive`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(directive: &str) -> bool {
    let directive = parse_directive(directive).unwrap_or_else(|| {
        DEFAULT_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| Directive::from(tracing::Level::INFO))
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .try_init()
        .is_ok()
}
