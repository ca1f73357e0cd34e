/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive when `RUST_LOG` is unset. The terminal UI carries
/// progress, so only warnings show unless `-v` is given.
pub fn default_directive(verbose: bool, silent: bool) -> &'static str {
    if verbose && !silent {
        "xfindsub=debug"
    } else {
        "xfindsub=warn"
    }
}

/// Installs the stderr subscriber. Stdout stays reserved for results.
pub fn init(verbose: bool, silent: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, silent)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_wins_over_verbose() {
        assert_eq!(default_directive(true, true), "xfindsub=warn");
        assert_eq!(default_directive(true, false), "xfindsub=debug");
    }

    #[test]
    fn default_run_stays_quiet_under_spinners() {
        assert_eq!(default_directive(false, false), "xfindsub=warn");
        assert_eq!(default_directive(false, true), "xfindsub=warn");
    }
}
