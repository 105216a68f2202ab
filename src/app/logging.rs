// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const NOISY_MODULES: &str = "h2=info,hyper=info,hyper_util=info,reqwest=info,alloy_transport_http=info,alloy_rpc_client=info";

/// Build the filter directive string. A bare level (e.g. "debug") gets quiet
/// defaults for transport crates; strings with ',' or '=' are used as-is.
pub fn filter_directives(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.is_empty() {
        return format!("info,{NOISY_MODULES}");
    }
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},{NOISY_MODULES}")
    }
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn setup_logging(log_level: &str, json_format: bool) -> bool {
    let filter_spec = filter_directives(log_level);
    let filter = EnvFilter::from_str(&filter_spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = if json_format {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false);
        subscriber.with(json_layer).try_init().is_ok()
    } else {
        let fmt_layer = fmt::layer().with_target(true).compact();
        subscriber.with(fmt_layer).try_init().is_ok()
    };

    if installed {
        let base = filter_spec.split(',').next().unwrap_or("info");
        tracing::info!(
            base,
            format = if json_format { "json" } else { "compact" },
            "Logging initialized"
        );
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_levels_get_transport_defaults() {
        let spec = filter_directives("debug");
        assert!(spec.starts_with("debug,"));
        assert!(spec.contains("hyper=info"));
        assert!(EnvFilter::from_str(&spec).is_ok());
    }

    #[test]
    fn explicit_directives_are_respected() {
        assert_eq!(
            filter_directives("warn,executor=trace"),
            "warn,executor=trace"
        );
        assert!(filter_directives("  ").starts_with("info,"));
    }
}
