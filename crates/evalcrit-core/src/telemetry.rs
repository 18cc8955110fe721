//! Tracing initialisation for the `evalcrit` binary.
//!
//! The editor logs row edits and aggregate changes at `debug` and contract
//! faults at `warn`; screening logs one `debug` line per listing. Without
//! `RUST_LOG` only the evalcrit crates log at the requested level and every
//! dependency is held to `warn`.
//!
//! Logs always go to stderr: `edit` prints the submitted criteria JSON and
//! `screen` prints the verdict on stdout, and both must stay pipeable.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives used when `RUST_LOG` is not set.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("warn,evalcrit_core={level},evalcrit={level}")
}

/// Install the global subscriber. Only the first call takes effect.
///
/// With `json`, each line is a JSON object, for collecting `edit` sessions
/// run from scripts.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .ok();
    }
}
