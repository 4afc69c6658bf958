//! Tracing subscriber setup.
//!
//! Filter directives come from `SHEETLYTICS_LOG` (same syntax as
//! `RUST_LOG`) and default to `sheetlytics=info`.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives
pub const LOG_ENV_VAR: &str = "SHEETLYTICS_LOG";

const DEFAULT_DIRECTIVES: &str = "sheetlytics=info";

static INIT: OnceCell<()> = OnceCell::new();

/// Filter built from the environment, or the default directives
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global fmt subscriber. Later calls are no-ops, as is a call
/// made after another subscriber was installed.
pub fn init() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(false)
            .try_init();
    });
}
