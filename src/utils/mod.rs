use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "currentz=info";

/// Initializes the global tracing subscriber, honouring `RUST_LOG`.
///
/// Leaves an already installed global subscriber in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        if let Err(err) = fmt().with_env_filter(filter).try_init() {
            tracing::debug!(%err, "global tracing subscriber already installed");
        }
    });
}
