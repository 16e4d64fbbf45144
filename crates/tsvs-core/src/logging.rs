use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global tracing subscriber for tools embedding the resolver.
///
/// `RUST_LOG` selects the filter; without it `default_directive` is used
/// (e.g. `"info"` or `"tsvs_core=debug"`). Fails instead of panicking when a
/// subscriber is already installed.
pub fn init(default_directive: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer().with_target(true).with_level(true).compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
