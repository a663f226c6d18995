use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only tracing setup; the level comes from `RUST_LOG` and falls
/// back to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
