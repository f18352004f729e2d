use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Call once, before anything logs.
///
/// Output goes to stderr so stdout stays clean for the report. `RUST_LOG`
/// overrides the default `info` filter (e.g. `RUST_LOG=graph_reach_core=debug`).
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().with_ansi(false).with_current_span(true).init();
    } else {
        builder.init();
    }
}
