// Structured JSON logs on stdout, one object per event.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // module names add nothing to circulation events
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .json()
        .init();
}
