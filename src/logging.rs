use anyhow::Context as _;

/// Stderr logging at "info" unless RUST_LOG says otherwise; stdout stays
/// reserved for command output such as the `keys export` record count.
pub fn init() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))?;

    Ok(())
}
