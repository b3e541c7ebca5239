use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";
pub const VERBOSE_FILTER: &str = "debug";

/// `--verbose` wins, then a non-empty `RUST_LOG`, then `info`.
pub fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return VERBOSE_FILTER.to_string();
    }

    match rust_log.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Installs the stderr subscriber for the binary.
pub fn init(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(verbose, rust_log.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .init();
}
