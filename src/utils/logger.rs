use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 本機開發用的精簡格式
    Compact,
    /// 容器 / 日誌收集器用的 JSON
    Json,
}

/// `RUST_LOG` takes precedence over the verbosity flag.
fn build_filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose {
        "dish_explorer=debug,info"
    } else {
        "dish_explorer=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let filter = build_filter(verbose);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init(),
    }
}
