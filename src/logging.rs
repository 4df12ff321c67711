//! 日志初始化

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 覆盖日志过滤规则的环境变量
pub const LOG_ENV: &str = "DIGRAPH_LOG";

/// 根据命令行参数初始化 tracing，输出到 stderr
///
/// 优先级：`RUST_LOG` / `DIGRAPH_LOG` > `--log-level` > `--verbose` > 默认 `digraph=warn`。
/// `log_level` 不含 `=` 时视为 `digraph` 的级别。
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => directive(level),
        (true, None) => "digraph=debug".to_string(),
        (false, None) => "digraph=warn".to_string(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

fn directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("digraph={}", level)
    }
}
