use tracing_subscriber::EnvFilter;

/// LoggingError 日志初始化错误
#[derive(Debug, thiserror::Error)]
#[error("Failed to set tracing subscriber: {0}")]
pub struct LoggingError(String);

/// 构建日志过滤器，`RUST_LOG` 优先于配置的级别
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// 初始化全局日志订阅器
pub fn init(level: &str, json: bool) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| LoggingError(e.to_string()))
}
