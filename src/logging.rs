//! 日志
//!
//! 终端被 TUI 占用，日志写入数据目录下的文件。

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::BuilderError;

pub const LOG_FILE_NAME: &str = "gmat-builder.log";

/// 初始化全局日志，返回的 guard 需要保持到程序退出
pub fn init(log_dir: &Path, level: &str) -> Result<WorkerGuard, BuilderError> {
    let filter = EnvFilter::try_new(level).map_err(|e| BuilderError::Logging(e.to_string()))?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| BuilderError::Logging(e.to_string()))?;

    Ok(guard)
}
