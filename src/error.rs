//! 错误类型

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 启动、配置与导出过程中的错误
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("无法获取用户{0}目录")]
    NoUserDir(&'static str),

    #[error("读取配置文件 {path} 失败: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("解析配置文件 {path} 失败: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("序列化题目失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("写入导出文件 {path} 失败: {source}")]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("日志初始化失败: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// 被拒绝的编辑操作，题目保持不变
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("列 key 不能为空")]
    EmptyColumnKey,

    #[error("列 key \"id\" 为行 id 保留")]
    ReservedColumnKey,

    #[error("列 key \"{0}\" 已存在")]
    DuplicateColumnKey(String),
}
