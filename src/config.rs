//! 配置文件 (~/.config/gmat-builder/config.toml)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BuilderError;
use crate::models::QuestionFormat;

pub const APP_DIR_NAME: &str = "gmat-builder";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 导出目录，缺省时使用下载目录
    pub export_dir: Option<PathBuf>,
    pub log_level: String,
    /// 启动时示例题目使用的格式
    pub initial_format: QuestionFormat,
    /// 预览头部的倒计时文字（仅展示）
    pub timer_text: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export_dir: None,
            log_level: "info".to_string(),
            initial_format: QuestionFormat::YesNoStatements,
            timer_text: "00:43:21".to_string(),
        }
    }
}

impl AppConfig {
    /// 实际使用的导出目录：配置 > 下载目录 > 当前目录
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// 默认配置文件路径
pub fn config_path() -> Result<PathBuf, BuilderError> {
    Ok(dirs::config_dir()
        .ok_or(BuilderError::NoUserDir("配置"))?
        .join(APP_DIR_NAME)
        .join("config.toml"))
}

/// 数据目录 (~/.local/share/gmat-builder/)，用于存放日志
pub fn data_dir() -> Result<PathBuf, BuilderError> {
    let dir = dirs::data_dir()
        .ok_or(BuilderError::NoUserDir("数据"))?
        .join(APP_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// 读取配置，文件不存在时返回默认值
pub fn load_config(path: &Path) -> Result<AppConfig, BuilderError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| BuilderError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| BuilderError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
