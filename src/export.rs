use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::BuilderError;
use crate::models::Question;

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "gmat-question.json";

/// 序列化为两空格缩进的 JSON，key 顺序与字段声明顺序一致
pub fn to_json(question: &Question) -> Result<String, BuilderError> {
    Ok(serde_json::to_string_pretty(question)?)
}

/// 从导出的 JSON 还原题目
#[cfg(test)]
pub fn from_json(content: &str) -> Result<Question, BuilderError> {
    Ok(serde_json::from_str(content)?)
}

/// 把当前题目快照写入 `dir/gmat-question.json`
pub fn export_question(question: &Question, dir: &Path) -> Result<PathBuf, BuilderError> {
    let content = to_json(question)?;
    let path = dir.join(EXPORT_FILE_NAME);

    fs::create_dir_all(dir).map_err(|source| BuilderError::ExportWrite {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, content).map_err(|source| BuilderError::ExportWrite {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "题目已导出");
    Ok(path)
}
