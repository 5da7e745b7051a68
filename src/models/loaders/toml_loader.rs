use crate::error::{AppError, AppResult, FileError};
use crate::models::exam::{ExamAuditRecord, ExamSeed};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 种子文件结构：由若干 `[[exams]]` 表组成
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    exams: Vec<ExamSeed>,
}

/// 从 TOML 文本解析试卷记录
///
/// # 参数
/// - `content`: TOML 文本
/// - `origin`: 来源描述（仅用于错误信息）
pub fn parse_seed_str(content: &str, origin: &str) -> AppResult<Vec<ExamAuditRecord>> {
    let seed: SeedFile = toml::from_str(content).map_err(|source| {
        AppError::File(FileError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    })?;

    Ok(seed
        .exams
        .into_iter()
        .map(ExamAuditRecord::from_seed)
        .collect())
}

/// 从 TOML 文件加载试卷记录
pub async fn load_seed_file(path: &Path) -> AppResult<Vec<ExamAuditRecord>> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let records = parse_seed_str(&content, &path_str)?;
    tracing::info!("成功加载 {} 份试卷: {}", records.len(), path_str);

    Ok(records)
}
