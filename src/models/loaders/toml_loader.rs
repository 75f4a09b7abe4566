use crate::error::{AppError, AppResult, FileError};
use crate::models::draft::ExamDraft;
use std::fs;
use std::path::{Path, PathBuf};

/// 从 TOML 文本解析试卷草稿
pub fn parse_draft(content: &str) -> Result<ExamDraft, toml::de::Error> {
    toml::from_str(content)
}

/// 从 TOML 文件加载试卷草稿
pub fn load_draft(toml_file_path: &Path) -> AppResult<ExamDraft> {
    let path_str = toml_file_path.to_string_lossy().to_string();
    let content = fs::read_to_string(toml_file_path)
        .map_err(|e| AppError::file_read_failed(path_str.clone(), e))?;

    let draft = parse_draft(&content).map_err(|e| AppError::toml_parse_failed(path_str.clone(), e))?;

    Ok(draft.with_file_path(path_str))
}

/// 从文件夹中加载所有 TOML 草稿，按文件名排序
///
/// 单个文件加载失败只记录警告，不影响其他文件
pub fn load_all_drafts(folder_path: &str) -> AppResult<Vec<ExamDraft>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let entries = fs::read_dir(&folder).map_err(|e| AppError::file_read_failed(folder_path, e))?;
    for entry in entries {
        let path = entry.map_err(|e| AppError::file_read_failed(folder_path, e))?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut drafts = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_draft(&path) {
            Ok(draft) => {
                tracing::info!(
                    "成功加载 {} 个题型, {} 道题目",
                    draft.question_types.len(),
                    draft.questions.len()
                );
                drafts.push(draft);
            }
            Err(e) => {
                tracing::warn!("加载文件失败: {}", e);
            }
        }
    }

    Ok(drafts)
}
