use thiserror::Error;

use crate::models::{OptionLabel, QuestionId, QuestionType};

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 试卷设置校验错误
    #[error("试卷设置错误: {0}")]
    Setup(#[from] SetupError),
    /// 题目编辑或校验错误
    #[error("题目错误: {0}")]
    Question(#[from] QuestionError),
    /// 阶段切换错误
    #[error("阶段错误: {0}")]
    Stage(#[from] StageError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 试卷设置（第一阶段）的校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// 必填字段为空
    #[error("必填字段为空: {field}")]
    MissingField { field: &'static str },
    /// 未选择任何题型
    #[error("至少需要选择一种题型")]
    NoQuestionTypes,
    /// 总分必须为正数
    #[error("总分必须大于 0")]
    InvalidTotalMarks,
    /// 已分配分数与总分不一致
    #[error("已分配分数 ({allocated}) 必须等于总分 ({total})")]
    AllocationMismatch { allocated: f64, total: u32 },
    /// 题型的题目数量必须至少为 1
    #[error("题型 {question_type} 的题目数量必须至少为 1 (当前: {count})")]
    InvalidCount {
        question_type: QuestionType,
        count: u32,
    },
}

/// 题目（第二阶段）的编辑与校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuestionError {
    /// 题目不存在
    #[error("题目不存在: {0}")]
    UnknownQuestion(QuestionId),
    /// 小题不存在
    #[error("题目 {question} 中不存在小题 {sub_question}")]
    UnknownSubQuestion {
        question: QuestionId,
        sub_question: QuestionId,
    },
    /// 连线配对不存在
    #[error("题目 {question} 中不存在配对 {pair}")]
    UnknownMatchPair { question: QuestionId, pair: QuestionId },
    /// 试卷设置中没有该题型
    #[error("试卷设置中没有题型: {0}")]
    UnknownSection(QuestionType),
    /// 题型不支持该编辑操作
    #[error("题目 {id} 的题型为 {actual}，不支持 {operation}")]
    WrongQuestionKind {
        id: QuestionId,
        actual: QuestionType,
        operation: &'static str,
    },
    /// 题干为空
    #[error("{question_type} 第 {position} 题的题干为空")]
    EmptyQuestionText {
        id: QuestionId,
        question_type: QuestionType,
        position: usize,
    },
    /// 选择题选项为空
    #[error("选择题第 {position} 题的选项 {label} 为空")]
    EmptyOption {
        id: QuestionId,
        position: usize,
        label: OptionLabel,
    },
    /// 选择题未设置正确答案
    #[error("选择题第 {position} 题未选择正确答案")]
    MissingCorrectAnswer { id: QuestionId, position: usize },
}

impl QuestionError {
    /// 是否为"选择题不完整"类错误
    pub fn is_incomplete_mcq(&self) -> bool {
        matches!(
            self,
            QuestionError::EmptyOption { .. } | QuestionError::MissingCorrectAnswer { .. }
        )
    }
}

/// 在错误的阶段调用了操作
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageError {
    #[error("当前阶段为 {current}，无法执行: {operation}")]
    WrongStage {
        current: &'static str,
        operation: &'static str,
    },
    #[error("尚未完成试卷设置")]
    SetupNotFinalized,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为用户输入校验错误（停留在当前阶段即可修正）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Setup(_)
                | AppError::Question(QuestionError::EmptyQuestionText { .. })
                | AppError::Question(QuestionError::EmptyOption { .. })
                | AppError::Question(QuestionError::MissingCorrectAnswer { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_mismatch_reports_both_values() {
        let err = SetupError::AllocationMismatch {
            allocated: 55.0,
            total: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("55"));
        assert!(msg.contains("60"));
    }

    #[test]
    fn test_validation_classification() {
        let id = QuestionId::new();
        let empty = AppError::from(QuestionError::EmptyQuestionText {
            id,
            question_type: QuestionType::ShortAnswer,
            position: 1,
        });
        assert!(empty.is_validation());

        let unknown = AppError::from(QuestionError::UnknownQuestion(id));
        assert!(!unknown.is_validation());

        let mcq = QuestionError::MissingCorrectAnswer { id, position: 2 };
        assert!(mcq.is_incomplete_mcq());
    }
}
