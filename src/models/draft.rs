//! 试卷草稿文件格式
//!
//! 草稿是宿主程序的输入：试卷信息 + 题型分配 + 按顺序填写的题目内容。
//! 草稿本身不做校验，校验由 `SetupForm` 和 `QuestionBank` 完成。

use serde::{Deserialize, Serialize};

use crate::models::{ImageRef, QuestionType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamDraft {
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub total_marks: u32,
    #[serde(default)]
    pub question_types: Vec<DraftAllocation>,
    #[serde(default)]
    pub questions: Vec<DraftQuestion>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl ExamDraft {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// 用于日志显示的名称
    pub fn display_name(&self) -> String {
        self.file_path
            .clone()
            .unwrap_or_else(|| format!("{} - {}", self.subject, self.class_name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftAllocation {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub marks: f64,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub text: String,
    /// 不填则使用每题默认分数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub paragraph: String,
    #[serde(default)]
    pub sub_questions: Vec<DraftSubQuestion>,
    #[serde(default)]
    pub match_pairs: Vec<DraftMatchPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSubQuestion {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftMatchPair {
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub right: String,
}
