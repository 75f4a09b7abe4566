//! 试卷文档渲染（第三阶段）
//!
//! - `sections`：分区与全局题号，导出和预览共用
//! - `html`：从 (试卷设置, 题目列表) 生成 HTML 的纯函数
//! - `preview`：纯文本实时预览
//! - `export`：HTML / DOC 两种导出格式的后处理

pub mod export;
pub mod format;
pub mod html;
pub mod preview;
pub mod sections;

pub use export::{export_all, export_document, export_file_name, ExportFormat, ExportedDocument};
pub use format::{marks_annotation, sub_question_label};
pub use html::render_document;
pub use preview::render_preview;
pub use sections::{build_sections, NumberedQuestion, Section};

/// 固定的学年标题
pub const ACADEMIC_YEAR_CAPTION: &str = "Examination - 2025";

/// 固定的考试说明，每次渲染相同
pub const GENERAL_INSTRUCTIONS: [&str; 4] = [
    "All questions are compulsory.",
    "Read each question carefully before answering.",
    "Write your answers neatly and legibly.",
    "Marks are indicated against each question.",
];

/// 阅读材料题的固定提示
pub const PARAGRAPH_INSTRUCTION: &str = "Answer the following questions based on the above paragraph:";

/// 试卷结尾标记
pub const END_MARKER: &str = "*** End of Question Paper ***";
