//! # Exam Paper
//!
//! 试卷编写引擎：填写试卷设置、按题型分配生成题目、编辑题目内容，
//! 最后渲染为可打印的 HTML 文档（以及带字节顺序标记的 DOC 版本）
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题型、试卷设置、题目及其类型专属内容、TOML 草稿
//!
//! ### ② 设置层（Setup）
//! - `setup/` - `SetupForm` 收集学校、科目、班级、总分与题型分配，提交时校验
//!
//! ### ③ 题库层（Bank）
//! - `bank/` - `QuestionBank` 按分配生成题目，提供增删改和预览前校验
//!
//! ### ④ 渲染层（Render）
//! - `render/` - 分区与全局题号、HTML 文档、纯文本预览、导出文件
//!
//! ### ⑤ 流程层（Workflow）
//! - `workflow/` - `ExamSession` 持有三个阶段的状态；`apply_draft` 用草稿驱动会话
//!
//! ### ⑥ 宿主程序（App）
//! - `app` - 批量读取草稿目录并导出到输出目录

pub mod app;
pub mod bank;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod setup;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use bank::QuestionBank;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ExamSetup, Question, QuestionType};
pub use render::{render_document, render_preview, ExportFormat, ExportedDocument};
pub use setup::SetupForm;
pub use workflow::{apply_draft, ExamSession, Stage};
