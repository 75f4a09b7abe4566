//! 题目编辑（第二阶段）
//!
//! 按题型分配批量生成题目，支持增删改，生成预览前校验完整性

pub mod question_bank;

pub use question_bank::QuestionBank;
