//! 试卷设置（第一阶段）
//!
//! 收集试卷信息和题型分配，提交时校验分数与数量

pub mod setup_form;

pub use setup_form::SetupForm;
