//! 编辑会话 - 流程层
//!
//! 会话对象显式持有三个阶段的全部状态：设置表单、题库、最终题目列表。
//! 阶段之间只能按 设置 → 题目 → 预览 前进，或回到之前的阶段继续编辑，
//! 回退时已填写的内容保持不变。

use std::fmt::Display;

use tracing::info;

use crate::bank::QuestionBank;
use crate::error::{AppResult, StageError};
use crate::models::{ExamSetup, Question};
use crate::render::{export_all, export_document, render_document, render_preview, ExportFormat, ExportedDocument};
use crate::setup::SetupForm;

/// 当前所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 试卷设置
    Setup,
    /// 题目编辑
    Questions,
    /// 预览与导出
    Preview,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Setup => "setup",
            Stage::Questions => "questions",
            Stage::Preview => "preview",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 编辑会话
#[derive(Debug, Clone)]
pub struct ExamSession {
    stage: Stage,
    form: SetupForm,
    bank: Option<QuestionBank>,
    finalized: Vec<Question>,
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamSession {
    pub fn new() -> Self {
        Self {
            stage: Stage::Setup,
            form: SetupForm::new(),
            bank: None,
            finalized: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn require(&self, stage: Stage, operation: &'static str) -> Result<(), StageError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(StageError::WrongStage {
                current: self.stage.name(),
                operation,
            })
        }
    }

    pub fn setup_form(&self) -> &SetupForm {
        &self.form
    }

    pub fn setup_form_mut(&mut self) -> Result<&mut SetupForm, StageError> {
        self.require(Stage::Setup, "编辑试卷设置")?;
        Ok(&mut self.form)
    }

    /// 最近一次通过校验的试卷设置
    pub fn exam_setup(&self) -> Option<&ExamSetup> {
        self.bank.as_ref().map(|b| b.setup())
    }

    /// 提交设置并进入题目编辑阶段
    ///
    /// 已有题目时继续使用，否则按分配生成
    pub fn complete_setup(&mut self) -> AppResult<&mut QuestionBank> {
        self.require(Stage::Setup, "提交试卷设置")?;
        let setup = self.form.submit()?;

        let bank = match self.bank.take() {
            Some(existing) => QuestionBank::resume(setup, existing.into_questions()),
            None => QuestionBank::materialize(setup),
        };
        self.stage = Stage::Questions;
        info!("➡️ 进入题目编辑阶段");
        Ok(self.bank.insert(bank))
    }

    pub fn bank(&self) -> Option<&QuestionBank> {
        self.bank.as_ref()
    }

    pub fn bank_mut(&mut self) -> Result<&mut QuestionBank, StageError> {
        self.require(Stage::Questions, "编辑题目")?;
        self.bank.as_mut().ok_or(StageError::SetupNotFinalized)
    }

    /// 校验题目并进入预览阶段
    pub fn generate_preview(&mut self) -> AppResult<&[Question]> {
        self.require(Stage::Questions, "生成预览")?;
        let bank = self.bank.as_ref().ok_or(StageError::SetupNotFinalized)?;
        self.finalized = bank.generate_preview()?;
        self.stage = Stage::Preview;
        info!("➡️ 进入预览阶段");
        Ok(self.finalized.as_slice())
    }

    /// 从预览返回题目编辑
    pub fn edit_questions(&mut self) -> Result<(), StageError> {
        self.require(Stage::Preview, "返回编辑题目")?;
        self.stage = Stage::Questions;
        info!("⬅️ 返回题目编辑阶段");
        Ok(())
    }

    /// 返回试卷设置；表单和题目都保留
    pub fn back_to_setup(&mut self) {
        if self.stage != Stage::Setup {
            self.stage = Stage::Setup;
            info!("⬅️ 返回试卷设置阶段");
        }
    }

    /// 预览阶段的 (试卷设置, 最终题目)
    fn preview_content(&self, operation: &'static str) -> AppResult<(&ExamSetup, &[Question])> {
        self.require(Stage::Preview, operation)?;
        let setup = self.exam_setup().ok_or(StageError::SetupNotFinalized)?;
        Ok((setup, self.finalized.as_slice()))
    }

    /// 纯文本实时预览
    pub fn preview_text(&self) -> AppResult<String> {
        let (setup, questions) = self.preview_content("查看预览")?;
        Ok(render_preview(setup, questions))
    }

    /// 完整 HTML 文档
    pub fn document(&self) -> AppResult<String> {
        let (setup, questions) = self.preview_content("生成文档")?;
        Ok(render_document(setup, questions))
    }

    pub fn export(&self, format: ExportFormat) -> AppResult<ExportedDocument> {
        let (setup, questions) = self.preview_content("导出文档")?;
        Ok(export_document(setup, questions, format))
    }

    pub fn export_all(&self) -> AppResult<Vec<ExportedDocument>> {
        let (setup, questions) = self.preview_content("导出文档")?;
        Ok(export_all(setup, questions))
    }
}
