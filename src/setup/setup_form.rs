use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::SetupError;
use crate::models::{ExamSetup, QuestionType, QuestionTypeAllocation};

/// 新建表单时的默认总分
pub const DEFAULT_TOTAL_MARKS: u32 = 60;

/// 试卷设置表单
///
/// 题型分配按题型保存：取消勾选后再次勾选，之前填写的分数和数量仍然保留
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub school_name: String,
    pub subject: String,
    pub class_name: String,
    pub total_marks: u32,
    /// 已勾选的题型，按勾选顺序
    selected: Vec<QuestionType>,
    /// 本次会话中填写过的全部分配（包括已取消勾选的）
    allocations: HashMap<QuestionType, QuestionTypeAllocation>,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            subject: String::new(),
            class_name: String::new(),
            total_marks: DEFAULT_TOTAL_MARKS,
            selected: Vec::new(),
            allocations: HashMap::new(),
        }
    }
}

impl SetupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已完成的设置重新打开表单（返回上一步时使用）
    pub fn from_setup(setup: &ExamSetup) -> Self {
        let mut form = Self {
            school_name: setup.school_name.clone(),
            subject: setup.subject.clone(),
            class_name: setup.class_name.clone(),
            total_marks: setup.total_marks,
            ..Self::default()
        };
        for allocation in &setup.question_types {
            form.selected.push(allocation.question_type);
            form.allocations
                .insert(allocation.question_type, allocation.clone());
        }
        form
    }

    pub fn selected_types(&self) -> &[QuestionType] {
        &self.selected
    }

    pub fn is_selected(&self, question_type: QuestionType) -> bool {
        self.selected.contains(&question_type)
    }

    /// 勾选题型；新题型初始化为 (0 分, 0 题)，之前填写过的保持原值
    pub fn select(&mut self, question_type: QuestionType) {
        if self.is_selected(question_type) {
            return;
        }
        self.selected.push(question_type);
        self.allocations
            .entry(question_type)
            .or_insert_with(|| QuestionTypeAllocation::new(question_type, 0.0, 0));
        debug!("勾选题型: {}", question_type);
    }

    /// 取消勾选；分配数据保留在表单中
    pub fn deselect(&mut self, question_type: QuestionType) {
        self.selected.retain(|t| *t != question_type);
        debug!("取消勾选题型: {}", question_type);
    }

    /// 切换勾选状态，返回切换后是否勾选
    pub fn toggle(&mut self, question_type: QuestionType) -> bool {
        if self.is_selected(question_type) {
            self.deselect(question_type);
            false
        } else {
            self.select(question_type);
            true
        }
    }

    pub fn set_marks(&mut self, question_type: QuestionType, marks: f64) {
        self.allocation_entry(question_type).marks = marks;
    }

    pub fn set_count(&mut self, question_type: QuestionType, count: u32) {
        self.allocation_entry(question_type).count = count;
    }

    fn allocation_entry(&mut self, question_type: QuestionType) -> &mut QuestionTypeAllocation {
        self.allocations
            .entry(question_type)
            .or_insert_with(|| QuestionTypeAllocation::new(question_type, 0.0, 0))
    }

    /// 当前勾选题型的分配，按勾选顺序
    pub fn allocations(&self) -> Vec<QuestionTypeAllocation> {
        self.selected
            .iter()
            .map(|t| {
                self.allocations
                    .get(t)
                    .cloned()
                    .unwrap_or_else(|| QuestionTypeAllocation::new(*t, 0.0, 0))
            })
            .collect()
    }

    /// 已分配分数（仅统计已勾选题型）
    pub fn allocated_marks(&self) -> f64 {
        self.selected
            .iter()
            .filter_map(|t| self.allocations.get(t))
            .map(|a| a.marks)
            .sum()
    }

    /// 剩余未分配分数，可能为负
    pub fn remaining_marks(&self) -> f64 {
        f64::from(self.total_marks) - self.allocated_marks()
    }

    /// 校验并生成试卷设置
    ///
    /// 校验顺序：必填字段 → 总分 → 分数合计 → 题目数量
    pub fn submit(&self) -> Result<ExamSetup, SetupError> {
        let result = self.validate();
        match &result {
            Ok(setup) => info!(
                "✓ 试卷设置完成: {} / {} / {}，共 {} 个题型，总分 {}",
                setup.school_name,
                setup.subject,
                setup.class_name,
                setup.question_types.len(),
                setup.total_marks
            ),
            Err(e) => warn!("⚠️ 试卷设置校验未通过: {}", e),
        }
        result
    }

    fn validate(&self) -> Result<ExamSetup, SetupError> {
        for (field, value) in [
            ("school_name", &self.school_name),
            ("subject", &self.subject),
            ("class_name", &self.class_name),
        ] {
            if value.trim().is_empty() {
                return Err(SetupError::MissingField { field });
            }
        }
        if self.selected.is_empty() {
            return Err(SetupError::NoQuestionTypes);
        }
        if self.total_marks == 0 {
            return Err(SetupError::InvalidTotalMarks);
        }

        let allocated = self.allocated_marks();
        if allocated != f64::from(self.total_marks) {
            return Err(SetupError::AllocationMismatch {
                allocated,
                total: self.total_marks,
            });
        }

        let allocations = self.allocations();
        if let Some(bad) = allocations.iter().find(|a| a.count == 0) {
            return Err(SetupError::InvalidCount {
                question_type: bad.question_type,
                count: bad.count,
            });
        }

        Ok(ExamSetup {
            school_name: self.school_name.clone(),
            subject: self.subject.clone(),
            class_name: self.class_name.clone(),
            total_marks: self.total_marks,
            question_types: allocations,
        })
    }
}
