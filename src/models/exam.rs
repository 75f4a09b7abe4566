use serde::{Deserialize, Serialize};

use crate::models::QuestionType;

/// 题型分配：某一题型的总分和题目数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTypeAllocation {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub marks: f64,
    pub count: u32,
}

impl QuestionTypeAllocation {
    pub fn new(question_type: QuestionType, marks: f64, count: u32) -> Self {
        Self {
            question_type,
            marks,
            count,
        }
    }

    /// 每题分数 = 总分 / 题目数量，不取整
    ///
    /// 数量为 0 时返回 0
    pub fn marks_per_question(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.marks / f64::from(self.count)
        }
    }
}

/// 已完成校验的试卷设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSetup {
    pub school_name: String,
    pub subject: String,
    pub class_name: String,
    pub total_marks: u32,
    /// 题型分配，顺序即分区顺序
    pub question_types: Vec<QuestionTypeAllocation>,
}

impl ExamSetup {
    /// 按题型查找分配
    pub fn allocation(&self, question_type: QuestionType) -> Option<&QuestionTypeAllocation> {
        self.question_types
            .iter()
            .find(|a| a.question_type == question_type)
    }

    /// 已分配分数之和
    pub fn allocated_marks(&self) -> f64 {
        self.question_types.iter().map(|a| a.marks).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_per_question_is_not_rounded() {
        let even = QuestionTypeAllocation::new(QuestionType::ShortAnswer, 20.0, 4);
        assert_eq!(even.marks_per_question(), 5.0);

        let thirds = QuestionTypeAllocation::new(QuestionType::LongAnswer, 10.0, 3);
        assert_eq!(thirds.marks_per_question(), 10.0 / 3.0);
    }

    #[test]
    fn test_marks_per_question_zero_count() {
        let empty = QuestionTypeAllocation::new(QuestionType::TrueFalse, 10.0, 0);
        assert_eq!(empty.marks_per_question(), 0.0);
    }
}
