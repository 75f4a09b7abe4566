use tracing::{debug, info, warn};

use crate::error::QuestionError;
use crate::models::{ExamSetup, OptionLabel, Question, QuestionBody, QuestionId, QuestionType};

/// 题库：当前试卷的全部题目
///
/// 题目分数在生成后可独立修改；增删题目不会重新分配其他题目的分数
#[derive(Debug, Clone)]
pub struct QuestionBank {
    setup: ExamSetup,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// 按题型分配生成题目：每个分配生成 `count` 道，每题分数为 `marks / count`
    pub fn materialize(setup: ExamSetup) -> Self {
        let mut questions = Vec::new();
        for allocation in &setup.question_types {
            let marks = allocation.marks_per_question();
            for _ in 0..allocation.count {
                questions.push(Question::new(allocation.question_type, marks));
            }
            debug!(
                "生成 {} 道 {}，每题 {} 分",
                allocation.count, allocation.question_type, marks
            );
        }
        info!("✓ 已生成 {} 道空白题目", questions.len());
        Self { setup, questions }
    }

    /// 使用已有题目继续编辑；没有已有题目时重新生成
    pub fn resume(setup: ExamSetup, existing: Vec<Question>) -> Self {
        if existing.is_empty() {
            return Self::materialize(setup);
        }
        info!("继续编辑已有的 {} 道题目", existing.len());
        Self {
            setup,
            questions: existing,
        }
    }

    /// 更新试卷设置，已有题目保持不变
    pub fn replace_setup(&mut self, setup: ExamSetup) {
        self.setup = setup;
    }

    pub fn setup(&self) -> &ExamSetup {
        &self.setup
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    /// 某一题型的题目，按列表顺序
    pub fn questions_of(&self, question_type: QuestionType) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.question_type() == question_type)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 已填写的分数合计
    pub fn total_marks_entered(&self) -> f64 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    pub fn question(&self, id: QuestionId) -> Result<&Question, QuestionError> {
        self.questions
            .iter()
            .find(|q| q.id() == id)
            .ok_or(QuestionError::UnknownQuestion(id))
    }

    pub fn question_mut(&mut self, id: QuestionId) -> Result<&mut Question, QuestionError> {
        self.questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(QuestionError::UnknownQuestion(id))
    }

    /// 在某一题型下追加一道空白题目，分数为该分配的每题默认分数
    pub fn add_question(&mut self, question_type: QuestionType) -> Result<QuestionId, QuestionError> {
        let allocation = self
            .setup
            .allocation(question_type)
            .ok_or(QuestionError::UnknownSection(question_type))?;
        let question = Question::new(question_type, allocation.marks_per_question());
        let id = question.id();
        self.questions.push(question);
        debug!("添加题目: {} ({})", id, question_type);
        Ok(id)
    }

    pub fn delete_question(&mut self, id: QuestionId) -> Result<Question, QuestionError> {
        let pos = self
            .questions
            .iter()
            .position(|q| q.id() == id)
            .ok_or(QuestionError::UnknownQuestion(id))?;
        let removed = self.questions.remove(pos);
        debug!("删除题目: {} ({})", id, removed.question_type());
        Ok(removed)
    }

    /// 校验并输出最终题目列表
    ///
    /// 校验题库中的全部题目，包括已取消勾选的题型下保留的题目
    pub fn generate_preview(&self) -> Result<Vec<Question>, QuestionError> {
        if let Err(e) = self.validate() {
            warn!("⚠️ 题目校验未通过: {}", e);
            return Err(e);
        }
        info!("✓ 题目校验通过，共 {} 道", self.questions.len());
        Ok(self.questions.clone())
    }

    /// 校验顺序：先按设置中的分区顺序，再到设置中已不存在的题型
    fn validation_order(&self) -> impl Iterator<Item = QuestionType> + '_ {
        let dropped = QuestionType::ALL
            .into_iter()
            .filter(move |t| self.setup.allocation(*t).is_none());
        self.setup
            .question_types
            .iter()
            .map(|a| a.question_type)
            .chain(dropped)
    }

    fn validate(&self) -> Result<(), QuestionError> {
        for question_type in self.validation_order() {
            for (idx, question) in self.questions_of(question_type).enumerate() {
                if question.text.trim().is_empty() {
                    return Err(QuestionError::EmptyQuestionText {
                        id: question.id(),
                        question_type: question.question_type(),
                        position: idx + 1,
                    });
                }
            }
        }

        for (idx, question) in self.questions_of(QuestionType::Mcq).enumerate() {
            if let QuestionBody::Mcq {
                options,
                correct_answer,
            } = question.body()
            {
                if let Some(pos) = options.iter().position(|o| o.trim().is_empty()) {
                    return Err(QuestionError::EmptyOption {
                        id: question.id(),
                        position: idx + 1,
                        label: OptionLabel::from_index(pos).unwrap_or(OptionLabel::A),
                    });
                }
                if correct_answer.is_none() {
                    return Err(QuestionError::MissingCorrectAnswer {
                        id: question.id(),
                        position: idx + 1,
                    });
                }
            }
        }

        Ok(())
    }
}
