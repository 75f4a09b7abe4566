use crate::models::{ExamSetup, Question, QuestionType, QuestionTypeAllocation};

/// 带全局题号的题目
#[derive(Debug, Clone, Copy)]
pub struct NumberedQuestion<'a> {
    pub number: usize,
    pub question: &'a Question,
}

/// 一个渲染分区
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub allocation: &'a QuestionTypeAllocation,
    pub questions: Vec<NumberedQuestion<'a>>,
}

impl Section<'_> {
    pub fn question_type(&self) -> QuestionType {
        self.allocation.question_type
    }

    pub fn label(&self) -> &'static str {
        self.allocation.question_type.section_label()
    }
}

/// 按试卷设置中的题型顺序分区，并分配全局题号
///
/// - 没有题目的分区整体跳过
/// - 题号从 1 开始，跨分区连续递增，不按分区重置
/// - 不属于任何分配的题目不渲染
pub fn build_sections<'a>(setup: &'a ExamSetup, questions: &'a [Question]) -> Vec<Section<'a>> {
    let mut next_number = 1;
    let mut sections = Vec::new();

    for allocation in &setup.question_types {
        let numbered: Vec<_> = questions
            .iter()
            .filter(|q| q.question_type() == allocation.question_type)
            .map(|question| {
                let number = next_number;
                next_number += 1;
                NumberedQuestion { number, question }
            })
            .collect();

        if numbered.is_empty() {
            continue;
        }
        sections.push(Section {
            allocation,
            questions: numbered,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(types: &[QuestionType]) -> ExamSetup {
        ExamSetup {
            school_name: "School".to_string(),
            subject: "Subject".to_string(),
            class_name: "Class".to_string(),
            total_marks: 10,
            question_types: types
                .iter()
                .map(|t| QuestionTypeAllocation::new(*t, 10.0, 1))
                .collect(),
        }
    }

    #[test]
    fn test_global_numbering_skips_empty_sections() {
        let setup = setup(&[
            QuestionType::Mcq,
            QuestionType::ShortAnswer,
            QuestionType::LongAnswer,
        ]);
        let questions = vec![
            Question::new(QuestionType::LongAnswer, 1.0),
            Question::new(QuestionType::Mcq, 1.0),
            Question::new(QuestionType::LongAnswer, 1.0),
            Question::new(QuestionType::Mcq, 1.0),
            Question::new(QuestionType::LongAnswer, 1.0),
        ];

        let sections = build_sections(&setup, &questions);
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].question_type(), QuestionType::Mcq);
        let mcq: Vec<_> = sections[0].questions.iter().map(|n| n.number).collect();
        assert_eq!(mcq, vec![1, 2]);
        assert_eq!(sections[0].questions[0].question.id(), questions[1].id());

        assert_eq!(sections[1].question_type(), QuestionType::LongAnswer);
        let long: Vec<_> = sections[1].questions.iter().map(|n| n.number).collect();
        assert_eq!(long, vec![3, 4, 5]);
        assert_eq!(sections[1].questions[0].question.id(), questions[0].id());
    }

    #[test]
    fn test_section_letters_do_not_shift() {
        let setup = setup(&[QuestionType::ShortAnswer]);
        let questions = vec![Question::new(QuestionType::ShortAnswer, 1.0)];
        let sections = build_sections(&setup, &questions);
        assert_eq!(sections[0].label(), "Section B: Short Answer Questions");
    }

    #[test]
    fn test_questions_outside_setup_are_ignored() {
        let setup = setup(&[QuestionType::TrueFalse]);
        let questions = vec![
            Question::new(QuestionType::Mcq, 1.0),
            Question::new(QuestionType::TrueFalse, 1.0),
        ];
        let sections = build_sections(&setup, &questions);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].questions.len(), 1);
        assert_eq!(sections[0].questions[0].number, 1);
    }
}
