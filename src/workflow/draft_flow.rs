//! 草稿处理流程
//!
//! 把一份试卷草稿按界面操作的顺序灌入会话：
//! 填写设置 → 提交 → 逐题填写内容 → 生成预览

use tracing::{debug, warn};

use crate::error::{AppResult, QuestionError};
use crate::models::{DraftQuestion, ExamDraft, OptionLabel, Question, QuestionId, QuestionType};
use crate::workflow::exam_session::ExamSession;

/// 用草稿驱动一个新会话，成功时会话停在预览阶段
///
/// 某题型的第 i 道草稿题填入该题型第 i 道已生成的题目；
/// 草稿题多于生成数量时追加新题，少于时剩余题目保持空白（会在生成预览时被拦下）
pub fn apply_draft(draft: &ExamDraft) -> AppResult<ExamSession> {
    let mut session = ExamSession::new();

    let form = session.setup_form_mut()?;
    form.school_name = draft.school_name.clone();
    form.subject = draft.subject.clone();
    form.class_name = draft.class_name.clone();
    form.total_marks = draft.total_marks;
    for allocation in &draft.question_types {
        form.select(allocation.question_type);
        form.set_marks(allocation.question_type, allocation.marks);
        form.set_count(allocation.question_type, allocation.count);
    }

    let bank = session.complete_setup()?;
    // 草稿中出现了设置里没有的题型
    if let Some(orphan) = draft
        .questions
        .iter()
        .find(|q| bank.setup().allocation(q.question_type).is_none())
    {
        return Err(QuestionError::UnknownSection(orphan.question_type).into());
    }

    let section_order: Vec<QuestionType> = bank
        .setup()
        .question_types
        .iter()
        .map(|a| a.question_type)
        .collect();

    for question_type in section_order {
        let mut slots: Vec<QuestionId> = bank.questions_of(question_type).map(|q| q.id()).collect();
        slots.reverse();

        for draft_question in draft
            .questions
            .iter()
            .filter(|q| q.question_type == question_type)
        {
            let id = match slots.pop() {
                Some(id) => id,
                None => bank.add_question(question_type)?,
            };
            fill_question(bank.question_mut(id)?, draft_question)?;
        }
    }

    session.generate_preview()?;
    Ok(session)
}

fn fill_question(question: &mut Question, draft: &DraftQuestion) -> AppResult<()> {
    question.set_text(draft.text.clone());
    if let Some(marks) = draft.marks {
        question.set_marks(marks);
    }
    if let Some(image) = &draft.image {
        question.set_image_url(&image.url);
        question.set_image_size(image.size);
        question.set_image_position(image.position);
    }

    for (idx, option) in draft.options.iter().enumerate() {
        match OptionLabel::from_index(idx) {
            Some(label) => question.set_option(label, option.clone())?,
            None => warn!("题目 {} 的选项超过 4 个，忽略: {}", question.id(), option),
        }
    }
    if let Some(answer) = &draft.correct_answer {
        match OptionLabel::parse(answer) {
            Some(label) => question.set_correct_answer(Some(label))?,
            None => warn!("题目 {} 的正确答案无效: {}", question.id(), answer),
        }
    }

    if !draft.paragraph.is_empty() {
        question.set_paragraph(draft.paragraph.clone())?;
    }
    for sub in &draft.sub_questions {
        let sub_id = question.add_sub_question()?;
        let target = question.sub_question_mut(sub_id)?;
        target.text = sub.text.clone();
        target.marks = sub.marks;
        target.image = sub.image.clone();
    }
    if let Some(check) = question.marks_check() {
        if !check.is_balanced() && !draft.sub_questions.is_empty() {
            // 仅提示，不阻止生成预览
            warn!(
                "题目 {} 的小题分数合计 {} 与本题分数 {} 不一致",
                question.id(),
                check.sub_total,
                check.question_marks
            );
        }
    }

    for pair in &draft.match_pairs {
        let pair_id = question.add_match_pair()?;
        question.set_match_pair(pair_id, pair.left.clone(), pair.right.clone())?;
    }

    debug!("已填写题目 {} ({})", question.id(), question.question_type());
    Ok(())
}
