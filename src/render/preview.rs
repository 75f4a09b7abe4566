use std::fmt;

use crate::models::{ExamSetup, OptionLabel, Question, QuestionBody};
use crate::render::format::{format_number, marks_annotation, sub_question_label};
use crate::render::sections::build_sections;
use crate::render::{ACADEMIC_YEAR_CAPTION, END_MARKER, GENERAL_INSTRUCTIONS, PARAGRAPH_INSTRUCTION};

const RULE_WIDTH: usize = 60;
const ANSWER_LINE: &str = "   Answer: ________________________________________";

/// 纯文本实时预览
///
/// 与导出文档共用分区和题号逻辑，只是呈现方式不同
pub fn render_preview(setup: &ExamSetup, questions: &[Question]) -> String {
    PreviewText { setup, questions }.to_string()
}

struct PreviewText<'a> {
    setup: &'a ExamSetup,
    questions: &'a [Question],
}

impl fmt::Display for PreviewText<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(out, self.setup, self.questions)
    }
}

fn write_preview(out: &mut fmt::Formatter<'_>, setup: &ExamSetup, questions: &[Question]) -> fmt::Result {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", setup.school_name)?;
    writeln!(out, "{}", ACADEMIC_YEAR_CAPTION)?;
    writeln!(
        out,
        "Subject: {}    Class: {}    Total Marks: {}",
        setup.subject, setup.class_name, setup.total_marks
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    writeln!(out, "General Instructions:")?;
    for line in GENERAL_INSTRUCTIONS {
        writeln!(out, "  • {}", line)?;
    }

    for section in build_sections(setup, questions) {
        writeln!(out)?;
        writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
        writeln!(out, "{}", section.label())?;
        writeln!(out, "(Total Marks: {})", format_number(section.allocation.marks))?;

        for numbered in &section.questions {
            let question = numbered.question;
            writeln!(out)?;
            writeln!(
                out,
                "{}. {} {}",
                numbered.number,
                question.text,
                marks_annotation(question.marks)
            )?;
            if let Some(image) = &question.image {
                writeln!(out, "   [Image: {}]", image.url)?;
            }

            match question.body() {
                QuestionBody::Mcq { options, .. } => {
                    for (label, option) in OptionLabel::ALL.iter().zip(options.iter()) {
                        writeln!(out, "   {}) {}", label, option)?;
                    }
                }
                QuestionBody::Paragraph {
                    paragraph,
                    sub_questions,
                } => {
                    if !paragraph.trim().is_empty() {
                        writeln!(out, "   | {}", paragraph)?;
                    }
                    if !sub_questions.is_empty() {
                        writeln!(out, "   {}", PARAGRAPH_INSTRUCTION)?;
                        for (idx, sub) in sub_questions.iter().enumerate() {
                            writeln!(
                                out,
                                "     {} {} {}",
                                sub_question_label(idx),
                                sub.text,
                                marks_annotation(sub.marks)
                            )?;
                            if let Some(image) = &sub.image {
                                writeln!(out, "       [Image: {}]", image.url)?;
                            }
                            writeln!(out, "  {}", ANSWER_LINE)?;
                        }
                    }
                }
                QuestionBody::MatchTheFollowing { .. } | QuestionBody::Plain => {
                    writeln!(out, "{}", ANSWER_LINE)?;
                }
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", END_MARKER)
}
