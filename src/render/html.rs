use std::fmt;

use crate::models::{
    ExamSetup, ImagePosition, ImageRef, ImageSize, OptionLabel, Question, QuestionBody, SubQuestion,
};
use crate::render::format::{escape_html, format_number, marks_annotation, sub_question_label};
use crate::render::sections::{build_sections, NumberedQuestion, Section};
use crate::render::{ACADEMIC_YEAR_CAPTION, END_MARKER, GENERAL_INSTRUCTIONS, PARAGRAPH_INSTRUCTION};

/// 生成完整的试卷 HTML 文档
///
/// 纯函数：相同输入始终得到相同输出，两种导出格式都基于此结果
pub fn render_document(setup: &ExamSetup, questions: &[Question]) -> String {
    ExamDocument { setup, questions }.to_string()
}

struct ExamDocument<'a> {
    setup: &'a ExamSetup,
    questions: &'a [Question],
}

impl fmt::Display for ExamDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setup = self.setup;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"UTF-8\">")?;
        writeln!(
            f,
            "<title>{} - {} Examination</title>",
            escape_html(&setup.subject),
            escape_html(&setup.class_name)
        )?;
        writeln!(f, "<style>")?;
        writeln!(
            f,
            "body {{ font-family: Arial, sans-serif; max-width: 900px; margin: 40px auto; padding: 40px; line-height: 1.6; }}"
        )?;
        writeln!(f, "@media print {{ body {{ margin: 0; padding: 20px; }} }}")?;
        writeln!(f, "</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;

        write_header(f, setup)?;
        write_instructions(f)?;

        for section in build_sections(setup, self.questions) {
            write_section(f, &section)?;
        }

        writeln!(
            f,
            "<div style=\"margin-top: 50px; padding-top: 20px; border-top: 1px solid #d1d5db; text-align: center; color: #6b7280; font-size: 14px;\">{}</div>",
            END_MARKER
        )?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, setup: &ExamSetup) -> fmt::Result {
    writeln!(
        f,
        "<div style=\"text-align: center; border-bottom: 2px solid #d1d5db; padding-bottom: 20px; margin-bottom: 30px;\">"
    )?;
    writeln!(f, "<h1 style=\"margin-bottom: 15px;\">{}</h1>", escape_html(&setup.school_name))?;
    writeln!(f, "<div style=\"margin-bottom: 10px;\">{}</div>", ACADEMIC_YEAR_CAPTION)?;
    writeln!(
        f,
        "<div style=\"display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; margin-top: 25px; text-align: left; max-width: 700px; margin-left: auto; margin-right: auto;\">"
    )?;
    for (label, value) in [
        ("Subject:", escape_html(&setup.subject)),
        ("Class:", escape_html(&setup.class_name)),
        ("Total Marks:", setup.total_marks.to_string()),
    ] {
        writeln!(
            f,
            "<div><span style=\"color: #4b5563;\">{}</span><span style=\"margin-left: 10px;\">{}</span></div>",
            label, value
        )?;
    }
    writeln!(f, "</div>")?;
    writeln!(f, "</div>")
}

fn write_instructions(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        "<div style=\"margin-bottom: 30px; padding: 15px; background-color: #f9fafb; border-radius: 8px;\">"
    )?;
    writeln!(f, "<h3 style=\"margin-bottom: 10px;\">General Instructions:</h3>")?;
    writeln!(f, "<ul style=\"color: #374151; font-size: 14px; line-height: 1.8;\">")?;
    for line in GENERAL_INSTRUCTIONS {
        writeln!(f, "<li>{}</li>", line)?;
    }
    writeln!(f, "</ul>")?;
    writeln!(f, "</div>")
}

fn write_section(f: &mut fmt::Formatter<'_>, section: &Section<'_>) -> fmt::Result {
    writeln!(
        f,
        "<div style=\"border-top: 2px solid #e5e7eb; padding-top: 20px; margin-top: 30px;\">"
    )?;
    writeln!(f, "<h3 style=\"margin-bottom: 15px; font-weight: 600;\">{}</h3>", section.label())?;
    writeln!(
        f,
        "<p style=\"font-size: 14px; color: #4b5563; margin-bottom: 15px;\">(Total Marks: {})</p>",
        format_number(section.allocation.marks)
    )?;
    for numbered in &section.questions {
        write_question(f, numbered)?;
    }
    writeln!(f, "</div>")
}

fn write_question(f: &mut fmt::Formatter<'_>, numbered: &NumberedQuestion<'_>) -> fmt::Result {
    let question = numbered.question;
    writeln!(f, "<div style=\"margin-bottom: 20px; margin-left: 20px;\">")?;
    writeln!(f, "<div style=\"display: flex; gap: 10px;\">")?;
    writeln!(f, "<span style=\"font-weight: 500;\">{}.</span>", numbered.number)?;
    writeln!(f, "<div style=\"flex: 1;\">")?;
    writeln!(
        f,
        "<div style=\"margin-bottom: 10px;\">{}<span style=\"margin-left: 10px; font-size: 14px; color: #666;\">{}</span></div>",
        escape_html(&question.text),
        marks_annotation(question.marks)
    )?;

    if let Some(image) = &question.image {
        write_image(f, image, "Question image")?;
    }

    match question.body() {
        QuestionBody::Mcq { options, .. } => {
            writeln!(f, "<div style=\"margin: 10px 0 10px 20px;\">")?;
            for (label, option) in OptionLabel::ALL.iter().zip(options.iter()) {
                writeln!(
                    f,
                    "<div style=\"margin-bottom: 5px;\">{}) {}</div>",
                    label,
                    escape_html(option)
                )?;
            }
            writeln!(f, "</div>")?;
        }
        QuestionBody::Paragraph {
            paragraph,
            sub_questions,
        } => write_paragraph(f, paragraph, sub_questions)?,
        // 连线题的配对不输出，与其他题型一样只留答题线
        QuestionBody::MatchTheFollowing { .. } | QuestionBody::Plain => write_answer_line(f)?,
    }

    writeln!(f, "</div>")?;
    writeln!(f, "</div>")?;
    writeln!(f, "</div>")
}

fn write_paragraph(
    f: &mut fmt::Formatter<'_>,
    paragraph: &str,
    sub_questions: &[SubQuestion],
) -> fmt::Result {
    let has_paragraph = !paragraph.trim().is_empty();
    if has_paragraph {
        writeln!(
            f,
            "<div style=\"margin: 15px 0; padding: 15px; background-color: #f9fafb; border-left: 3px solid #3b82f6; border-radius: 4px;\">"
        )?;
        writeln!(
            f,
            "<div style=\"font-style: italic; color: #374151; line-height: 1.6;\">{}</div>",
            escape_html(paragraph)
        )?;
        writeln!(f, "</div>")?;
    }
    if !has_paragraph && sub_questions.is_empty() {
        return Ok(());
    }

    writeln!(
        f,
        "<div style=\"margin-top: 15px;\"><strong>{}</strong></div>",
        PARAGRAPH_INSTRUCTION
    )?;
    if sub_questions.is_empty() {
        return Ok(());
    }

    writeln!(f, "<div style=\"margin-left: 20px; margin-top: 10px;\">")?;
    for (idx, sub) in sub_questions.iter().enumerate() {
        writeln!(f, "<div style=\"margin-bottom: 15px;\">")?;
        writeln!(
            f,
            "<div style=\"margin-bottom: 5px;\">{} {}<span style=\"margin-left: 10px; font-size: 14px; color: #666;\">{}</span></div>",
            sub_question_label(idx),
            escape_html(&sub.text),
            marks_annotation(sub.marks)
        )?;
        if let Some(image) = &sub.image {
            write_image(f, image, "Sub-question image")?;
        }
        write_answer_line(f)?;
        writeln!(f, "</div>")?;
    }
    writeln!(f, "</div>")
}

fn write_image(f: &mut fmt::Formatter<'_>, image: &ImageRef, alt: &str) -> fmt::Result {
    let (max_width, max_height) = match image.size {
        ImageSize::Small => (200, 150),
        ImageSize::Medium => (400, 300),
        ImageSize::Large => (600, 450),
    };
    let align = match image.position {
        ImagePosition::Left => "left",
        ImagePosition::Center => "center",
        ImagePosition::Right => "right",
    };
    writeln!(
        f,
        "<div style=\"margin: 10px 0; text-align: {};\"><img src=\"{}\" alt=\"{}\" style=\"max-width: {}px; max-height: {}px; border: 1px solid #ddd; border-radius: 4px;\" /></div>",
        align,
        escape_html(&image.url),
        alt,
        max_width,
        max_height
    )
}

fn write_answer_line(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "<div style=\"margin-top: 15px;\">")?;
    writeln!(
        f,
        "<div style=\"font-size: 14px; color: #6b7280; font-style: italic;\">Answer:</div>"
    )?;
    writeln!(
        f,
        "<div style=\"border-bottom: 1px solid #d1d5db; height: 60px; margin-top: 5px;\"></div>"
    )?;
    writeln!(f, "</div>")
}
