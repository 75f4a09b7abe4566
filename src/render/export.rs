use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{ExamSetup, Question};
use crate::render::html::render_document;

/// 字节顺序标记，供旧版文字处理软件识别编码
const BYTE_ORDER_MARK: &str = "\u{feff}";

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// 独立 HTML 文档，可在浏览器中打印为 PDF
    Html,
    /// 相同内容加字节顺序标记，按旧版 Word 文档声明
    Doc,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Html, ExportFormat::Doc];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Doc => "doc",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html",
            ExportFormat::Doc => "application/msword",
        }
    }
}

/// 导出结果：文件名 + 内容类型 + 字节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// 写入到指定目录，返回完整路径
    pub fn write_to(&self, dir: &Path) -> AppResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        info!("📄 已导出: {}", path.display());
        Ok(path)
    }
}

/// 文件名中不允许出现的字符
static INVALID_FILE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("文件名字符过滤正则应当有效")
});

fn sanitize_file_part(part: &str) -> String {
    INVALID_FILE_CHARS.replace_all(part.trim(), "").into_owned()
}

/// 导出文件名：`<Subject>_<ClassName>_Exam.<ext>`，去掉文件名中的非法字符
pub fn export_file_name(setup: &ExamSetup, format: ExportFormat) -> String {
    export_file_name_with_suffix(setup, "Exam", format.extension())
}

pub(crate) fn export_file_name_with_suffix(setup: &ExamSetup, suffix: &str, extension: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize_file_part(&setup.subject),
        sanitize_file_part(&setup.class_name),
        suffix,
        extension
    )
}

/// 生成单一格式的导出文件
pub fn export_document(setup: &ExamSetup, questions: &[Question], format: ExportFormat) -> ExportedDocument {
    wrap(render_document(setup, questions), setup, format)
}

/// 生成两种格式的导出文件，只渲染一次
pub fn export_all(setup: &ExamSetup, questions: &[Question]) -> Vec<ExportedDocument> {
    let content = render_document(setup, questions);
    ExportFormat::ALL
        .into_iter()
        .map(|format| wrap(content.clone(), setup, format))
        .collect()
}

fn wrap(content: String, setup: &ExamSetup, format: ExportFormat) -> ExportedDocument {
    let bytes = match format {
        ExportFormat::Html => content.into_bytes(),
        ExportFormat::Doc => {
            let mut prefixed = String::with_capacity(BYTE_ORDER_MARK.len() + content.len());
            prefixed.push_str(BYTE_ORDER_MARK);
            prefixed.push_str(&content);
            prefixed.into_bytes()
        }
    };
    ExportedDocument {
        file_name: export_file_name(setup, format),
        mime_type: format.mime_type(),
        bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionType, QuestionTypeAllocation};

    fn setup() -> ExamSetup {
        ExamSetup {
            school_name: "Greenfield Public School".to_string(),
            subject: "Mathematics".to_string(),
            class_name: "10th Grade".to_string(),
            total_marks: 10,
            question_types: vec![QuestionTypeAllocation::new(QuestionType::ShortAnswer, 10.0, 1)],
        }
    }

    fn questions() -> Vec<Question> {
        let mut q = Question::new(QuestionType::ShortAnswer, 10.0);
        q.set_text("Prove it.");
        vec![q]
    }

    #[test]
    fn test_file_names() {
        let s = setup();
        assert_eq!(export_file_name(&s, ExportFormat::Html), "Mathematics_10th Grade_Exam.html");
        assert_eq!(export_file_name(&s, ExportFormat::Doc), "Mathematics_10th Grade_Exam.doc");
    }

    #[test]
    fn test_file_name_strips_path_separators() {
        let mut s = setup();
        s.subject = "Maths/Stats".to_string();
        s.class_name = "10:A".to_string();
        assert_eq!(export_file_name(&s, ExportFormat::Html), "MathsStats_10A_Exam.html");

        s.subject = " <Science>? ".to_string();
        s.class_name = "8\\B|\"C\"".to_string();
        assert_eq!(export_file_name(&s, ExportFormat::Doc), "Science_8BC_Exam.doc");
    }

    #[test]
    fn test_doc_is_html_with_byte_order_mark() {
        let s = setup();
        let qs = questions();
        let html = export_document(&s, &qs, ExportFormat::Html);
        let doc = export_document(&s, &qs, ExportFormat::Doc);

        assert_eq!(html.mime_type, "text/html");
        assert_eq!(doc.mime_type, "application/msword");
        assert_eq!(&doc.bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&doc.bytes[3..], &html.bytes[..]);
        assert_eq!(html.bytes, render_document(&s, &qs).into_bytes());
    }

    #[test]
    fn test_export_all_produces_both_formats() {
        let docs = export_all(&setup(), &questions());
        let names: Vec<_> = docs.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Mathematics_10th Grade_Exam.html", "Mathematics_10th Grade_Exam.doc"]
        );
    }
}
