use exam_paper::error::{AppError, QuestionError, SetupError};
use exam_paper::models::{parse_draft, OptionLabel, QuestionType};
use exam_paper::render::export_file_name;
use exam_paper::{apply_draft, ExamSession, ExportFormat, Stage};

const DRAFT: &str = r#"
school_name = "Greenfield Public School"
subject = "Mathematics"
class_name = "10th Grade"
total_marks = 20

[[question_types]]
type = "Objective (MCQ)"
marks = 2
count = 2

[[question_types]]
type = "Fill in the Blanks"
marks = 0
count = 1

[[question_types]]
type = "Long Answer"
marks = 18
count = 2

[[questions]]
type = "Objective (MCQ)"
text = "2 + 3 = ?"
options = ["4", "5", "6", "7"]
correct_answer = "B"

[[questions]]
type = "Objective (MCQ)"
text = "7 - 4 = ?"
options = ["1", "2", "3", "4"]
correct_answer = "C"

[[questions]]
type = "Fill in the Blanks"
text = "A triangle has ___ sides."

[[questions]]
type = "Long Answer"
text = "Prove the Pythagorean theorem."

[[questions]]
type = "Long Answer"
text = "Derive the quadratic formula."
"#;

#[test]
fn test_draft_to_export_pipeline() {
    let draft = parse_draft(DRAFT).expect("解析草稿失败");
    let session = apply_draft(&draft).expect("草稿应当通过校验");
    assert_eq!(session.stage(), Stage::Preview);

    let documents = session.export_all().unwrap();
    assert_eq!(documents.len(), 2);

    let html = &documents[0];
    let doc = &documents[1];
    assert_eq!(html.file_name, "Mathematics_10th Grade_Exam.html");
    assert_eq!(doc.file_name, "Mathematics_10th Grade_Exam.doc");
    assert_eq!(&doc.bytes[..3], &[0xEF, 0xBB, 0xBF]);
    assert_eq!(&doc.bytes[3..], &html.bytes[..]);

    let content = String::from_utf8(html.bytes.clone()).unwrap();
    assert!(content.contains("Section A: Objective Questions"));
    assert!(content.contains("Section D: Fill in the Blanks"));
    assert!(content.contains("Section C: Long Answer Questions"));
    // 题号跨分区连续
    for n in 1..=5 {
        assert!(content.contains(&format!(">{n}.</span>")));
    }
    // 每道选择题 1 分，单数；长答题 9 分，复数
    assert!(content.contains("[1.0 mark]"));
    assert!(content.contains("[9.0 marks]"));
    assert!(content.contains(">B) 5</div>"));
}

#[test]
fn test_zero_count_type_is_rejected() {
    let draft = parse_draft(
        r#"
school_name = "S"
subject = "Physics"
class_name = "11"
total_marks = 10

[[question_types]]
type = "True/False"
marks = 0
count = 0

[[question_types]]
type = "Short Answer"
marks = 10
count = 2

[[questions]]
type = "Short Answer"
text = "Define force."

[[questions]]
type = "Short Answer"
text = "Define work."
"#,
    )
    .unwrap();
    // count 为 0 的题型在提交设置时被拒绝
    let err = apply_draft(&draft).unwrap_err();
    assert!(matches!(err, AppError::Setup(SetupError::InvalidCount { .. })));
}

#[test]
fn test_manual_session_flow() {
    let mut session = ExamSession::new();
    {
        let form = session.setup_form_mut().unwrap();
        form.school_name = "Greenfield Public School".to_string();
        form.subject = "Science".to_string();
        form.class_name = "8A".to_string();
        form.total_marks = 10;
        form.select(QuestionType::Mcq);
        form.set_marks(QuestionType::Mcq, 4.0);
        form.set_count(QuestionType::Mcq, 1);
        assert_eq!(form.remaining_marks(), 6.0);
        form.select(QuestionType::TrueFalse);
        form.set_marks(QuestionType::TrueFalse, 6.0);
        form.set_count(QuestionType::TrueFalse, 3);
        assert_eq!(form.remaining_marks(), 0.0);
    }

    let bank = session.complete_setup().unwrap();
    assert_eq!(bank.total_questions(), 4);
    let mcq = bank.questions_of(QuestionType::Mcq).next().unwrap().id();
    let tf: Vec<_> = bank.questions_of(QuestionType::TrueFalse).map(|q| q.id()).collect();

    {
        let q = bank.question_mut(mcq).unwrap();
        q.set_text("Which gas do plants absorb?");
        for (label, text) in OptionLabel::ALL.into_iter().zip(["O2", "CO2", "N2", "H2"]) {
            q.set_option(label, text).unwrap();
        }
    }
    for id in &tf {
        bank.question_mut(*id).unwrap().set_text("The moon emits light.");
    }

    // 缺少正确答案
    let err = session.generate_preview().unwrap_err();
    assert!(matches!(
        err,
        AppError::Question(QuestionError::MissingCorrectAnswer { position: 1, .. })
    ));
    assert_eq!(session.stage(), Stage::Questions);

    session
        .bank_mut()
        .unwrap()
        .question_mut(mcq)
        .unwrap()
        .set_correct_answer(Some(OptionLabel::B))
        .unwrap();
    assert_eq!(session.generate_preview().unwrap().len(), 4);

    let preview = session.preview_text().unwrap();
    assert!(preview.contains("1. Which gas do plants absorb? [4.0 marks]"));
    assert!(preview.contains("4. The moon emits light. [2.0 marks]"));

    // 回到设置修改科目，题目保留
    session.back_to_setup();
    session.setup_form_mut().unwrap().subject = "Biology".to_string();
    session.complete_setup().unwrap();
    session.generate_preview().unwrap();
    let html = session.export(ExportFormat::Html).unwrap();
    assert_eq!(html.file_name, "Biology_8A_Exam.html");
    assert_eq!(
        html.file_name,
        export_file_name(session.exam_setup().unwrap(), ExportFormat::Html)
    );
}

#[test]
fn test_write_exports_to_directory() {
    let session = apply_draft(&parse_draft(DRAFT).unwrap()).unwrap();
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("output");

    for document in session.export_all().unwrap() {
        let path = document.write_to(&dir).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), document.bytes);
    }
    assert!(dir.join("Mathematics_10th Grade_Exam.doc").exists());
}
