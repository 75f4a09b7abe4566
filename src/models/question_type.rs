use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 题型枚举
///
/// 序列化时使用界面上的显示名称（例如 `"Objective (MCQ)"`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum QuestionType {
    /// 选择题
    Mcq,
    /// 简答题
    ShortAnswer,
    /// 论述题
    LongAnswer,
    /// 填空题
    FillInTheBlanks,
    /// 判断题
    TrueFalse,
    /// 连线题
    MatchTheFollowing,
    /// 阅读材料题
    ParagraphBased,
}

/// 显示名称 → 题型
static TYPES_BY_NAME: phf::Map<&'static str, QuestionType> = phf_map! {
    "Objective (MCQ)" => QuestionType::Mcq,
    "Short Answer" => QuestionType::ShortAnswer,
    "Long Answer" => QuestionType::LongAnswer,
    "Fill in the Blanks" => QuestionType::FillInTheBlanks,
    "True/False" => QuestionType::TrueFalse,
    "Match the Following" => QuestionType::MatchTheFollowing,
    "Paragraph-based Questions" => QuestionType::ParagraphBased,
};

impl QuestionType {
    /// 全部题型，按固定顺序
    pub const ALL: [QuestionType; 7] = [
        QuestionType::Mcq,
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
        QuestionType::FillInTheBlanks,
        QuestionType::TrueFalse,
        QuestionType::MatchTheFollowing,
        QuestionType::ParagraphBased,
    ];

    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::Mcq => "Objective (MCQ)",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::LongAnswer => "Long Answer",
            QuestionType::FillInTheBlanks => "Fill in the Blanks",
            QuestionType::TrueFalse => "True/False",
            QuestionType::MatchTheFollowing => "Match the Following",
            QuestionType::ParagraphBased => "Paragraph-based Questions",
        }
    }

    /// 获取分区标题，分区字母固定，与实际出现哪些分区无关
    pub fn section_label(self) -> &'static str {
        match self {
            QuestionType::Mcq => "Section A: Objective Questions (Multiple Choice)",
            QuestionType::ShortAnswer => "Section B: Short Answer Questions",
            QuestionType::LongAnswer => "Section C: Long Answer Questions",
            QuestionType::FillInTheBlanks => "Section D: Fill in the Blanks",
            QuestionType::TrueFalse => "Section E: True/False Questions",
            QuestionType::MatchTheFollowing => "Section F: Match the Following",
            QuestionType::ParagraphBased => "Section G: Paragraph-based Questions",
        }
    }

    /// 从显示名称解析题型，忽略首尾空白
    pub fn from_name(s: &str) -> Option<Self> {
        TYPES_BY_NAME.get(s.trim()).copied()
    }
}

impl TryFrom<String> for QuestionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("未知题型: {}", value))
    }
}

impl From<QuestionType> for &'static str {
    fn from(value: QuestionType) -> Self {
        value.name()
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_letters_are_fixed() {
        assert_eq!(
            QuestionType::Mcq.section_label(),
            "Section A: Objective Questions (Multiple Choice)"
        );
        assert_eq!(
            QuestionType::ShortAnswer.section_label(),
            "Section B: Short Answer Questions"
        );
        assert_eq!(
            QuestionType::ParagraphBased.section_label(),
            "Section G: Paragraph-based Questions"
        );
    }

    #[test]
    fn test_every_type_has_a_section_label() {
        for t in QuestionType::ALL {
            assert!(t.section_label().starts_with("Section "), "{t}");
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(QuestionType::from_name("True/False"), Some(QuestionType::TrueFalse));
        assert_eq!(
            QuestionType::from_name(" Match the Following "),
            Some(QuestionType::MatchTheFollowing)
        );
        assert_eq!(QuestionType::from_name("Essay"), None);
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&QuestionType::FillInTheBlanks).unwrap();
        assert_eq!(json, "\"Fill in the Blanks\"");

        let parsed: QuestionType = serde_json::from_str("\"Paragraph-based Questions\"").unwrap();
        assert_eq!(parsed, QuestionType::ParagraphBased);

        let err = serde_json::from_str::<QuestionType>("\"Essay\"").unwrap_err();
        assert!(err.to_string().contains("Essay"));
    }

    #[test]
    fn test_name_lookup_round_trips() {
        for t in QuestionType::ALL {
            assert_eq!(QuestionType::from_name(t.name()), Some(t));
        }
    }
}
