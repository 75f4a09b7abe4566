use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuestionError;
use crate::models::QuestionType;

/// 题目、小题和连线配对的唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 选择题选项标签 A–D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    /// 选项下标（0 起）
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// 从字母解析，忽略大小写
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" | "a" => Some(OptionLabel::A),
            "B" | "b" => Some(OptionLabel::B),
            "C" | "c" => Some(OptionLabel::C),
            "D" | "d" => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 图片尺寸档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// 图片对齐位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Left,
    Center,
    Right,
}

/// 题目或小题附带的图片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub position: ImagePosition,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size: ImageSize::default(),
            position: ImagePosition::default(),
        }
    }
}

/// 更新图片地址；空地址移除图片，已有图片保留尺寸和位置
fn apply_image_url(slot: &mut Option<ImageRef>, url: &str) {
    let url = url.trim();
    if url.is_empty() {
        *slot = None;
    } else if let Some(image) = slot {
        image.url = url.to_string();
    } else {
        *slot = Some(ImageRef::new(url));
    }
}

/// 阅读材料题的小题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQuestion {
    pub id: QuestionId,
    pub text: String,
    pub marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl SubQuestion {
    /// 新建空白小题，分数为 0，需手动设置
    pub fn new() -> Self {
        Self {
            id: QuestionId::new(),
            text: String::new(),
            marks: 0.0,
            image: None,
        }
    }

    pub fn set_image_url(&mut self, url: &str) {
        apply_image_url(&mut self.image, url);
    }
}

impl Default for SubQuestion {
    fn default() -> Self {
        Self::new()
    }
}

/// 连线题的一组配对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub id: QuestionId,
    pub left: String,
    pub right: String,
}

impl MatchPair {
    pub fn new() -> Self {
        Self {
            id: QuestionId::new(),
            left: String::new(),
            right: String::new(),
        }
    }
}

impl Default for MatchPair {
    fn default() -> Self {
        Self::new()
    }
}

/// 按题型区分的题目内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionBody {
    /// 选择题：固定 4 个选项 + 正确答案
    Mcq {
        options: [String; 4],
        correct_answer: Option<OptionLabel>,
    },
    /// 阅读材料题：材料 + 小题列表
    Paragraph {
        paragraph: String,
        sub_questions: Vec<SubQuestion>,
    },
    /// 连线题：配对列表（导出文档中不显示）
    MatchTheFollowing { pairs: Vec<MatchPair> },
    /// 其他题型：没有额外内容
    Plain,
}

impl QuestionBody {
    /// 题型对应的空白内容
    pub fn empty_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Mcq => QuestionBody::Mcq {
                options: Default::default(),
                correct_answer: None,
            },
            QuestionType::ParagraphBased => QuestionBody::Paragraph {
                paragraph: String::new(),
                sub_questions: Vec::new(),
            },
            QuestionType::MatchTheFollowing => QuestionBody::MatchTheFollowing { pairs: Vec::new() },
            _ => QuestionBody::Plain,
        }
    }
}

/// 小题分数合计与大题分数的对照，仅作提示，不阻止生成预览
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarksCheck {
    pub sub_total: f64,
    pub question_marks: f64,
}

impl MarksCheck {
    pub fn is_balanced(&self) -> bool {
        self.sub_total == self.question_marks
    }
}

/// 单道题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "type")]
    question_type: QuestionType,
    pub text: String,
    pub marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    body: QuestionBody,
}

impl Question {
    /// 新建空白题目，内容按题型初始化
    pub fn new(question_type: QuestionType, marks: f64) -> Self {
        Self {
            id: QuestionId::new(),
            question_type,
            text: String::new(),
            marks,
            image: None,
            body: QuestionBody::empty_for(question_type),
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_marks(&mut self, marks: f64) {
        self.marks = marks;
    }

    pub fn set_image_url(&mut self, url: &str) {
        apply_image_url(&mut self.image, url);
    }

    /// 设置图片尺寸；没有图片时忽略
    pub fn set_image_size(&mut self, size: ImageSize) {
        if let Some(image) = &mut self.image {
            image.size = size;
        }
    }

    /// 设置图片位置；没有图片时忽略
    pub fn set_image_position(&mut self, position: ImagePosition) {
        if let Some(image) = &mut self.image {
            image.position = position;
        }
    }

    fn wrong_kind(&self, operation: &'static str) -> QuestionError {
        QuestionError::WrongQuestionKind {
            id: self.id,
            actual: self.question_type,
            operation,
        }
    }

    // ========== 选择题 ==========

    pub fn set_option(&mut self, label: OptionLabel, text: impl Into<String>) -> Result<(), QuestionError> {
        match &mut self.body {
            QuestionBody::Mcq { options, .. } => {
                options[label.index()] = text.into();
                Ok(())
            }
            _ => Err(self.wrong_kind("编辑选项")),
        }
    }

    pub fn set_correct_answer(&mut self, answer: Option<OptionLabel>) -> Result<(), QuestionError> {
        match &mut self.body {
            QuestionBody::Mcq { correct_answer, .. } => {
                *correct_answer = answer;
                Ok(())
            }
            _ => Err(self.wrong_kind("设置正确答案")),
        }
    }

    // ========== 阅读材料题 ==========

    pub fn set_paragraph(&mut self, text: impl Into<String>) -> Result<(), QuestionError> {
        match &mut self.body {
            QuestionBody::Paragraph { paragraph, .. } => {
                *paragraph = text.into();
                Ok(())
            }
            _ => Err(self.wrong_kind("编辑阅读材料")),
        }
    }

    /// 追加一道空白小题，返回其 id
    pub fn add_sub_question(&mut self) -> Result<QuestionId, QuestionError> {
        match &mut self.body {
            QuestionBody::Paragraph { sub_questions, .. } => {
                let sub = SubQuestion::new();
                let id = sub.id;
                sub_questions.push(sub);
                Ok(id)
            }
            _ => Err(self.wrong_kind("添加小题")),
        }
    }

    pub fn remove_sub_question(&mut self, sub_id: QuestionId) -> Result<SubQuestion, QuestionError> {
        let id = self.id;
        match &mut self.body {
            QuestionBody::Paragraph { sub_questions, .. } => {
                let pos = sub_questions
                    .iter()
                    .position(|s| s.id == sub_id)
                    .ok_or(QuestionError::UnknownSubQuestion {
                        question: id,
                        sub_question: sub_id,
                    })?;
                Ok(sub_questions.remove(pos))
            }
            _ => Err(self.wrong_kind("删除小题")),
        }
    }

    pub fn sub_question_mut(&mut self, sub_id: QuestionId) -> Result<&mut SubQuestion, QuestionError> {
        let id = self.id;
        let actual = self.question_type;
        match &mut self.body {
            QuestionBody::Paragraph { sub_questions, .. } => sub_questions
                .iter_mut()
                .find(|s| s.id == sub_id)
                .ok_or(QuestionError::UnknownSubQuestion {
                    question: id,
                    sub_question: sub_id,
                }),
            _ => Err(QuestionError::WrongQuestionKind {
                id,
                actual,
                operation: "编辑小题",
            }),
        }
    }

    /// 小题分数合计与本题分数的对照；非阅读材料题返回 None
    pub fn marks_check(&self) -> Option<MarksCheck> {
        match &self.body {
            QuestionBody::Paragraph { sub_questions, .. } => Some(MarksCheck {
                sub_total: sub_questions.iter().map(|s| s.marks).sum(),
                question_marks: self.marks,
            }),
            _ => None,
        }
    }

    // ========== 连线题 ==========

    /// 追加一组空白配对，返回其 id
    pub fn add_match_pair(&mut self) -> Result<QuestionId, QuestionError> {
        match &mut self.body {
            QuestionBody::MatchTheFollowing { pairs } => {
                let pair = MatchPair::new();
                let id = pair.id;
                pairs.push(pair);
                Ok(id)
            }
            _ => Err(self.wrong_kind("添加配对")),
        }
    }

    pub fn remove_match_pair(&mut self, pair_id: QuestionId) -> Result<MatchPair, QuestionError> {
        let id = self.id;
        match &mut self.body {
            QuestionBody::MatchTheFollowing { pairs } => {
                let pos = pairs
                    .iter()
                    .position(|p| p.id == pair_id)
                    .ok_or(QuestionError::UnknownMatchPair {
                        question: id,
                        pair: pair_id,
                    })?;
                Ok(pairs.remove(pos))
            }
            _ => Err(self.wrong_kind("删除配对")),
        }
    }

    pub fn set_match_pair(
        &mut self,
        pair_id: QuestionId,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<(), QuestionError> {
        let id = self.id;
        match &mut self.body {
            QuestionBody::MatchTheFollowing { pairs } => {
                let pair = pairs
                    .iter_mut()
                    .find(|p| p.id == pair_id)
                    .ok_or(QuestionError::UnknownMatchPair {
                        question: id,
                        pair: pair_id,
                    })?;
                pair.left = left.into();
                pair.right = right.into();
                Ok(())
            }
            _ => Err(self.wrong_kind("编辑配对")),
        }
    }
}
