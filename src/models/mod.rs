pub mod draft;
pub mod exam;
pub mod loaders;
pub mod question;
pub mod question_type;

pub use draft::{DraftAllocation, DraftMatchPair, DraftQuestion, DraftSubQuestion, ExamDraft};
pub use exam::{ExamSetup, QuestionTypeAllocation};
pub use loaders::{load_all_drafts, load_draft, parse_draft};
pub use question::{
    ImagePosition, ImageRef, ImageSize, MarksCheck, MatchPair, OptionLabel, Question, QuestionBody,
    QuestionId, SubQuestion,
};
pub use question_type::QuestionType;
