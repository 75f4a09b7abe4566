pub mod draft_flow;
pub mod exam_session;

pub use draft_flow::apply_draft;
pub use exam_session::{ExamSession, Stage};
