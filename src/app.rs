use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_all_drafts, ExamDraft};
use crate::render::export::export_file_name_with_suffix;
use crate::utils::logging;
use crate::workflow::{apply_draft, ExamSession};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(&config.draft_folder, &config.output_dir);

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<()> {
        info!("\n📁 正在扫描待处理的试卷草稿...");
        let drafts = load_all_drafts(&self.config.draft_folder)?;

        if drafts.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(());
        }

        let mut stats = ProcessingStats {
            total: drafts.len(),
            ..Default::default()
        };
        logging::log_drafts_loaded(stats.total);

        for (idx, draft) in drafts.iter().enumerate() {
            logging::log_paper_start(idx + 1, stats.total, &draft.display_name());
            match self.process_draft(draft) {
                Ok(()) => stats.success += 1,
                Err(e) => {
                    if is_validation_failure(&e) {
                        warn!("[试卷 {}] ⚠️ 草稿内容未通过校验: {:#}", idx + 1, e);
                    } else {
                        error!("[试卷 {}] ❌ 处理失败: {:#}", idx + 1, e);
                    }
                    stats.failed += 1;
                }
            }
        }

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );
        Ok(())
    }

    /// 处理单份草稿：建立会话、校验、导出
    fn process_draft(&self, draft: &ExamDraft) -> Result<()> {
        let session = apply_draft(draft)
            .with_context(|| format!("草稿校验未通过: {}", draft.display_name()))?;
        let output_dir = Path::new(&self.config.output_dir);

        for document in session.export_all()? {
            document.write_to(output_dir)?;
        }

        if self.config.write_preview || self.config.verbose_logging {
            let preview = session.preview_text()?;
            if self.config.verbose_logging {
                self.log_verbose(&session, &preview);
            }
            if self.config.write_preview {
                self.write_preview(&session, &preview)?;
            }
        }

        Ok(())
    }

    fn write_preview(&self, session: &ExamSession, preview: &str) -> Result<()> {
        let Some(setup) = session.exam_setup() else {
            return Ok(());
        };
        let path = Path::new(&self.config.output_dir)
            .join(export_file_name_with_suffix(setup, "Preview", "txt"));
        std::fs::write(&path, preview)
            .with_context(|| format!("写入预览失败: {}", path.display()))?;
        info!("📝 已写出预览: {}", path.display());
        Ok(())
    }

    fn log_verbose(&self, session: &ExamSession, preview: &str) {
        if let Some(setup) = session.exam_setup() {
            match serde_json::to_string_pretty(setup) {
                Ok(json) => info!("试卷设置:\n{}", json),
                Err(e) => warn!("试卷设置序列化失败: {}", e),
            }
        }
        info!("预览:\n{}", logging::truncate_text(preview, 2000));
    }
}

/// 失败原因是否为草稿内容校验未通过（而非文件读写失败）
fn is_validation_failure(e: &anyhow::Error) -> bool {
    e.downcast_ref::<AppError>()
        .is_some_and(|app_error| app_error.is_validation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
school_name = "Greenfield Public School"
subject = "Science"
class_name = "8A"
total_marks = 10

[[question_types]]
type = "Short Answer"
marks = 10
count = 1

[[questions]]
type = "Short Answer"
text = "What is photosynthesis?"
"#;

    fn config_for(root: &Path) -> Config {
        Config {
            draft_folder: root.join("drafts").to_string_lossy().to_string(),
            output_dir: root.join("output").to_string_lossy().to_string(),
            verbose_logging: true,
            output_log_file: root.join("output.txt").to_string_lossy().to_string(),
            write_preview: true,
        }
    }

    #[test]
    fn test_run_exports_valid_drafts_and_skips_invalid() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_for(temp.path());
        fs::create_dir_all(&config.draft_folder).unwrap();
        fs::write(Path::new(&config.draft_folder).join("a.toml"), VALID).unwrap();
        fs::write(
            Path::new(&config.draft_folder).join("b.toml"),
            VALID.replace("total_marks = 10", "total_marks = 12"),
        )
        .unwrap();

        App::initialize(config.clone()).unwrap().run().unwrap();

        let output = Path::new(&config.output_dir);
        assert!(output.join("Science_8A_Exam.html").exists());
        assert!(output.join("Science_8A_Exam.doc").exists());
        let preview = fs::read_to_string(output.join("Science_8A_Preview.txt")).unwrap();
        assert!(preview.contains("1. What is photosynthesis? [10.0 marks]"));
        assert!(fs::read_to_string(&config.output_log_file)
            .unwrap()
            .contains("试卷生成日志"));
    }

    #[test]
    fn test_validation_failures_are_classified() {
        let mut draft = crate::models::parse_draft(VALID).unwrap();
        draft.total_marks = 12;
        let err = apply_draft(&draft).unwrap_err();
        assert!(is_validation_failure(&anyhow::Error::new(err).context("草稿校验未通过")));

        let io = AppError::file_write_failed(
            "output",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!is_validation_failure(&anyhow::Error::new(io)));
    }
}
