/// 程序配置
///
/// 只有宿主程序读取环境变量，引擎本身不依赖配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 试卷草稿（TOML）存放目录
    pub draft_folder: String,
    /// 导出文件输出目录
    pub output_dir: String,
    /// 是否在日志中输出预览文本和设置详情
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
    /// 是否同时写出纯文本预览
    pub write_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            draft_folder: "exam_drafts".to_string(),
            output_dir: "output".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            write_preview: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            draft_folder: std::env::var("DRAFT_FOLDER").unwrap_or(default.draft_folder),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            write_preview: std::env::var("WRITE_PREVIEW").ok().and_then(|v| v.parse().ok()).unwrap_or(default.write_preview),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.draft_folder, "exam_drafts");
        assert_eq!(config.output_dir, "output");
        assert!(!config.verbose_logging);
        assert!(config.write_preview);
    }
}
