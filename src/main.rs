use anyhow::Result;
use exam_paper::utils::logging;
use exam_paper::{App, Config};

fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config)?.run()
}
