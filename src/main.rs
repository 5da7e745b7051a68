use anyhow::Result;
use codequest_audit::utils::logging;
use codequest_audit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行审核台
    let mut app = App::initialize(&config).await?;
    app.run().await?;

    Ok(())
}
