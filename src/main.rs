use anyhow::{Context, Result};
use hire_job_export::utils::logging;
use hire_job_export::{App, Config, TracingReporter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化并运行应用
    let app = App::initialize(config, Box::new(TracingReporter))
        .await
        .context("初始化失败")?;
    let result = app.run().await;
    app.shutdown().await;

    result.context("订单导出失败")?;
    Ok(())
}
