/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use crate::models::{JobType, OrderQuery};
use crate::orchestrator::RunSummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认 `info` 级别，可通过 `RUST_LOG` 覆盖。重复调用不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 订单导出");
    info!("📁 输出目录: {}", config.file_path.display());
    info!("🗄️ 水位数据库: {}", config.database_path.display());
    info!(
        "🏪 店铺: {}",
        config
            .storefronts
            .iter()
            .map(|s| s.job_type.website())
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("{}", "=".repeat(60));
}

/// 记录单个店铺运行开始
pub fn log_run_start(job_type: JobType, query: &OrderQuery) {
    info!("\n{}", "─".repeat(60));
    info!(
        "[店铺 {}] 📦 开始运行: 起始订单 {}, 状态 {}, 每页 {}",
        job_type, query.min_id, query.status_id, query.limit
    );
}

/// 记录单个店铺运行完成
pub fn log_run_complete(job_type: JobType, summary: &RunSummary) {
    info!(
        "[店铺 {}] ✓ 运行完成: 生成 {}, 跳过 {}",
        job_type,
        summary.written().len(),
        summary.skipped().len()
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(summaries: &[RunSummary]) {
    let written: usize = summaries.iter().map(|s| s.written().len()).sum();
    let skipped: usize = summaries.iter().map(|s| s.skipped().len()).sum();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 生成: {}", written);
    info!("⏭️ 跳过: {}", skipped);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
