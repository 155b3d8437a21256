//! 结果上报服务 - 业务能力层
//!
//! 单个订单、整次运行的结果通过 [`Reporter`] 显式传入编排层，
//! 不依赖全局状态，测试时可替换为记录型实现。

use crate::error::{AppError, OrderError};
use crate::models::JobType;
use crate::utils::logging::truncate_text;
use crate::workflow::OrderCtx;
use std::path::Path;
use tracing::{error, info, warn};

/// 结果上报接口
pub trait Reporter: Send + Sync {
    /// 订单已写出文件
    fn order_written(&self, ctx: &OrderCtx, path: &Path);

    /// 订单被跳过（水位不前进）
    fn order_skipped(&self, ctx: &OrderCtx, error: &OrderError);

    /// 留言中没有日期标记段，使用空日期继续
    fn dates_missing(&self, ctx: &OrderCtx, message: &str) {
        let _ = (ctx, message);
    }

    /// 整次运行中止
    fn run_failed(&self, job_type: JobType, error: &AppError);
}

/// 基于 tracing 的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn order_written(&self, ctx: &OrderCtx, path: &Path) {
        info!("{} ✓ 已生成 {}", ctx, path.display());
    }

    fn order_skipped(&self, ctx: &OrderCtx, error: &OrderError) {
        error!("{} ❌ 跳过: {}", ctx, error);
    }

    fn dates_missing(&self, ctx: &OrderCtx, message: &str) {
        warn!(
            "{} ⚠️ 留言中没有日期标记，使用空日期: {}",
            ctx,
            truncate_text(message, 80)
        );
    }

    fn run_failed(&self, job_type: JobType, error: &AppError) {
        error!("[店铺 {}] ❌ 运行中止: {}", job_type, error);
    }
}
