//! 单个店铺的一次生成运行 - 编排层
//!
//! ## 状态流转
//!
//! ```text
//! ResolveStatus → Page(orders) → {OrderFlow}* → Done
//! ```
//!
//! ## 错误分级
//!
//! - 致命：输出目录不可用、获取状态列表 / 订单页失败、写文件失败、写水位 / 跳过记录失败
//! - 可恢复：单个订单在写文件之前的任何失败，记录后跳过，水位不前进
//!
//! ## 起始订单 id
//!
//! 取 `水位 + 1` 与待重试的最小跳过订单 id 中较小者。
//! 起点因重试而回退时，已写出过的订单不再重复处理。

use crate::clients::OrderSource;
use crate::error::{AppResult, FileError};
use crate::models::{JobType, OrderQuery, OrderStatus};
use crate::services::{xml_writer, Reporter, WatermarkStore};
use crate::utils::logging;
use crate::workflow::{OrderCtx, OrderFlow, OrderOutcome};
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

/// 待履约状态名称
pub const AWAITING_FULFILLMENT: &str = "Awaiting Fulfillment";
/// 状态列表中找不到时使用的状态 id
pub const DEFAULT_AWAITING_FULFILLMENT_ID: i64 = 11;

/// 一次运行的参数
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub job_type: JobType,
    /// XML 输出目录，必须已存在
    pub destination: PathBuf,
    pub page_size: u32,
    /// 没有水位记录时的起始订单 id
    pub fallback_min_order_id: i64,
}

/// 一次运行的结果汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<OrderOutcome>,
}

impl RunSummary {
    /// 已写出的订单 id
    pub fn written(&self) -> Vec<i64> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                OrderOutcome::Written { order_id, .. } => Some(*order_id),
                OrderOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    /// 被跳过的订单 id
    pub fn skipped(&self) -> Vec<i64> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                OrderOutcome::Skipped { order_id, .. } => Some(*order_id),
                OrderOutcome::Written { .. } => None,
            })
            .collect()
    }
}

/// 生成编排器
pub struct GenerationOrchestrator<'a> {
    source: &'a dyn OrderSource,
    store: &'a WatermarkStore,
    reporter: &'a dyn Reporter,
}

impl<'a> GenerationOrchestrator<'a> {
    pub fn new(
        source: &'a dyn OrderSource,
        store: &'a WatermarkStore,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            source,
            store,
            reporter,
        }
    }

    /// 执行一次运行
    pub async fn run(&self, settings: &RunSettings) -> AppResult<RunSummary> {
        let job_type = settings.job_type;
        ensure_directory(&settings.destination).await?;

        let statuses = self.source.order_statuses().await?;
        let status_id = resolve_status_id(&statuses);

        let next_id = match self.store.last_processed(job_type).await? {
            Some(last) => last + 1,
            None => settings.fallback_min_order_id,
        };
        let min_id = match self.store.lowest_pending_skip(job_type).await? {
            Some(pending) if pending < next_id => {
                info!("[店铺 {}] 🔁 重试此前跳过的订单，从 #{} 开始", job_type, pending);
                pending
            }
            _ => next_id,
        };

        let query = OrderQuery {
            min_id,
            status_id,
            limit: settings.page_size,
        };
        logging::log_run_start(job_type, &query);

        let fetched = self.source.orders(&query).await?;
        let written = self.store.written_since(job_type, min_id).await?;
        let orders: Vec<_> = fetched
            .into_iter()
            .filter(|order| !written.contains(&order.id))
            .collect();
        info!("[店铺 {}] 本次获取 {} 个订单", job_type, orders.len());

        let flow = OrderFlow::new(self.source, self.reporter, job_type);
        let total = orders.len();
        let mut summary = RunSummary::default();

        for (index, order) in orders.iter().enumerate() {
            let ctx = OrderCtx::new(job_type, order.id, index + 1, total);

            let xml = match flow.build_xml(order, &ctx).await {
                Ok(xml) => xml,
                Err(e) => {
                    self.reporter.order_skipped(&ctx, &e);
                    let reason = e.to_string();
                    self.store
                        .record_skip(order.id, job_type, Utc::now(), &reason)
                        .await?;
                    summary.outcomes.push(OrderOutcome::Skipped {
                        order_id: order.id,
                        reason,
                    });
                    continue;
                }
            };

            // 文件落盘之后才记录水位
            let path = xml_writer::write_order_file(&settings.destination, order.id, &xml).await?;
            self.store.record(order.id, job_type, Utc::now()).await?;

            self.reporter.order_written(&ctx, &path);
            summary.outcomes.push(OrderOutcome::Written {
                order_id: order.id,
                path,
            });
        }

        logging::log_run_complete(job_type, &summary);
        Ok(summary)
    }
}

/// 从状态列表中找到待履约状态 id
pub fn resolve_status_id(statuses: &[OrderStatus]) -> i64 {
    statuses
        .iter()
        .find(|s| s.name == AWAITING_FULFILLMENT)
        .map(|s| s.id)
        .unwrap_or(DEFAULT_AWAITING_FULFILLMENT_ID)
}

async fn ensure_directory(path: &std::path::Path) -> Result<(), FileError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(FileError::DirectoryNotFound {
            path: path.display().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_status_id_by_name() {
        let statuses = vec![
            OrderStatus {
                id: 1,
                name: "Pending".to_string(),
            },
            OrderStatus {
                id: 42,
                name: "Awaiting Fulfillment".to_string(),
            },
        ];
        assert_eq!(resolve_status_id(&statuses), 42);
    }

    #[test]
    fn test_resolve_status_id_fallback() {
        assert_eq!(resolve_status_id(&[]), DEFAULT_AWAITING_FULFILLMENT_ID);
    }
}
