//! 订单处理流程 - 流程层
//!
//! 核心职责：定义"一个订单"从上游数据到 XML 文本的完整处理流程
//!
//! 流程顺序：
//! 1. 提取留言中的日期（没有标记段则使用空日期）
//! 2. 拉取全部商品明细（分页直到取完）
//! 3. 获取收货地址
//! 4. 转换 → 校验 → 序列化
//!
//! 这里的每一步失败都只影响当前订单。写文件、记水位由编排层负责。

use crate::clients::OrderSource;
use crate::error::{ApiError, OrderResult};
use crate::models::{JobType, OrderProduct, SourceOrder};
use crate::services::message_parser::{extract_dates, HireDates};
use crate::services::transformer::{to_hire_job, TransformInput};
use crate::services::{validator, xml_writer, Reporter};
use crate::workflow::order_ctx::OrderCtx;
use futures::{stream, TryStreamExt};
use std::path::PathBuf;
use tracing::debug;

/// 商品明细分页大小
pub const PRODUCT_PAGE_SIZE: u32 = 50;

/// 单个订单的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// 已写出文件并记录水位
    Written { order_id: i64, path: PathBuf },
    /// 跳过，下次运行会重新考虑
    Skipped { order_id: i64, reason: String },
}

/// 订单处理流程
///
/// - 不持有任何资源，只借用订单来源和上报接口
/// - 不写文件、不碰数据库
pub struct OrderFlow<'a> {
    source: &'a dyn OrderSource,
    reporter: &'a dyn Reporter,
    job_type: JobType,
}

impl<'a> OrderFlow<'a> {
    /// 创建新的订单处理流程
    pub fn new(source: &'a dyn OrderSource, reporter: &'a dyn Reporter, job_type: JobType) -> Self {
        Self {
            source,
            reporter,
            job_type,
        }
    }

    /// 生成订单的 XML 文本
    pub async fn build_xml(&self, order: &SourceOrder, ctx: &OrderCtx) -> OrderResult<String> {
        let dates = match extract_dates(&order.customer_message)? {
            Some(dates) => dates,
            None => {
                self.reporter.dates_missing(ctx, &order.customer_message);
                HireDates::default()
            }
        };

        let products = self.fetch_all_products(order.id).await?;
        debug!("{} 商品明细 {} 条", ctx, products.len());

        let shipping_address = self
            .source
            .shipping_addresses(order.id)
            .await?
            .into_iter()
            .next()
            .ok_or(ApiError::NoShippingAddress { order_id: order.id })?;

        let document = to_hire_job(TransformInput {
            order,
            dates: &dates,
            shipping_address: &shipping_address,
            products: &products,
            job_type: self.job_type,
        })?;

        validator::validate(&document)?;

        Ok(xml_writer::to_xml(&document)?)
    }

    /// 拉取订单的全部商品明细
    ///
    /// 某页不足一页大小时视为最后一页。
    async fn fetch_all_products(&self, order_id: i64) -> Result<Vec<OrderProduct>, ApiError> {
        let source = self.source;

        let pages = stream::try_unfold(Some(1u32), move |page| async move {
            let Some(page) = page else {
                return Ok::<_, ApiError>(None);
            };

            let batch = source
                .order_products(order_id, page, PRODUCT_PAGE_SIZE)
                .await?;
            let next = (batch.len() >= PRODUCT_PAGE_SIZE as usize).then_some(page + 1);

            Ok(Some((batch, next)))
        });

        let batches: Vec<Vec<OrderProduct>> = pages.try_collect().await?;
        Ok(batches.into_iter().flatten().collect())
    }
}
