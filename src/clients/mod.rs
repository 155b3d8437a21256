pub mod bigcommerce_client;

pub use bigcommerce_client::BigCommerceClient;

use crate::error::ApiError;
use crate::models::{OrderProduct, OrderQuery, OrderStatus, ShippingAddress, SourceOrder};
use async_trait::async_trait;

/// 上游订单来源
///
/// 编排层只依赖这个接口；生产环境为 [`BigCommerceClient`]。
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// 订单状态列表
    async fn order_statuses(&self) -> Result<Vec<OrderStatus>, ApiError>;

    /// 按条件获取一页订单
    async fn orders(&self, query: &OrderQuery) -> Result<Vec<SourceOrder>, ApiError>;

    /// 获取订单商品明细的某一页（页码从 1 开始）
    async fn order_products(
        &self,
        order_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<Vec<OrderProduct>, ApiError>;

    /// 订单的收货地址
    async fn shipping_addresses(&self, order_id: i64) -> Result<Vec<ShippingAddress>, ApiError>;
}
