//! 订单处理上下文
//!
//! 封装"我正在处理哪个店铺的哪个订单"这一信息

use crate::models::JobType;
use std::fmt::Display;

/// 订单处理上下文
#[derive(Debug, Clone)]
pub struct OrderCtx {
    /// 店铺
    pub job_type: JobType,

    /// 订单 id
    pub order_id: i64,

    /// 订单在本页中的序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 本页订单总数
    pub total: usize,
}

impl OrderCtx {
    /// 创建新的订单上下文
    pub fn new(job_type: JobType, order_id: i64, index: usize, total: usize) -> Self {
        Self {
            job_type,
            order_id,
            index,
            total,
        }
    }
}

impl Display for OrderCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[店铺 {} 订单#{} {}/{}]",
            self.job_type, self.order_id, self.index, self.total
        )
    }
}
