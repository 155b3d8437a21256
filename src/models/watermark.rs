use chrono::{DateTime, Utc};

/// 水位记录：某店铺的某个订单已生成 XML 文件
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct WatermarkRecord {
    pub order_id: i64,
    pub xml_file_created: DateTime<Utc>,
    pub website: String,
}
