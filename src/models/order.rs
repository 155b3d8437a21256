//! 上游店铺（BigCommerce v2）返回的订单数据结构
//!
//! 只反序列化流水线用到的字段，其余字段忽略。

use serde::{Deserialize, Deserializer};

/// 订单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceOrder {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub customer_message: String,
    /// 不含税运费，上游以字符串形式返回（如 "0.0000"）
    #[serde(default, deserialize_with = "null_as_empty")]
    pub shipping_cost_ex_tax: String,
    #[serde(default)]
    pub billing_address: BillingAddress,
}

/// 账单联系人
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingAddress {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street_1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street_2: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub zip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
}

/// 收货地址
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street_1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub street_2: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub zip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub shipping_method: String,
}

/// 订单商品明细
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderProduct {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sku: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub base_price: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total_ex_tax: String,
}

/// 订单状态
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatus {
    pub id: i64,
    pub name: String,
}

/// 订单查询参数
///
/// 固定按 id 倒序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub min_id: i64,
    pub status_id: i64,
    pub limit: u32,
}

impl OrderQuery {
    /// 转换为 URL 查询参数
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("min_id", self.min_id.to_string()),
            ("status_id", self.status_id.to_string()),
            ("sort", "id:desc".to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

impl BillingAddress {
    /// "名 姓"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl ShippingAddress {
    /// "名 姓"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// 上游偶尔把空字符串字段返回为 null
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_order_fixture() {
        let json = r#"{
            "id": 4130,
            "status_id": 11,
            "customer_message": null,
            "shipping_cost_ex_tax": "15.0000",
            "billing_address": {
                "first_name": "Aoife",
                "last_name": "Byrne",
                "company": null,
                "street_1": "1 Main St",
                "street_2": "",
                "city": "Dublin",
                "state": "Dublin",
                "zip": "D01",
                "country": "Ireland",
                "phone": "0871234567",
                "email": "aoife@example.com"
            }
        }"#;

        let order: SourceOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 4130);
        assert_eq!(order.customer_message, "");
        assert_eq!(order.billing_address.company, "");
        assert_eq!(order.billing_address.display_name(), "Aoife Byrne");
    }

    #[test]
    fn test_deserialize_product_fixture() {
        let json = r#"[{
            "id": 77,
            "order_id": 4130,
            "name": "Wine Glass",
            "sku": "WG-01",
            "quantity": 48,
            "base_price": "0.5000",
            "total_ex_tax": "24.0000"
        }]"#;

        let products: Vec<OrderProduct> = serde_json::from_str(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 48);
        assert_eq!(products[0].base_price, "0.5000");
    }

    #[test]
    fn test_query_pairs_sort_descending() {
        let query = OrderQuery {
            min_id: 100,
            status_id: 11,
            limit: 10,
        };
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("sort", "id:desc".to_string())));
        assert!(pairs.contains(&("min_id", "100".to_string())));
    }
}
