//! 租赁任务（Hire Job）文档
//!
//! 字段顺序和标签名即下游系统读取的 XML 结构，不可随意调整。

use crate::models::job_type::JobType;
use crate::models::order::{BillingAddress, ShippingAddress};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// 配送方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryType {
    /// 送货上门
    Delivery = 0,
    /// 客户自提
    Collection = 1,
}

impl DeliveryType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for DeliveryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// 地址
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street1: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl From<&BillingAddress> for Address {
    fn from(billing: &BillingAddress) -> Self {
        Self {
            street1: billing.street_1.clone(),
            street2: billing.street_2.clone(),
            city: billing.city.clone(),
            state: billing.state.clone(),
            zip: billing.zip.clone(),
        }
    }
}

impl From<&ShippingAddress> for Address {
    fn from(shipping: &ShippingAddress) -> Self {
        Self {
            street1: shipping.street_1.clone(),
            street2: shipping.street_2.clone(),
            city: shipping.city.clone(),
            state: shipping.state.clone(),
            zip: shipping.zip.clone(),
        }
    }
}

/// XML 根节点，固定只包含一个订单
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "Orders")]
pub struct Orders {
    #[serde(rename = "Order")]
    pub orders: Vec<HireJobDocument>,
}

impl Orders {
    pub fn single(document: HireJobDocument) -> Self {
        Self {
            orders: vec![document],
        }
    }
}

/// 租赁任务文档
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HireJobDocument {
    #[serde(rename = "JobType")]
    pub job_type: JobType,
    #[serde(rename = "webenquiryid")]
    pub web_enquiry_id: String,
    #[serde(rename = "FirstContactDate")]
    pub first_contact_date: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "BillingCompany")]
    pub billing_company: String,
    #[serde(rename = "BillingStreet1")]
    pub billing_street1: String,
    #[serde(rename = "BillingStreet2")]
    pub billing_street2: String,
    #[serde(rename = "BillingCity")]
    pub billing_city: String,
    #[serde(rename = "BillingState")]
    pub billing_state: String,
    #[serde(rename = "BillingZip")]
    pub billing_zip: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "TelNo")]
    pub tel_no: String,
    #[serde(rename = "DeliveryType")]
    pub delivery_type: DeliveryType,
    #[serde(rename = "Deliveryname")]
    pub delivery_name: String,
    #[serde(rename = "DeliveryCompany")]
    pub delivery_company: String,
    #[serde(rename = "DeliveryStreet1")]
    pub delivery_street1: String,
    #[serde(rename = "DeliveryStreet2")]
    pub delivery_street2: String,
    #[serde(rename = "DeliveryCity")]
    pub delivery_city: String,
    #[serde(rename = "DeliveryState")]
    pub delivery_state: String,
    #[serde(rename = "DeliveryZip")]
    pub delivery_zip: String,
    #[serde(rename = "Deliveryinstructions")]
    pub delivery_instructions: String,
    #[serde(rename = "DeliveryDate")]
    pub delivery_date: String,
    #[serde(rename = "CollectionDate")]
    pub collection_date: String,
    #[serde(rename = "ShippingTotal")]
    pub shipping_total: String,
    #[serde(rename = "OrderLineItems")]
    pub order_line_items: OrderLineItems,
    #[serde(rename = "OtherInfo")]
    pub other_info: String,
}

/// 商品明细列表
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderLineItems {
    #[serde(rename = "OrderLineItem")]
    pub items: Vec<OrderLineItem>,
}

/// 单条商品明细
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineItem {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Price", serialize_with = "serialize_decimal")]
    pub price: Decimal,
    #[serde(rename = "Subtotal", serialize_with = "serialize_decimal")]
    pub subtotal: Decimal,
}

// 去掉尾随的 0："12.5000" -> "12.5"，"100.0000" -> "100"
fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.normalize().to_string())
}
