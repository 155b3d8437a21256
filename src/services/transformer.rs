//! 订单转换服务 - 业务能力层
//!
//! 只负责把一个上游订单映射成 [`HireJobDocument`]，不关心数据从哪来、写到哪去。

use crate::error::TransformError;
use crate::models::{
    Address, DeliveryType, HireJobDocument, JobType, OrderLineItem, OrderLineItems, OrderProduct,
    ShippingAddress, SourceOrder,
};
use crate::services::message_parser::{split_message, HireDates};
use rust_decimal::Decimal;
use std::str::FromStr;

/// 固定运费的配送方式名称；其余方式且运费为 0 视为自提
pub const FLAT_RATE_SHIPPING_METHOD: &str = "Flat Rate for Delivery & Collection";

/// 转换所需的全部输入
#[derive(Debug, Clone, Copy)]
pub struct TransformInput<'a> {
    pub order: &'a SourceOrder,
    pub dates: &'a HireDates,
    pub shipping_address: &'a ShippingAddress,
    pub products: &'a [OrderProduct],
    pub job_type: JobType,
}

/// 转换订单为租赁任务文档
pub fn to_hire_job(input: TransformInput<'_>) -> Result<HireJobDocument, TransformError> {
    let TransformInput {
        order,
        dates,
        shipping_address,
        products,
        job_type,
    } = input;

    let items = products
        .iter()
        .map(to_line_item)
        .collect::<Result<Vec<_>, _>>()?;

    let shipping_cost = parse_decimal("shipping_cost_ex_tax", &order.shipping_cost_ex_tax)?;
    let delivery_type = classify_delivery(&shipping_address.shipping_method, shipping_cost);

    let billing = &order.billing_address;
    let billing_address = Address::from(billing);
    let delivery_address = Address::from(shipping_address);
    let message = split_message(&order.customer_message);

    Ok(HireJobDocument {
        job_type,
        web_enquiry_id: order.id.to_string(),
        first_contact_date: dates.start.clone(),
        name: billing.display_name(),
        billing_company: billing.company.clone(),
        billing_street1: billing_address.street1,
        billing_street2: billing_address.street2,
        billing_city: billing_address.city,
        billing_state: billing_address.state,
        billing_zip: billing_address.zip,
        email: billing.email.clone(),
        tel_no: billing.phone.clone(),
        delivery_type,
        delivery_name: shipping_address.display_name(),
        delivery_company: shipping_address.company.clone(),
        delivery_street1: delivery_address.street1,
        delivery_street2: delivery_address.street2,
        delivery_city: delivery_address.city,
        delivery_state: delivery_address.state,
        delivery_zip: delivery_address.zip,
        delivery_instructions: message.instructions,
        delivery_date: dates.start.clone(),
        collection_date: dates.end.clone(),
        shipping_total: order.shipping_cost_ex_tax.clone(),
        order_line_items: OrderLineItems { items },
        other_info: message.other_info,
    })
}

/// 判断配送方式
///
/// 非固定运费方式且运费为 0 时为自提，其余都是送货。
pub fn classify_delivery(shipping_method: &str, shipping_cost: Decimal) -> DeliveryType {
    if shipping_method != FLAT_RATE_SHIPPING_METHOD && shipping_cost.is_zero() {
        DeliveryType::Collection
    } else {
        DeliveryType::Delivery
    }
}

/// 转换单条商品明细
pub fn to_line_item(product: &OrderProduct) -> Result<OrderLineItem, TransformError> {
    Ok(OrderLineItem {
        id: product.id.to_string(),
        name: product.name.clone(),
        sku: product.sku.clone(),
        quantity: product.quantity,
        price: parse_decimal("base_price", &product.base_price)?,
        subtotal: parse_decimal("total_ex_tax", &product.total_ex_tax)?,
    })
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, TransformError> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| TransformError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingAddress;

    fn sample_order(shipping_cost: &str) -> SourceOrder {
        SourceOrder {
            id: 4130,
            customer_message: "Side gate /**/Delivery Date = Monday, January 2, 2023; Collection Date = Wednesday, January 4, 2023;/**/".to_string(),
            shipping_cost_ex_tax: shipping_cost.to_string(),
            billing_address: BillingAddress {
                first_name: "Aoife".to_string(),
                last_name: "Byrne".to_string(),
                company: "Byrne Events".to_string(),
                street_1: "1 Main St".to_string(),
                city: "Dublin".to_string(),
                email: "aoife@example.com".to_string(),
                phone: "0871234567".to_string(),
                ..Default::default()
            },
        }
    }

    fn sample_shipping(method: &str) -> ShippingAddress {
        ShippingAddress {
            first_name: "Sean".to_string(),
            last_name: "Byrne".to_string(),
            street_1: "5 Hall Rd".to_string(),
            city: "Cork".to_string(),
            shipping_method: method.to_string(),
            ..Default::default()
        }
    }

    fn sample_product(price: &str) -> OrderProduct {
        OrderProduct {
            id: 77,
            name: "Wine Glass".to_string(),
            sku: "WG-01".to_string(),
            quantity: 48,
            base_price: price.to_string(),
            total_ex_tax: "24.0000".to_string(),
        }
    }

    fn dates() -> HireDates {
        HireDates {
            start: "02-01-2023".to_string(),
            end: "04-01-2023".to_string(),
        }
    }

    #[test]
    fn test_classify_delivery() {
        assert_eq!(
            classify_delivery(FLAT_RATE_SHIPPING_METHOD, Decimal::ZERO),
            DeliveryType::Delivery
        );
        assert_eq!(
            classify_delivery("Pickup In Store", Decimal::ZERO),
            DeliveryType::Collection
        );
        assert_eq!(
            classify_delivery("Pickup In Store", Decimal::new(1500, 2)),
            DeliveryType::Delivery
        );
        assert_eq!(
            classify_delivery(FLAT_RATE_SHIPPING_METHOD, Decimal::new(1500, 2)),
            DeliveryType::Delivery
        );
    }

    #[test]
    fn test_to_hire_job_maps_fields() {
        let order = sample_order("0.0000");
        let shipping = sample_shipping("Pickup In Store");
        let products = vec![sample_product("0.5000")];
        let dates = dates();

        let doc = to_hire_job(TransformInput {
            order: &order,
            dates: &dates,
            shipping_address: &shipping,
            products: &products,
            job_type: JobType::CaterHire,
        })
        .unwrap();

        assert_eq!(doc.job_type, JobType::CaterHire);
        assert_eq!(doc.web_enquiry_id, "4130");
        assert_eq!(doc.name, "Aoife Byrne");
        assert_eq!(doc.delivery_name, "Sean Byrne");
        assert_eq!(doc.delivery_city, "Cork");
        assert_eq!(doc.delivery_type, DeliveryType::Collection);
        assert_eq!(doc.first_contact_date, "02-01-2023");
        assert_eq!(doc.delivery_date, "02-01-2023");
        assert_eq!(doc.collection_date, "04-01-2023");
        assert_eq!(doc.shipping_total, "0.0000");
        assert_eq!(doc.delivery_instructions, "Side gate");
        assert!(doc.other_info.starts_with("/**/Delivery Date"));
        assert_eq!(doc.order_line_items.items.len(), 1);
        assert_eq!(doc.order_line_items.items[0].price, Decimal::new(5, 1));
    }

    #[test]
    fn test_invalid_price_names_field() {
        let err = to_line_item(&sample_product("n/a")).unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidNumber {
                field: "base_price",
                value: "n/a".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_shipping_cost() {
        let order = sample_order("free");
        let shipping = sample_shipping(FLAT_RATE_SHIPPING_METHOD);
        let dates = HireDates::default();

        let err = to_hire_job(TransformInput {
            order: &order,
            dates: &dates,
            shipping_address: &shipping,
            products: &[],
            job_type: JobType::HireAll,
        })
        .unwrap_err();

        assert!(matches!(
            err,
            TransformError::InvalidNumber {
                field: "shipping_cost_ex_tax",
                ..
            }
        ));
    }
}
