//! XML 输出服务 - 业务能力层
//!
//! 只负责"把一个文档变成 XML 文件"能力：
//! - 序列化：根节点 `Orders` 下一个 `Order`，4 空格缩进，空节点展开为 `<Tag></Tag>`
//! - 字符检查：XML 1.0 不允许的字符使当前订单失败；`\r` 写成 `&#xD;`
//! - 写文件：`<目录>/order<id>.xml`，写完后 fsync

use crate::error::{FileError, SerializeError};
use crate::models::{HireJobDocument, Orders};
use quick_xml::se::Serializer;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 序列化单个文档
pub fn to_xml(document: &HireJobDocument) -> Result<String, SerializeError> {
    let orders = Orders::single(document.clone());

    let mut buffer = String::new();
    let mut serializer = Serializer::new(&mut buffer);
    serializer.indent(' ', 4);
    serializer.expand_empty_elements(true);
    orders.serialize(serializer)?;

    // 缩进只产生空格和 \n，这里出现的字符都来自字段文本
    if let Some(c) = buffer.chars().find(|&c| !is_xml_char(c)) {
        return Err(SerializeError::InvalidCharacter {
            code_point: c as u32,
        });
    }

    // 解析器会把 \r 规范化掉，写成字符引用才能保留
    Ok(buffer.replace('\r', "&#xD;"))
}

/// XML 1.0 `Char` 产生式
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// 订单对应的输出文件路径
pub fn order_file_path(destination: &Path, order_id: i64) -> PathBuf {
    destination.join(format!("order{}.xml", order_id))
}

/// 写入 XML 文件
///
/// 同名文件直接覆盖。返回写入的路径。
pub async fn write_order_file(
    destination: &Path,
    order_id: i64,
    xml: &str,
) -> Result<PathBuf, FileError> {
    let path = order_file_path(destination, order_id);
    let path_str = path.display().to_string();

    let mut file = File::create(&path)
        .await
        .map_err(|e| FileError::write_failed(&path_str, e))?;
    file.write_all(xml.as_bytes())
        .await
        .map_err(|e| FileError::write_failed(&path_str, e))?;
    file.sync_all()
        .await
        .map_err(|e| FileError::write_failed(&path_str, e))?;

    debug!("已写入文件: {} ({} 字节)", path_str, xml.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryType, JobType, OrderLineItem, OrderLineItems};
    use rust_decimal::Decimal;

    fn sample_document() -> HireJobDocument {
        HireJobDocument {
            job_type: JobType::HireAll,
            web_enquiry_id: "4130".to_string(),
            first_contact_date: "02-01-2023".to_string(),
            name: "Aoife Byrne".to_string(),
            billing_company: "Byrne & Sons".to_string(),
            billing_street1: "1 Main St".to_string(),
            billing_street2: String::new(),
            billing_city: "Dublin".to_string(),
            billing_state: "Dublin".to_string(),
            billing_zip: "D01".to_string(),
            email: "aoife@example.com".to_string(),
            tel_no: "0871234567".to_string(),
            delivery_type: DeliveryType::Collection,
            delivery_name: "Sean Byrne".to_string(),
            delivery_company: String::new(),
            delivery_street1: "5 Hall Rd".to_string(),
            delivery_street2: String::new(),
            delivery_city: "Cork".to_string(),
            delivery_state: "Cork".to_string(),
            delivery_zip: "T12".to_string(),
            delivery_instructions: "Side gate".to_string(),
            delivery_date: "02-01-2023".to_string(),
            collection_date: "04-01-2023".to_string(),
            shipping_total: "0.0000".to_string(),
            order_line_items: OrderLineItems {
                items: vec![OrderLineItem {
                    id: "77".to_string(),
                    name: "Wine Glass".to_string(),
                    sku: "WG-01".to_string(),
                    quantity: 48,
                    price: Decimal::new(5000, 4),
                    subtotal: Decimal::new(240000, 4),
                }],
            },
            other_info: String::new(),
        }
    }

    #[test]
    fn test_layout_and_tags() {
        let xml = to_xml(&sample_document()).unwrap();

        assert!(xml.starts_with("<Orders>\n    <Order>\n        <JobType>2</JobType>"));
        assert!(xml.contains("\n        <webenquiryid>4130</webenquiryid>"));
        assert!(xml.contains("<DeliveryType>1</DeliveryType>"));
        assert!(xml.contains("<Deliveryname>Sean Byrne</Deliveryname>"));
        assert!(xml.contains("<Deliveryinstructions>Side gate</Deliveryinstructions>"));
        assert!(xml.contains("<BillingStreet2></BillingStreet2>"));
        assert!(xml.contains("<BillingCompany>Byrne &amp; Sons</BillingCompany>"));
        assert!(xml.contains("\n            <OrderLineItem>\n                <Id>77</Id>"));
        assert!(xml.contains("<Price>0.5</Price>"));
        assert!(xml.contains("<Subtotal>24</Subtotal>"));
        assert!(xml.trim_end().ends_with("</Orders>"));
    }

    #[test]
    fn test_tag_order_is_fixed() {
        let xml = to_xml(&sample_document()).unwrap();
        let tags = [
            "<JobType>",
            "<webenquiryid>",
            "<FirstContactDate>",
            "<Name>",
            "<BillingCompany>",
            "<Email>",
            "<TelNo>",
            "<DeliveryType>",
            "<Deliveryname>",
            "<DeliveryZip>",
            "<Deliveryinstructions>",
            "<DeliveryDate>",
            "<CollectionDate>",
            "<ShippingTotal>",
            "<OrderLineItems>",
            "<OtherInfo>",
        ];
        let positions: Vec<usize> = tags.iter().map(|t| xml.find(t).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let doc = sample_document();
        assert_eq!(to_xml(&doc).unwrap(), to_xml(&doc).unwrap());
    }

    #[test]
    fn test_control_character_is_rejected() {
        let mut doc = sample_document();
        doc.delivery_instructions = "line1 \u{1} line2".to_string();

        let err = to_xml(&doc).unwrap_err();
        assert!(matches!(
            err,
            SerializeError::InvalidCharacter { code_point: 0x01 }
        ));
        assert_eq!(err.to_string(), "字符 U+0001 无法写入 XML");
    }

    #[test]
    fn test_noncharacter_is_rejected() {
        let mut doc = sample_document();
        doc.other_info = "\u{FFFE}".to_string();

        assert!(matches!(
            to_xml(&doc),
            Err(SerializeError::InvalidCharacter { code_point: 0xFFFE })
        ));
    }

    #[test]
    fn test_carriage_return_is_escaped() {
        let mut doc = sample_document();
        doc.delivery_instructions = "line1\r\nline2\tend".to_string();

        let xml = to_xml(&doc).unwrap();
        assert!(!xml.contains('\r'));
        assert!(xml.contains(
            "<Deliveryinstructions>line1&#xD;\nline2\tend</Deliveryinstructions>"
        ));
    }

    #[tokio::test]
    async fn test_write_order_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_order_file(dir.path(), 4130, "<Orders></Orders>")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("order4130.xml"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<Orders></Orders>"
        );
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = write_order_file(&missing, 1, "x").await.unwrap_err();
        assert!(matches!(err, FileError::WriteFailed { .. }));
    }
}
