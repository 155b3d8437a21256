//! 客户留言解析服务 - 业务能力层
//!
//! 结账页会把预约信息以注释标记包裹后追加到客户留言末尾，例如：
//!
//! ```text
//! 请放在后门 /**/Delivery Date = Monday, January 2, 2023; Collection Date = Wednesday, January 4, 2023;/**/
//! ```
//!
//! 本模块负责两件事：
//! - 拆分留言：员工可见的配送说明 / 机器生成的标记段
//! - 从标记段中提取开始、结束日期

use crate::error::ExtractionError;
use chrono::{NaiveDate, Weekday};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// 成对注释标记包裹的整段内容（含标记）
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/.*/\*.*?\*/").expect("segment regex"));

/// 标记段中的日期载荷：第一个 `*/` 与最后一个 `;/*` 之间
static PAYLOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*/(.+);/\*").expect("payload regex"));

static DELIVERY_RE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Delivery\sDate"));
static PICKUP_RE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Pickup\sDate"));
static COLLECTION_RE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Collection\sDate"));
static RETURN_RE: LazyLock<Regex> = LazyLock::new(|| label_regex(r"Pickup\sperson"));

fn label_regex(label: &str) -> Regex {
    Regex::new(&format!(r"{label}\s=\s(\w+,\s\w+\s\d{{1,2}},\s\d{{4}})")).expect("label regex")
}

/// 拆分后的留言
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitMessage {
    /// 去掉标记段后的留言（配送说明）
    pub instructions: String,
    /// 标记段本身（只取第一段）
    pub other_info: String,
}

/// 提取到的日期，格式 `DD-MM-YYYY`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HireDates {
    pub start: String,
    pub end: String,
}

/// 拆分留言
///
/// 没有标记段时，配送说明为整条留言，其他信息为空。
pub fn split_message(message: &str) -> SplitMessage {
    let instructions = SEGMENT_RE.replace_all(message, "").trim().to_string();
    let other_info = SEGMENT_RE
        .find(message)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    SplitMessage {
        instructions,
        other_info,
    }
}

/// 从留言中提取日期
///
/// # 返回
/// - `Ok(None)`: 留言中没有日期载荷，调用方使用空日期继续
/// - `Ok(Some(dates))`: 提取成功
/// - `Err(_)`: 有载荷但日期缺失或无法解析
pub fn extract_dates(message: &str) -> Result<Option<HireDates>, ExtractionError> {
    let Some(payload) = PAYLOAD_RE.captures(message).and_then(|c| c.get(1)) else {
        return Ok(None);
    };

    extract_labeled_dates(payload.as_str()).map(Some)
}

/// 从载荷中按标签提取日期
///
/// 同一标签出现多次时取第一个；`Delivery Date` 优先于 `Pickup Date`，
/// `Collection Date` 优先于 `Pickup person`。
pub fn extract_labeled_dates(payload: &str) -> Result<HireDates, ExtractionError> {
    let first_match = |re: &Regex| re.captures(payload).map(|c| c[1].to_string());

    let start = first_match(&DELIVERY_RE).or_else(|| first_match(&PICKUP_RE));
    let end = first_match(&COLLECTION_RE).or_else(|| first_match(&RETURN_RE));

    let (Some(start), Some(end)) = (start, end) else {
        return Err(ExtractionError::MissingDates {
            message: payload.to_string(),
        });
    };

    debug!("提取到日期: start='{}', end='{}'", start, end);

    Ok(HireDates {
        start: normalize_long_date(&start)?,
        end: normalize_long_date(&end)?,
    })
}

/// "Monday, January 2, 2023" -> "02-01-2023"
///
/// 星期只校验是否为合法名称，不校验与日期是否一致。
pub fn normalize_long_date(value: &str) -> Result<String, ExtractionError> {
    let invalid = || ExtractionError::InvalidDate {
        value: value.to_string(),
    };

    let (weekday, rest) = value.split_once(',').ok_or_else(invalid)?;
    weekday.trim().parse::<Weekday>().map_err(|_| invalid())?;

    let date = NaiveDate::parse_from_str(rest.trim(), "%B %d, %Y").map_err(|_| invalid())?;
    Ok(date.format("%d-%m-%Y").to_string())
}
