use crate::error::ValidationError;
use phf::phf_map;
use serde::{Serialize, Serializer};

/// 业务线（店铺）枚举
///
/// 代码值写入 XML 的 `JobType` 节点，由下游系统按数字识别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Cater Hire 店铺
    CaterHire = 1,
    /// Hire All 店铺
    HireAll = 2,
}

/// 店铺名称（含简称）到业务线的映射
static STOREFRONT_NAMES: phf::Map<&'static str, JobType> = phf_map! {
    "caterhire" => JobType::CaterHire,
    "ch" => JobType::CaterHire,
    "hireall" => JobType::HireAll,
    "ha" => JobType::HireAll,
};

impl JobType {
    /// 获取业务类型代码
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 水位表 `website` 列使用的店铺标识
    pub fn website(self) -> &'static str {
        match self {
            JobType::CaterHire => "caterhire",
            JobType::HireAll => "hireall",
        }
    }

    /// 店铺凭证环境变量前缀
    pub fn env_prefix(self) -> &'static str {
        match self {
            JobType::CaterHire => "CH",
            JobType::HireAll => "HA",
        }
    }

    /// 从店铺名称解析（不区分大小写）
    pub fn from_name(name: &str) -> Option<Self> {
        STOREFRONT_NAMES
            .get(name.trim().to_lowercase().as_str())
            .copied()
    }
}

impl TryFrom<u8> for JobType {
    type Error = ValidationError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(JobType::CaterHire),
            2 => Ok(JobType::HireAll),
            _ => Err(ValidationError::UnknownJobType { code }),
        }
    }
}

impl Serialize for JobType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.website())
    }
}
