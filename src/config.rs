use crate::error::ConfigError;
use crate::models::JobType;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 默认查询页大小
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Cater Hire 没有水位记录时的起始订单 id
pub const DEFAULT_CATERHIRE_MIN_ORDER_ID: i64 = 4126;
/// 配置文件路径环境变量
pub const CONFIG_FILE_ENV: &str = "HIRE_EXPORT_CONFIG";

const DEFAULT_DATABASE_PATH: &str = "data/main.db";
const DEFAULT_API_BASE_URL: &str = "https://api.bigcommerce.com";
const DEFAULT_STOREFRONTS: &str = "caterhire";

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// XML 文件输出目录
    pub file_path: PathBuf,
    /// 水位数据库文件
    pub database_path: PathBuf,
    /// 店铺 API 地址
    pub api_base_url: String,
    /// 每次运行拉取的订单数量
    pub page_size: u32,
    /// 依次处理的店铺
    pub storefronts: Vec<StoreConfig>,
}

/// 单个店铺配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub job_type: JobType,
    pub store_hash: String,
    pub auth_token: String,
    /// 没有水位记录时使用的起始订单 id
    pub fallback_min_order_id: i64,
}

impl Config {
    /// 加载配置
    ///
    /// 先加载 `.env`；若设置了 `HIRE_EXPORT_CONFIG` 则读取该 TOML 文件，否则读取环境变量。
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(&path)),
            _ => Self::from_env(),
        }
    }

    /// 从环境变量读取
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（环境变量 / 测试用 map）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let file_path = get("FILE_PATH").ok_or_else(|| ConfigError::env_var_not_found("FILE_PATH"))?;

        let page_size = match get("PAGE_SIZE") {
            Some(value) => parse_var("PAGE_SIZE", &value, "u32")?,
            None => DEFAULT_PAGE_SIZE,
        };

        let names = get("STOREFRONTS").unwrap_or_else(|| DEFAULT_STOREFRONTS.to_string());
        let mut storefronts = Vec::new();
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let job_type = parse_storefront(name)?;
            let prefix = job_type.env_prefix();

            let fallback_key = format!("{}_MIN_ORDER_ID", prefix);
            let fallback_min_order_id = match get(&fallback_key) {
                Some(value) => parse_var(&fallback_key, &value, "i64")?,
                None => default_min_order_id(job_type),
            };

            storefronts.push(StoreConfig::new(
                job_type,
                get(&format!("{}_STORE_HASH", prefix)),
                get(&format!("{}_XAUTHTOKEN", prefix)),
                fallback_min_order_id,
            )?);
        }

        if storefronts.is_empty() {
            return Err(ConfigError::NoStorefronts);
        }

        Ok(Self {
            file_path: PathBuf::from(file_path),
            database_path: PathBuf::from(
                get("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            ),
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            page_size,
            storefronts,
        })
    }

    /// 从 TOML 文件读取
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let file: FileConfig = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        let storefronts = file
            .storefronts
            .into_iter()
            .map(|s| {
                let job_type = parse_storefront(&s.name)?;
                StoreConfig::new(
                    job_type,
                    s.store_hash,
                    s.auth_token,
                    s.fallback_min_order_id
                        .unwrap_or_else(|| default_min_order_id(job_type)),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        if storefronts.is_empty() {
            return Err(ConfigError::NoStorefronts);
        }

        Ok(Self {
            file_path: file.file_path,
            database_path: file.database_path,
            api_base_url: file.api_base_url,
            page_size: file.page_size,
            storefronts,
        })
    }
}

impl StoreConfig {
    /// 凭证缺一不可
    fn new(
        job_type: JobType,
        store_hash: Option<String>,
        auth_token: Option<String>,
        fallback_min_order_id: i64,
    ) -> Result<Self, ConfigError> {
        match (store_hash, auth_token) {
            (Some(store_hash), Some(auth_token))
                if !store_hash.trim().is_empty() && !auth_token.trim().is_empty() =>
            {
                Ok(Self {
                    job_type,
                    store_hash,
                    auth_token,
                    fallback_min_order_id,
                })
            }
            _ => Err(ConfigError::MissingCredentials {
                storefront: job_type.website().to_string(),
            }),
        }
    }
}

/// 店铺名称或业务类型代码（`1` / `2`）
fn parse_storefront(name: &str) -> Result<JobType, ConfigError> {
    if let Ok(code) = name.trim().parse::<u8>() {
        return Ok(JobType::try_from(code)?);
    }

    JobType::from_name(name).ok_or_else(|| ConfigError::UnknownStorefront {
        name: name.to_string(),
    })
}

fn default_min_order_id(job_type: JobType) -> i64 {
    match job_type {
        JobType::CaterHire => DEFAULT_CATERHIRE_MIN_ORDER_ID,
        JobType::HireAll => 0,
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}

/// TOML 配置文件结构
#[derive(Debug, Deserialize)]
struct FileConfig {
    file_path: PathBuf,
    #[serde(default = "default_database_path")]
    database_path: PathBuf,
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default)]
    storefronts: Vec<FileStorefront>,
}

#[derive(Debug, Deserialize)]
struct FileStorefront {
    name: String,
    store_hash: Option<String>,
    auth_token: Option<String>,
    fallback_min_order_id: Option<i64>,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_caterhire() {
        let config = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("CH_STORE_HASH", "abc123"),
            ("CH_XAUTHTOKEN", "token"),
        ]))
        .unwrap();

        assert_eq!(config.file_path, PathBuf::from("/srv/jobs"));
        assert_eq!(config.database_path, PathBuf::from("data/main.db"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.storefronts.len(), 1);
        assert_eq!(config.storefronts[0].job_type, JobType::CaterHire);
        assert_eq!(config.storefronts[0].fallback_min_order_id, 4126);
    }

    #[test]
    fn test_missing_file_path() {
        let err = Config::from_lookup(lookup(&[
            ("CH_STORE_HASH", "abc123"),
            ("CH_XAUTHTOKEN", "token"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound { ref var_name } if var_name == "FILE_PATH"));
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let err = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("STOREFRONTS", "caterhire,hireall"),
            ("CH_STORE_HASH", "abc123"),
            ("CH_XAUTHTOKEN", "token"),
            ("HA_STORE_HASH", "def456"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials { ref storefront } if storefront == "hireall"));
    }

    #[test]
    fn test_unknown_storefront() {
        let err = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("STOREFRONTS", "partyhire"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStorefront { .. }));
    }

    #[test]
    fn test_empty_storefront_list_is_fatal() {
        let err = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("STOREFRONTS", " , "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoStorefronts));
    }

    #[test]
    fn test_toml_without_storefronts_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.toml");
        std::fs::write(&path, "file_path = \"/srv/jobs\"\n").unwrap();

        let err = Config::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NoStorefronts));
    }

    #[test]
    fn test_storefront_by_job_type_code() {
        let config = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("STOREFRONTS", "2"),
            ("HA_STORE_HASH", "def456"),
            ("HA_XAUTHTOKEN", "token"),
        ]))
        .unwrap();
        assert_eq!(config.storefronts[0].job_type, JobType::HireAll);
        assert_eq!(config.storefronts[0].fallback_min_order_id, 0);
    }

    #[test]
    fn test_unknown_job_type_code() {
        let err = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("STOREFRONTS", "3"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidJobType(ValidationError::UnknownJobType { code: 3 })
        ));
    }

    #[test]
    fn test_invalid_page_size() {
        let err = Config::from_lookup(lookup(&[
            ("FILE_PATH", "/srv/jobs"),
            ("PAGE_SIZE", "ten"),
            ("CH_STORE_HASH", "abc123"),
            ("CH_XAUTHTOKEN", "token"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParseFailed { .. }));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.toml");
        std::fs::write(
            &path,
            r#"
file_path = "/srv/jobs"
page_size = 25

[[storefronts]]
name = "hireall"
store_hash = "def456"
auth_token = "token"
fallback_min_order_id = 900
"#,
        )
        .unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(
            config.storefronts,
            vec![StoreConfig {
                job_type: JobType::HireAll,
                store_hash: "def456".to_string(),
                auth_token: "token".to_string(),
                fallback_min_order_id: 900,
            }]
        );
    }
}
