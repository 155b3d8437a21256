use thiserror::Error;

/// 应用程序错误类型
///
/// 这一层的错误都是致命的：出现后整次运行中止。
/// 单个订单的可恢复错误见 [`OrderError`]。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// API 调用错误（状态列表、订单分页）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 水位表（数据库）错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 单个订单的错误
///
/// 只会导致当前订单被跳过，运行继续，水位不前进。
#[derive(Debug, Error)]
pub enum OrderError {
    /// 日期提取失败
    #[error("日期提取失败: {0}")]
    Extraction(#[from] ExtractionError),
    /// 字段转换失败
    #[error("转换失败: {0}")]
    Transform(#[from] TransformError),
    /// 校验失败
    #[error("校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 获取订单明细 / 收货地址失败
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// XML 序列化失败
    #[error("XML序列化失败: {0}")]
    Serialize(#[from] SerializeError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 未知的店铺名称
    #[error("未知的店铺: {name}")]
    UnknownStorefront { name: String },
    /// 店铺业务类型代码无效
    #[error("店铺业务类型无效: {0}")]
    InvalidJobType(#[from] ValidationError),
    /// 没有配置任何店铺
    #[error("没有配置任何店铺")]
    NoStorefronts,
    /// 店铺缺少凭证
    #[error("店铺 {storefront} 缺少凭证 (store hash / auth token)")]
    MissingCredentials { storefront: String },
    /// 配置文件读取或解析失败
    #[error("配置文件 {path} 无效: {message}")]
    InvalidFile { path: String, message: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 请求头无效（如凭证含非法字符）
    #[error("无效的请求头 {name}: {message}")]
    InvalidHeader { name: &'static str, message: String },
    /// 订单没有收货地址
    #[error("订单 {order_id} 没有收货地址")]
    NoShippingAddress { order_id: i64 },
}

/// 水位表错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 打开数据库失败
    #[error("无法打开数据库 {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: sqlx::Error,
    },
    /// 查询或写入失败
    #[error("数据库操作失败: {0}")]
    Query(#[from] sqlx::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 日期提取错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// 开始或结束日期缺失
    #[error("无法从留言中提取日期: {message}")]
    MissingDates { message: String },
    /// 日期格式无法解析
    #[error("无法解析日期 '{value}'")]
    InvalidDate { value: String },
}

/// 订单转换错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// 数值字段无法解析
    #[error("无法解析字段 {field} 的数值 '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// XML 序列化错误
#[derive(Debug, Error)]
pub enum SerializeError {
    /// quick-xml 序列化失败
    #[error(transparent)]
    Xml(#[from] quick_xml::SeError),
    /// 文本中含有 XML 1.0 不允许的字符
    #[error("字符 U+{code_point:04X} 无法写入 XML")]
    InvalidCharacter { code_point: u32 },
}

/// 文档校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 配送说明过长
    #[error("配送说明过长: {length} 个字符 (上限 {max})")]
    InstructionsTooLong { length: usize, max: usize },
    /// 未知的业务类型代码
    #[error("业务类型代码应为 1 或 2，实际为 {code}")]
    UnknownJobType { code: u8 },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl FileError {
    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

impl ConfigError {
    /// 创建环境变量缺失错误
    pub fn env_var_not_found(var_name: impl Into<String>) -> Self {
        ConfigError::EnvVarNotFound {
            var_name: var_name.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 单个订单处理结果类型
pub type OrderResult<T> = Result<T, OrderError>;
