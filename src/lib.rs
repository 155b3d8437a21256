//! # Hire Job Export
//!
//! 从店铺 API 拉取待履约订单，转换为租赁任务（Hire Job）XML 文件，
//! 并记录水位，下次运行从上次处理到的位置继续。
//!
//! ## 架构设计
//!
//! ### ① 上游接入层（Clients）
//! - `clients/` - `OrderSource` 接口与 BigCommerce 实现
//!
//! ### ② 业务能力层（Services）
//! - `message_parser` - 拆分客户留言、提取预约日期
//! - `transformer` - 订单 → 租赁任务文档，判断送货 / 自提
//! - `validator` - 序列化前校验
//! - `xml_writer` - 序列化并写文件
//! - `watermark_store` - SQLite 水位表
//! - `reporter` - 结果上报接口
//!
//! ### ③ 流程层（Workflow）
//! - `OrderCtx` - 上下文封装（店铺 + 订单 id）
//! - `OrderFlow` - 单个订单的流程编排（日期 → 明细 → 地址 → 转换 → 校验 → XML）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期，逐店铺运行
//! - `orchestrator/generation` - 单个店铺的一次运行，逐个订单处理并隔离失败

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{BigCommerceClient, OrderSource};
pub use config::Config;
pub use error::{AppError, AppResult, OrderError};
pub use models::{HireJobDocument, JobType};
pub use orchestrator::{App, GenerationOrchestrator, RunSettings, RunSummary};
pub use services::{Reporter, TracingReporter, WatermarkStore};
pub use workflow::{OrderCtx, OrderFlow, OrderOutcome};
