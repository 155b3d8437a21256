//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行、关闭）
//! - 持有水位数据库
//! - 逐个店铺运行，汇总统计
//!
//! ### `generation` - 单个店铺的一次运行
//! - 解析待履约状态 id
//! - 根据水位计算起始订单 id，拉取一页订单
//! - 逐个订单执行 `OrderFlow`，写文件、记水位
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Vec<StoreConfig>)
//!     ↓
//! generation (处理 Vec<SourceOrder>)
//!     ↓
//! workflow::OrderFlow (处理单个订单)
//!     ↓
//! services (能力层：parse / transform / validate / xml / watermark)
//!     ↓
//! clients (上游 API)
//! ```

pub mod app;
pub mod generation;

pub use app::App;
pub use generation::{GenerationOrchestrator, RunSettings, RunSummary};
