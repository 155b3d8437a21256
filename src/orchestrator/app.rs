//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：打开水位数据库
//! 2. **逐店铺运行**：为每个店铺创建客户端，交给 `GenerationOrchestrator`
//! 3. **资源管理**：持有数据库连接池，结束时关闭
//! 4. **全局统计**：汇总各店铺的处理结果
//!
//! 店铺之间互不影响：一个店铺运行中止后继续下一个，最后返回第一个错误。

use crate::clients::BigCommerceClient;
use crate::config::{Config, StoreConfig};
use crate::error::{AppError, AppResult};
use crate::orchestrator::generation::{GenerationOrchestrator, RunSettings, RunSummary};
use crate::services::{Reporter, WatermarkStore};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    store: WatermarkStore,
    reporter: Box<dyn Reporter>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config, reporter: Box<dyn Reporter>) -> AppResult<Self> {
        logging::log_startup(&config);

        let store = WatermarkStore::open(&config.database_path).await?;

        Ok(Self {
            config,
            store,
            reporter,
        })
    }

    /// 依次运行所有店铺
    pub async fn run(&self) -> AppResult<Vec<RunSummary>> {
        let mut summaries = Vec::new();
        let mut first_error: Option<AppError> = None;

        for store_config in &self.config.storefronts {
            match self.run_storefront(store_config).await {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    self.reporter.run_failed(store_config.job_type, &e);
                    first_error.get_or_insert(e);
                }
            }
        }

        logging::print_final_stats(&summaries);

        match first_error {
            Some(e) => Err(e),
            None => Ok(summaries),
        }
    }

    async fn run_storefront(&self, store_config: &StoreConfig) -> AppResult<RunSummary> {
        let client = BigCommerceClient::new(&self.config.api_base_url, store_config)?;
        let orchestrator = GenerationOrchestrator::new(&client, &self.store, self.reporter.as_ref());

        let settings = RunSettings {
            job_type: store_config.job_type,
            destination: self.config.file_path.clone(),
            page_size: self.config.page_size,
            fallback_min_order_id: store_config.fallback_min_order_id,
        };

        orchestrator.run(&settings).await
    }

    /// 关闭数据库连接
    pub async fn shutdown(self) {
        self.store.close().await;
    }
}
