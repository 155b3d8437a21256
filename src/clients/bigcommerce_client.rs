/// BigCommerce v2 API 客户端
///
/// 封装所有与店铺 API 相关的调用逻辑
use crate::clients::OrderSource;
use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::models::{OrderProduct, OrderQuery, OrderStatus, ShippingAddress, SourceOrder};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

/// BigCommerce 客户端
pub struct BigCommerceClient {
    http: reqwest::Client,
    base_url: String,
}

impl BigCommerceClient {
    /// 创建新的店铺客户端
    pub fn new(api_base_url: &str, store: &StoreConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let token = HeaderValue::from_str(&store.auth_token).map_err(|e| ApiError::InvalidHeader {
            name: "X-Auth-Token",
            message: e.to_string(),
        })?;
        headers.insert("X-Auth-Token", token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::request_failed("client", e))?;

        Ok(Self {
            http,
            base_url: format!(
                "{}/stores/{}/v2",
                api_base_url.trim_end_matches('/'),
                store.store_hash
            ),
        })
    }

    /// 发送 GET 请求并解析 JSON 列表
    ///
    /// 上游用 204 表示空列表。
    async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&body).map_err(|e| ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl OrderSource for BigCommerceClient {
    async fn order_statuses(&self) -> Result<Vec<OrderStatus>, ApiError> {
        self.get_list("order_statuses", &[]).await
    }

    async fn orders(&self, query: &OrderQuery) -> Result<Vec<SourceOrder>, ApiError> {
        self.get_list("orders", &query.to_query_pairs()).await
    }

    async fn order_products(
        &self,
        order_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<Vec<OrderProduct>, ApiError> {
        let endpoint = format!("orders/{}/products", order_id);
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        self.get_list(&endpoint, &query).await
    }

    async fn shipping_addresses(&self, order_id: i64) -> Result<Vec<ShippingAddress>, ApiError> {
        let endpoint = format!("orders/{}/shipping_addresses", order_id);
        self.get_list(&endpoint, &[]).await
    }
}
