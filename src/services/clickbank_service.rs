// ClickBank API客户端服务
// 负责带认证地调用ClickBank REST API，获取订单、统计数据并探测端点可用性

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::{Client, RequestBuilder, Url, header::{ACCEPT, AUTHORIZATION}};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use crate::models::{ConnectionCheck, Credentials, EndpointProbe, OrderFilter, StatsFilter};

/// 连接测试使用的端点
const CONNECTION_PROBE_PATH: &str = "quickstats/count";

/// 端点探测列表 (名称, 路径)
pub const PROBE_ENDPOINTS: &[(&str, &str)] = &[
    ("orders", "orders2/list"),
    ("orderCount", "orders2/count"),
    ("quickStats", "quickstats/list"),
    ("quickStatsCount", "quickstats/count"),
    ("products", "products/list"),
];

/// ClickBank调用错误
#[derive(Debug, Error)]
pub enum ClickBankError {
    /// 网络或协议错误
    #[error("ClickBank request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 上游返回非成功状态码
    #[error("ClickBank API responded with HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// 响应格式无法识别
    #[error("Unexpected ClickBank response: {0}")]
    Decode(String),

    /// 基础地址无效
    #[error("Invalid ClickBank API URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// HTTP客户端创建失败
    #[error("Failed to create HTTP client: {0}")]
    Client(reqwest::Error),
}

/// ClickBank API 能力接口
///
/// 控制器只依赖这个接口，测试中可以替换为桩实现。
#[async_trait]
pub trait ClickBankApi: Send + Sync {
    /// 测试API连接
    async fn test_connection(&self) -> Result<ConnectionCheck, ClickBankError>;

    /// 探测固定端点列表
    async fn test_endpoints(&self) -> Result<Vec<EndpointProbe>, ClickBankError>;

    /// 查询订单
    async fn get_orders(&self, filter: &OrderFilter) -> Result<Vec<Value>, ClickBankError>;

    /// 查询统计数据
    async fn get_stats(&self, filter: &StatsFilter) -> Result<Value, ClickBankError>;
}

/// 基于reqwest的ClickBank客户端
#[derive(Clone)]
pub struct ClickBankService {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ClickBankService {
    /// 创建新的ClickBank服务实例
    ///
    /// # Arguments
    /// * `client` - 共享的HTTP客户端
    /// * `base_url` - API基础地址 (以 `/` 结尾)
    /// * `credentials` - 访问凭证
    ///
    /// # Returns
    /// * ClickBank服务实例
    pub fn new(client: Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// 创建HTTP客户端
    ///
    /// # Arguments
    /// * `timeout` - 请求超时时间 (秒)，`None` 表示不限制
    pub fn build_client(timeout: Option<u64>) -> Result<Client, ClickBankError> {
        let mut builder = Client::builder()
            .user_agent(concat!("WellTech-Backend/", env!("CARGO_PKG_VERSION")));

        if let Some(seconds) = timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        builder.build().map_err(ClickBankError::Client)
    }

    /// 解析API基础地址，保证以 `/` 结尾
    pub fn parse_base_url(raw: &str) -> Result<Url, ClickBankError> {
        let trimmed = raw.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };

        let url = Url::parse(&normalized).map_err(|e| ClickBankError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClickBankError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "expected an http(s) base URL".to_string(),
            });
        }

        Ok(url)
    }

    /// 构建带认证头的GET请求
    fn get(&self, path: &str) -> Result<RequestBuilder, ClickBankError> {
        let url = self.base_url.join(path).map_err(|e| ClickBankError::InvalidBaseUrl {
            url: self.base_url.to_string(),
            reason: e.to_string(),
        })?;

        log::debug!("ClickBank GET {}", url);

        Ok(self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, self.credentials.authorization()))
    }

    /// 探测单个端点
    async fn probe(&self, name: &str, path: &str) -> EndpointProbe {
        let mut probe = EndpointProbe {
            endpoint: name.to_string(),
            path: path.to_string(),
            available: false,
            status: None,
            error: None,
        };

        let result = match self.get(path) {
            Ok(request) => request.send().await.map_err(ClickBankError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                let status = response.status();
                probe.status = Some(status.as_u16());
                probe.available = status.is_success();
            }
            Err(e) => {
                log::warn!("ClickBank endpoint probe {} failed: {}", path, e);
                probe.error = Some(e.to_string());
            }
        }

        probe
    }
}

#[async_trait]
impl ClickBankApi for ClickBankService {
    async fn test_connection(&self) -> Result<ConnectionCheck, ClickBankError> {
        let response = self.get(CONNECTION_PROBE_PATH)?.send().await?;
        let status = response.status();

        if status.is_success() {
            log::info!("ClickBank connection test succeeded ({})", status);
            return Ok(ConnectionCheck::connected(status.as_u16()));
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("ClickBank connection test rejected with {}", status);

        Ok(ConnectionCheck::rejected(status.as_u16(), details_from_body(&body)))
    }

    async fn test_endpoints(&self) -> Result<Vec<EndpointProbe>, ClickBankError> {
        let probes = PROBE_ENDPOINTS
            .iter()
            .map(|(name, path)| self.probe(name, path));

        Ok(join_all(probes).await)
    }

    async fn get_orders(&self, filter: &OrderFilter) -> Result<Vec<Value>, ClickBankError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(start_date) = &filter.start_date {
            query.push(("startDate", start_date.as_str()));
        }
        if let Some(end_date) = &filter.end_date {
            query.push(("endDate", end_date.as_str()));
        }
        if let Some(status) = &filter.status {
            query.push(("type", status.as_str()));
        }

        let response = self.get("orders2/list")?.query(&query).send().await?;
        let document = read_document(response).await?;

        let mut orders = extract_orders(document)?;
        if let Some(limit) = filter.limit {
            orders.truncate(limit as usize);
        }

        log::info!("Fetched {} ClickBank orders", orders.len());
        Ok(orders)
    }

    async fn get_stats(&self, filter: &StatsFilter) -> Result<Value, ClickBankError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(start_date) = &filter.start_date {
            query.push(("startDate", start_date.as_str()));
        }
        if let Some(end_date) = &filter.end_date {
            query.push(("endDate", end_date.as_str()));
        }

        let response = self.get("quickstats/list")?.query(&query).send().await?;
        read_document(response).await
    }
}

/// 读取成功响应的JSON内容，空响应体视为空对象
async fn read_document(response: reqwest::Response) -> Result<Value, ClickBankError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClickBankError::Api {
            status: status.as_u16(),
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_json::from_str(&body).map_err(|e| ClickBankError::Decode(e.to_string()))
}

/// 从订单列表响应中提取订单
///
/// `orderData` 只有一条记录时ClickBank返回对象而不是数组。
fn extract_orders(document: Value) -> Result<Vec<Value>, ClickBankError> {
    match document {
        Value::Array(orders) => Ok(orders),
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => match map.remove("orderData") {
            Some(Value::Array(orders)) => Ok(orders),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(order @ Value::Object(_)) => Ok(vec![order]),
            Some(other) => Err(ClickBankError::Decode(format!(
                "orderData has unexpected type: {}",
                other
            ))),
        },
        other => Err(ClickBankError::Decode(format!(
            "order list has unexpected type: {}",
            other
        ))),
    }
}

fn details_from_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }

    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}
