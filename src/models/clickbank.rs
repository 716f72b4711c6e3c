// ClickBank集成数据模型
// 定义凭证、查询过滤条件以及接口响应结构

use serde::{Deserialize, Serialize};
use std::fmt;

/// API密钥环境变量名
pub const API_KEY_VAR: &str = "CLICKBANK_API_KEY";
/// API secret环境变量名
pub const API_SECRET_VAR: &str = "CLICKBANK_API_SECRET";

/// ClickBank访问凭证
#[derive(Clone, PartialEq)]
pub struct Credentials {
    /// API密钥
    pub api_key: String,
    /// API secret (可选)
    pub api_secret: Option<String>,
}

impl Credentials {
    /// 通过自定义查找函数读取凭证
    ///
    /// # Arguments
    /// * `lookup` - 根据变量名返回变量值
    ///
    /// # Returns
    /// * 密钥存在时返回凭证
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).filter(|value| !value.is_empty())?;
        let api_secret = lookup(API_SECRET_VAR).filter(|value| !value.is_empty());

        Some(Self { api_key, api_secret })
    }

    /// 生成 Authorization 请求头的值
    pub fn authorization(&self) -> String {
        match &self.api_secret {
            Some(secret) => format!("{}:{}", self.api_key, secret),
            None => self.api_key.clone(),
        }
    }
}

// 日志中不输出密钥内容
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 查询字符串键值对
pub type QueryPairs = Vec<(String, String)>;

/// 只保留每个参数第一次出现的值
fn first_value(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// 订单查询参数 (原始查询字符串)
#[derive(Debug, Default)]
pub struct OrdersQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
}

impl OrdersQuery {
    /// 从查询字符串键值对构建，重复的参数取第一个值
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "startDate" => first_value(&mut query.start_date, value),
                "endDate" => first_value(&mut query.end_date, value),
                "status" => first_value(&mut query.status, value),
                "limit" => first_value(&mut query.limit, value),
                _ => {}
            }
        }
        query
    }
}

/// 统计查询参数 (原始查询字符串)
#[derive(Debug, Default)]
pub struct StatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl StatsQuery {
    /// 从查询字符串键值对构建，重复的参数取第一个值
    pub fn from_pairs(pairs: QueryPairs) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "startDate" => first_value(&mut query.start_date, value),
                "endDate" => first_value(&mut query.end_date, value),
                _ => {}
            }
        }
        query
    }
}

/// 订单过滤条件
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    /// 开始日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// 结束日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// 订单状态
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// 返回数量上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl From<OrdersQuery> for OrderFilter {
    fn from(query: OrdersQuery) -> Self {
        Self {
            start_date: non_empty(query.start_date),
            end_date: non_empty(query.end_date),
            status: non_empty(query.status),
            limit: query.limit.as_deref().and_then(parse_limit),
        }
    }
}

/// 统计过滤条件
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilter {
    /// 开始日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// 结束日期
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl From<StatsQuery> for StatsFilter {
    fn from(query: StatsQuery) -> Self {
        Self {
            start_date: non_empty(query.start_date),
            end_date: non_empty(query.end_date),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// 解析数量参数
///
/// 只取开头的数字部分，例如 `"12abc"` 解析为 12；没有数字时返回 `None`。
pub fn parse_limit(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return None;
    }

    // 超出范围时取最大值
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// 连接测试结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionCheck {
    /// 是否连接成功
    pub success: bool,
    /// 结果描述
    pub message: String,
    /// 上游HTTP状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// 上游返回的详细内容
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ConnectionCheck {
    /// 创建成功结果
    pub fn connected(status: u16) -> Self {
        Self {
            success: true,
            message: "Connected to ClickBank API".to_string(),
            status: Some(status),
            details: None,
        }
    }

    /// 创建失败结果
    pub fn rejected(status: u16, details: Option<serde_json::Value>) -> Self {
        Self {
            success: false,
            message: format!("ClickBank API responded with HTTP {}", status),
            status: Some(status),
            details,
        }
    }
}

/// 单个端点探测结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointProbe {
    /// 端点名称
    pub endpoint: String,
    /// 请求路径
    pub path: String,
    /// 是否可用
    pub available: bool,
    /// 上游HTTP状态码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// 传输错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 端点探测响应
#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    pub success: bool,
    pub endpoints: Vec<EndpointProbe>,
    pub note: &'static str,
}

/// 订单列表响应
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub success: bool,
    pub count: usize,
    pub orders: Vec<serde_json::Value>,
}

/// 统计数据响应
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_require_api_key() {
        assert!(Credentials::from_lookup(|_| None).is_none());
        assert!(Credentials::from_lookup(|name| {
            (name == API_KEY_VAR).then(String::new)
        })
        .is_none());

        let credentials = Credentials::from_lookup(|name| match name {
            API_KEY_VAR => Some("API-KEY".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(credentials.api_secret, None);
        assert_eq!(credentials.authorization(), "API-KEY");
    }

    #[test]
    fn test_credentials_with_secret() {
        let credentials = Credentials::from_lookup(|name| match name {
            API_KEY_VAR => Some("API-KEY".to_string()),
            API_SECRET_VAR => Some("SECRET".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(credentials.authorization(), "API-KEY:SECRET");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("API-KEY"));
        assert!(!debug.contains("SECRET"));
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("5"), Some(5));
        assert_eq!(parse_limit(" 12abc"), Some(12));
        assert_eq!(parse_limit("+7"), Some(7));
        assert_eq!(parse_limit("abc"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("-3"), None);
        assert_eq!(parse_limit("99999999999"), Some(u32::MAX));
    }

    #[test]
    fn test_order_filter_omits_absent_fields() {
        let filter = OrderFilter::from(OrdersQuery {
            start_date: Some(String::new()),
            end_date: None,
            status: Some("COMPLETE".to_string()),
            limit: Some("5".to_string()),
        });

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"status": "COMPLETE", "limit": 5})
        );
    }

    #[test]
    fn test_repeated_query_keys_keep_first_value() {
        let pairs = vec![
            ("limit".to_string(), "1".to_string()),
            ("limit".to_string(), "2".to_string()),
            ("status".to_string(), "SALE".to_string()),
            ("unknown".to_string(), "x".to_string()),
        ];
        let query = OrdersQuery::from_pairs(pairs);
        assert_eq!(query.limit.as_deref(), Some("1"));
        assert_eq!(query.status.as_deref(), Some("SALE"));
        assert_eq!(query.start_date, None);

        let stats = StatsQuery::from_pairs(vec![
            ("endDate".to_string(), "2024-01-31".to_string()),
            ("endDate".to_string(), "2024-02-29".to_string()),
        ]);
        assert_eq!(stats.end_date.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn test_connection_check_serializes_minimal_shape() {
        let check = ConnectionCheck {
            success: false,
            message: "x".to_string(),
            status: None,
            details: None,
        };

        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            json!({"success": false, "message": "x"})
        );
    }
}
