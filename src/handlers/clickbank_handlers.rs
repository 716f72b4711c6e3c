// ClickBank集成API处理器
// 读取凭证、调用ClickBank客户端并把结果转换为JSON响应

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use crate::config::ClickBankConfig;
use crate::error::AppError;
use crate::models::{
    EndpointsResponse, OrderFilter, OrdersQuery, OrdersResponse, QueryPairs, StatsFilter,
    StatsQuery, StatsResponse,
};
use crate::services::{ClickBankApi, ClickBankError, ClickBankProvider, EnvClickBankProvider};

const ENDPOINTS_NOTE: &str = "Shows which endpoints are available for your API key";

/// ClickBank控制器
///
/// 只保存客户端提供者，不保存任何请求相关状态。
#[derive(Clone)]
pub struct ClickBankController {
    provider: Arc<dyn ClickBankProvider>,
}

impl ClickBankController {
    /// 使用指定的提供者创建控制器
    pub fn new(provider: Arc<dyn ClickBankProvider>) -> Self {
        Self { provider }
    }

    /// 根据配置加载控制器
    ///
    /// # Arguments
    /// * `config` - ClickBank配置
    ///
    /// # Returns
    /// * 基础地址或HTTP客户端无效时返回错误，由路由层降级处理
    pub fn load(config: &ClickBankConfig) -> Result<Self, ClickBankError> {
        let provider = EnvClickBankProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// 获取当前请求可用的客户端
    fn service(&self) -> Result<Arc<dyn ClickBankApi>, AppError> {
        self.provider.resolve().ok_or_else(|| {
            log::warn!("ClickBank request rejected: CLICKBANK_API_KEY is not set");
            AppError::NotConfigured
        })
    }
}

/// 记录上游错误并转换为HTTP错误
fn upstream_failure(operation: &str, error: ClickBankError, fallback: &str) -> AppError {
    log::error!("ClickBank {} error: {}", operation, error);

    AppError::Upstream {
        message: message_or(error.to_string(), fallback),
    }
}

/// 错误信息为空时使用默认信息
fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// 测试ClickBank连接
///
/// GET /api/workflows/clickbank/test
///
/// 响应: 客户端返回的连接结果，失败结果使用500状态码原样返回
pub async fn test_connection(
    controller: web::Data<ClickBankController>,
) -> Result<HttpResponse, AppError> {
    let service = controller.service()?;

    let check = service
        .test_connection()
        .await
        .map_err(|e| upstream_failure("test", e, "Error while testing the ClickBank connection"))?;

    if check.success {
        Ok(HttpResponse::Ok().json(check))
    } else {
        Ok(HttpResponse::InternalServerError().json(check))
    }
}

/// 探测所有ClickBank端点
///
/// GET /api/workflows/clickbank/endpoints
///
/// 响应: EndpointsResponse
pub async fn test_endpoints(
    controller: web::Data<ClickBankController>,
) -> Result<HttpResponse, AppError> {
    let service = controller.service()?;

    let endpoints = service.test_endpoints().await.map_err(|e| {
        upstream_failure("endpoints test", e, "Error while testing the ClickBank endpoints")
    })?;

    Ok(HttpResponse::Ok().json(EndpointsResponse {
        success: true,
        endpoints,
        note: ENDPOINTS_NOTE,
    }))
}

/// 获取ClickBank订单
///
/// GET /api/workflows/clickbank/orders
///
/// 查询参数: startDate, endDate, status, limit
/// 响应: OrdersResponse
pub async fn get_orders(
    controller: web::Data<ClickBankController>,
    query: web::Query<QueryPairs>,
) -> Result<HttpResponse, AppError> {
    let service = controller.service()?;
    let filter = OrderFilter::from(OrdersQuery::from_pairs(query.into_inner()));

    let orders = service
        .get_orders(&filter)
        .await
        .map_err(|e| upstream_failure("getOrders", e, "Error while fetching ClickBank orders"))?;

    Ok(HttpResponse::Ok().json(OrdersResponse {
        success: true,
        count: orders.len(),
        orders,
    }))
}

/// 获取ClickBank统计数据
///
/// GET /api/workflows/clickbank/stats
///
/// 查询参数: startDate, endDate
/// 响应: StatsResponse
pub async fn get_stats(
    controller: web::Data<ClickBankController>,
    query: web::Query<QueryPairs>,
) -> Result<HttpResponse, AppError> {
    let service = controller.service()?;
    let filter = StatsFilter::from(StatsQuery::from_pairs(query.into_inner()));

    let stats = service
        .get_stats(&filter)
        .await
        .map_err(|e| upstream_failure("getStats", e, "Error while fetching ClickBank stats"))?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        success: true,
        stats,
    }))
}
