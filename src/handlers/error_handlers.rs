// 兜底错误处理器
// 未匹配路由、请求体解析失败以及ClickBank控制器加载失败的统一响应

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use crate::error::AppError;

/// ClickBank控制器加载失败信息
#[derive(Debug, Clone)]
pub struct ControllerLoadFailure {
    /// 加载错误描述
    pub message: String,
}

/// 未匹配的路由
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    log::debug!("No route for {} {}", req.method(), req.path());
    AppError::NotFound(req.path().to_string()).error_response()
}

/// ClickBank控制器不可用时的替代处理器
///
/// 控制器加载失败时仍然注册路由，返回500而不是404。
pub async fn controller_not_loaded(
    failure: web::Data<ControllerLoadFailure>,
) -> Result<HttpResponse, AppError> {
    Err(AppError::ControllerNotLoaded {
        message: failure.message.clone(),
    })
}

/// JSON请求体解析配置
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err, req| {
            log::warn!("Rejected JSON body for {}: {}", req.path(), err);
            AppError::BadRequest(err.to_string()).into()
        })
}

/// 查询字符串解析配置
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("Rejected query string for {}: {}", req.path(), err);
        AppError::BadRequest(err.to_string()).into()
    })
}
