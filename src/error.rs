// 应用错误定义
// 所有HTTP错误统一转换为 ErrorResponse 格式

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use crate::models::ErrorResponse;

/// 未配置密钥时的错误类别
pub const NOT_CONFIGURED_ERROR: &str = "ClickBank API key not configured";
/// 控制器加载失败时的错误类别
pub const NOT_LOADED_ERROR: &str = "ClickBank controller not loaded";

/// HTTP层错误
#[derive(Debug, Error)]
pub enum AppError {
    /// ClickBank API密钥缺失
    #[error("ClickBank API key not configured")]
    NotConfigured,

    /// 调用ClickBank时出现异常
    #[error("{message}")]
    Upstream { message: String },

    /// ClickBank控制器启动时加载失败
    #[error("ClickBank controller not loaded: {message}")]
    ControllerNotLoaded { message: String },

    /// 请求格式错误
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 路由不存在
    #[error("Route not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// 转换为响应体
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            AppError::NotConfigured => ErrorResponse::new(
                NOT_CONFIGURED_ERROR,
                "Set CLICKBANK_API_KEY in the environment to enable the ClickBank endpoints",
            ),
            AppError::Upstream { message } => {
                ErrorResponse::new("ClickBank request failed", message.clone())
            }
            AppError::ControllerNotLoaded { message } => {
                ErrorResponse::new(NOT_LOADED_ERROR, message.clone())
                    .with_hint("Check server logs for details")
            }
            AppError::BadRequest(message) => ErrorResponse::new("Bad request", message.clone()),
            AppError::NotFound(path) => {
                ErrorResponse::new("Not found", format!("No route for {}", path))
                    .with_hint("GET /api/preview lists the available endpoints")
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotConfigured | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::ControllerNotLoaded { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotConfigured.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Upstream { message: "boom".into() }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ControllerNotLoaded { message: "bad url".into() }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NotFound("/x".into()).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bodies_share_envelope() {
        let body = serde_json::to_value(AppError::NotConfigured.to_body()).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], NOT_CONFIGURED_ERROR);
        assert!(body.get("hint").is_none());

        let body = serde_json::to_value(
            AppError::ControllerNotLoaded { message: "bad url".into() }.to_body(),
        )
        .unwrap();
        assert_eq!(body["error"], NOT_LOADED_ERROR);
        assert_eq!(body["message"], "bad url");
        assert_eq!(body["hint"], "Check server logs for details");
    }
}
