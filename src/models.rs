// WellTech 后端数据模型定义
// 包含ClickBank集成的数据结构和统一响应格式

mod clickbank;

// 重新导出核心类型
pub use clickbank::*;

use serde::Serialize;

/// 统一错误响应格式
///
/// 所有由本服务产生的错误都使用这个结构，不包含时间戳，
/// 相同请求得到完全相同的响应体。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误类别
    pub error: String,
    /// 错误详情
    pub message: String,
    /// 处理建议
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorResponse {
    /// 创建错误响应
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// 附加处理建议
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
