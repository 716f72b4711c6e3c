// API处理器模块
// 包含所有HTTP请求处理逻辑

pub mod clickbank_handlers;
pub mod error_handlers;
pub mod info_handlers;

// 重新导出处理器
pub use clickbank_handlers::*;
pub use error_handlers::*;
pub use info_handlers::*;
