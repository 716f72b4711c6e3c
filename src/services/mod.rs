// 服务层模块
// 包含ClickBank API客户端及其工厂

pub mod clickbank_service;
pub mod clickbank_provider;

// 重新导出服务
pub use clickbank_service::{ClickBankApi, ClickBankError, ClickBankService};
pub use clickbank_provider::{ClickBankProvider, EnvClickBankProvider};
