// ClickBank客户端工厂
// 每个请求重新读取环境变量中的凭证，密钥缺失时返回 None

use reqwest::{Client, Url};
use std::env;
use std::sync::Arc;
use crate::config::ClickBankConfig;
use crate::models::Credentials;
use crate::services::clickbank_service::{ClickBankApi, ClickBankError, ClickBankService};

/// 变量查找函数
type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// ClickBank客户端提供者
pub trait ClickBankProvider: Send + Sync {
    /// 获取已配置的客户端，未配置时返回 `None`
    fn resolve(&self) -> Option<Arc<dyn ClickBankApi>>;
}

/// 基于环境变量的客户端提供者
///
/// HTTP客户端和基础地址在启动时创建一次，凭证在每次调用时读取。
pub struct EnvClickBankProvider {
    client: Client,
    base_url: Url,
    lookup: Lookup,
}

impl EnvClickBankProvider {
    /// 根据配置创建提供者
    ///
    /// # Arguments
    /// * `config` - ClickBank配置
    ///
    /// # Returns
    /// * 基础地址无效或HTTP客户端创建失败时返回错误
    pub fn from_config(config: &ClickBankConfig) -> Result<Self, ClickBankError> {
        let base_url = ClickBankService::parse_base_url(&config.api_url)?;
        let client = ClickBankService::build_client(config.timeout)?;

        Ok(Self {
            client,
            base_url,
            lookup: Box::new(|name| env::var(name).ok()),
        })
    }

    /// 替换变量查找函数
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Box::new(lookup);
        self
    }
}

impl ClickBankProvider for EnvClickBankProvider {
    fn resolve(&self) -> Option<Arc<dyn ClickBankApi>> {
        let credentials = Credentials::from_lookup(&self.lookup)?;

        Some(Arc::new(ClickBankService::new(
            self.client.clone(),
            self.base_url.clone(),
            credentials,
        )))
    }
}
