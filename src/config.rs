// 配置管理模块
// 负责从环境变量加载服务器与ClickBank集成配置

use serde::{Deserialize, Serialize};
use std::env;
use anyhow::{Result, Context};

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 5000;

/// ClickBank REST API 默认地址
pub const DEFAULT_CLICKBANK_API_URL: &str = "https://api.clickbank.com/rest/1.3/";

/// 应用程序配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 服务器配置
    pub server: ServerConfig,
    /// ClickBank配置
    pub clickbank: ClickBankConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 服务器监听地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 工作线程数
    pub workers: Option<usize>,
}

/// ClickBank配置
///
/// API密钥不在这里保存，每个请求都会重新从环境变量读取。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickBankConfig {
    /// REST API 基础地址
    pub api_url: String,
    /// 请求超时时间 (秒)，未设置时不限制
    pub timeout: Option<u64>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // 加载.env文件，忽略错误

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 通过自定义查找函数加载配置
    ///
    /// # Arguments
    /// * `lookup` - 根据变量名返回变量值
    ///
    /// # Returns
    /// * 解析后的配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .unwrap_or_else(|| DEFAULT_PORT.to_string())
                    .parse()
                    .context("Invalid PORT")?,
                workers: lookup("SERVER_WORKERS")
                    .and_then(|s| s.parse().ok()),
            },
            clickbank: ClickBankConfig {
                api_url: lookup("CLICKBANK_API_URL")
                    .unwrap_or_else(|| DEFAULT_CLICKBANK_API_URL.to_string()),
                timeout: lookup("CLICKBANK_TIMEOUT")
                    .map(|s| s.parse::<u64>())
                    .transpose()
                    .context("Invalid CLICKBANK_TIMEOUT")?,
            },
        })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.server.workers == Some(0) {
            anyhow::bail!("Server workers cannot be 0");
        }

        // ClickBank地址错误不阻止启动，由路由层降级处理
        if self.clickbank.api_url.trim().is_empty() {
            log::warn!("CLICKBANK_API_URL is empty, ClickBank routes will be degraded");
        }

        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.workers, None);
        assert_eq!(config.clickbank.api_url, DEFAULT_CLICKBANK_API_URL);
        assert_eq!(config.clickbank.timeout, None);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("SERVER_WORKERS", "2"),
            ("CLICKBANK_API_URL", "http://localhost:9000/rest/"),
            ("CLICKBANK_TIMEOUT", "15"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.server.workers, Some(2));
        assert_eq!(config.clickbank.api_url, "http://localhost:9000/rest/");
        assert_eq!(config.clickbank.timeout, Some(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "abc")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CLICKBANK_TIMEOUT", "soon")])).is_err());

        let zero_port = Config::from_lookup(lookup_from(&[("PORT", "0")])).unwrap();
        assert!(zero_port.validate().is_err());
    }
}
