// WellTech 后端库入口
// 导出配置、路由、处理器和ClickBank服务，供二进制程序和集成测试使用

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
