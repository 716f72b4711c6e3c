// CORS中间件配置
// 处理跨域请求，允许任意前端访问API

use actix_cors::Cors;

/// 创建CORS中间件
///
/// 允许任意源、方法和请求头，响应头返回通配符 `*`
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
