// API路由配置
// 定义所有HTTP接口的路由规则

use actix_web::{web, Scope};
use crate::config::ClickBankConfig;
use crate::handlers::*;

/// ClickBank路由挂载状态
///
/// 启动时加载一次，各个worker共享。
#[derive(Clone)]
pub enum ClickBankMount {
    /// 控制器加载成功
    Loaded(web::Data<ClickBankController>),
    /// 控制器加载失败，路由返回500
    Unavailable(web::Data<ControllerLoadFailure>),
}

impl ClickBankMount {
    /// 尝试加载ClickBank控制器
    ///
    /// 加载失败不会终止进程，只记录错误并注册替代路由。
    pub fn load(config: &ClickBankConfig) -> Self {
        log::info!("Registering ClickBank routes...");

        match ClickBankController::load(config) {
            Ok(controller) => {
                log::info!("ClickBank controller loaded");
                ClickBankMount::Loaded(web::Data::new(controller))
            }
            Err(e) => {
                log::error!("Error loading ClickBank controller: {}", e);
                ClickBankMount::Unavailable(web::Data::new(ControllerLoadFailure {
                    message: e.to_string(),
                }))
            }
        }
    }
}

/// 应用路由配置
pub fn configure(clickbank: ClickBankMount) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(json_config())
            .app_data(query_config())
            .route("/", web::get().to(root_banner))
            .service(api_routes(clickbank));
    }
}

/// /api 路由
pub fn api_routes(clickbank: ClickBankMount) -> Scope {
    web::scope("/api")
        .route("/preview", web::get().to(api_preview))
        .service(workflow_routes(clickbank))
}

/// 工作流路由
fn workflow_routes(clickbank: ClickBankMount) -> Scope {
    web::scope("/workflows")
        .service(clickbank_routes(clickbank))
}

/// ClickBank路由
fn clickbank_routes(mount: ClickBankMount) -> Scope {
    let scope = web::scope("/clickbank")
        .route("", web::get().to(clickbank_directory));

    match mount {
        ClickBankMount::Loaded(controller) => scope
            .app_data(controller)
            .route("/test", web::get().to(test_connection))
            .route("/endpoints", web::get().to(test_endpoints))
            .route("/orders", web::get().to(get_orders))
            .route("/stats", web::get().to(get_stats)),
        ClickBankMount::Unavailable(failure) => scope
            .app_data(failure)
            .route("/test", web::get().to(controller_not_loaded))
            .route("/endpoints", web::get().to(controller_not_loaded))
            .route("/orders", web::get().to(controller_not_loaded))
            .route("/stats", web::get().to(controller_not_loaded)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NOT_CONFIGURED_ERROR, NOT_LOADED_ERROR};
    use crate::services::EnvClickBankProvider;
    use actix_web::{http::StatusCode, test as actix_test, App};
    use serde_json::Value;
    use std::sync::Arc;

    fn unavailable() -> ClickBankMount {
        ClickBankMount::load(&ClickBankConfig {
            api_url: "::not a url::".to_string(),
            timeout: None,
        })
    }

    fn without_key() -> ClickBankMount {
        let provider = EnvClickBankProvider::from_config(&ClickBankConfig {
            api_url: "http://127.0.0.1:9/rest/1.3/".to_string(),
            timeout: None,
        })
        .unwrap()
        .with_lookup(|_| None);

        ClickBankMount::Loaded(web::Data::new(ClickBankController::new(Arc::new(provider))))
    }

    #[test]
    fn test_invalid_url_degrades_mount() {
        assert!(matches!(unavailable(), ClickBankMount::Unavailable(_)));
    }

    #[actix_web::test]
    async fn test_degraded_routes_answer_500() {
        let app = actix_test::init_service(
            App::new()
                .configure(configure(unavailable()))
                .default_service(web::to(not_found))
        ).await;

        for uri in [
            "/api/workflows/clickbank/test",
            "/api/workflows/clickbank/endpoints",
            "/api/workflows/clickbank/orders",
            "/api/workflows/clickbank/stats",
        ] {
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);

            let body: Value = actix_test::read_body_json(resp).await;
            assert_eq!(body["error"], NOT_LOADED_ERROR);
            assert_eq!(body["hint"], "Check server logs for details");
            assert!(body["message"].as_str().unwrap().contains("Invalid ClickBank API URL"));
        }

        // 目录路由不受影响
        let req = actix_test::TestRequest::get().uri("/api/workflows/clickbank").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_loaded_routes_without_key_answer_400() {
        let app = actix_test::init_service(
            App::new()
                .configure(configure(without_key()))
                .default_service(web::to(not_found))
        ).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/workflows/clickbank/orders?limit=5")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["error"], NOT_CONFIGURED_ERROR);
    }

    #[actix_web::test]
    async fn test_static_routes_and_fallback() {
        let app = actix_test::init_service(
            App::new()
                .configure(configure(without_key()))
                .default_service(web::to(not_found))
        ).await;

        for uri in ["/", "/api/preview", "/api/workflows/clickbank"] {
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
        }

        let req = actix_test::TestRequest::get().uri("/api/videos").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
