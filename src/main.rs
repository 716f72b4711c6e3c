use actix_web::{web, App, HttpServer};
use anyhow::Context;
use chrono::Local;
use log::info;
use std::io::Write;
use welltech_backend::config::Config;
use welltech_backend::handlers::not_found;
use welltech_backend::middleware::{create_cors, RequestLogging};
use welltech_backend::routes::{configure, ClickBankMount};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
        })
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    // 控制器加载失败时注册替代路由，不终止进程
    let clickbank = ClickBankMount::load(&config.clickbank);

    let bind_address = config.bind_address();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors())
            .wrap(RequestLogging)
            .configure(configure(clickbank.clone()))
            .default_service(web::to(not_found))
    });

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Server is running on port {}", config.server.port);
    info!("API available at http://{}/api", bind_address);

    server.run().await.context("HTTP server terminated with an error")?;
    Ok(())
}
