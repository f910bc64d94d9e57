use std::net::SocketAddr;

use jbk_keygen::logger::{self, LogConfig};
use jbk_keygen::web::WebServer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = logger::init_logger(LogConfig::default()) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }
    info!("Logger initialized successfully");

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/app.db?mode=rwc".to_string());
    let init_sql_path =
        std::env::var("INIT_SQL_PATH").unwrap_or_else(|_| "data/init.sql".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    info!("Database: {}", db_url);
    info!("Init script: {}", init_sql_path);

    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", bind_addr, e))?;

    let web_server = WebServer::new(db_url, init_sql_path);
    web_server.start(addr).await?;

    Ok(())
}
