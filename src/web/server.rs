use axum::{
    Router,
    routing::get,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tracing::{info, warn};

use anyhow::Result;

use crate::dao::{SQLITE_POOL, init_db, init_sqlite_pool};
use crate::web::{
    handlers::{
        api_key_handler::{
            create_new_api_key, delete_existing_api_key, list_all_api_keys,
            update_existing_api_key,
        },
        health_handler::{health_check, system_info},
    },
    middleware::cors::cors_layer,
};

pub struct WebServer {
    db_url: String,
    init_sql_path: String,
}

impl WebServer {
    pub fn new(db_url: String, init_sql_path: String) -> Self {
        Self {
            db_url,
            init_sql_path,
        }
    }

    pub async fn start(&self, addr: SocketAddr) -> Result<()> {
        init_sqlite_pool(&self.db_url).await;
        let pool = SQLITE_POOL
            .get()
            .expect("SQLITE_POOL not initialized")
            .clone();
        if let Err(e) = init_db(&pool, &self.init_sql_path).await {
            warn!("Failed to initialize database schema: {}", e);
        }

        let app = self.create_app();

        info!("API key playground listening on http://{}", addr);
        info!("Health check: http://{}/health", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn create_app(&self) -> Router {
        Router::new()
            .route(
                "/api-keys",
                get(list_all_api_keys)
                    .post(create_new_api_key)
                    .delete(delete_existing_api_key)
                    .patch(update_existing_api_key),
            )
            .route("/health", get(health_check))
            .route("/system", get(system_info))
            .layer(ServiceBuilder::new().layer(cors_layer()))
    }
}
