pub mod api_key_handler;
pub mod health_handler;
