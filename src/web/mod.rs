//! # HTTP surface
//!
//! Thin pass-through routes over the `api_keys` table for collaborators.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::WebServer;
