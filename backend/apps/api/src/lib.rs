//! Shop API Server
//!
//! Configuration and router assembly for the `shop-api` binary.

pub mod app;
pub mod config;

pub use app::build_router;
pub use config::ServerConfig;
