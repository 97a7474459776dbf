//! Infrastructure layer - Persistence and configuration

pub mod config;
pub mod database;

pub use config::ServerConfig;
pub use database::{SeaOrmContainerRepository, SeaOrmWeighingStore, connect};
