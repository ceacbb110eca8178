mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig,
};
