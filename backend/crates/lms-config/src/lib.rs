mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "LMS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".lms";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "lms.db";

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_ACCESS_TOKEN_LIFETIME_SECS: u64 = 5 * 60;
const MAX_ACCESS_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;
const DEFAULT_REFRESH_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;
const MAX_REFRESH_TOKEN_LIFETIME_SECS: u64 = 90 * 24 * 60 * 60;
const DEFAULT_LEEWAY_SECS: u64 = 0;
const MAX_LEEWAY_SECS: u64 = 300;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
