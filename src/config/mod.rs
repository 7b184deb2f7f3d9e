mod app_config;

pub use app_config::{AppConfig, LogFormat, LoggingConfig};

#[cfg(test)]
pub(crate) use app_config::environment_from;
