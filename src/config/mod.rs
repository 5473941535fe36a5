mod env;

use std::time::Duration;

use self::env::{get_env_mandatory_value, get_env_value_or_default};

#[derive(Clone)]
#[cfg_attr(test, derive(Default))]
pub struct AppConfig {
    pub sweep_interval: Duration,
    pub metrics_port: u16,
    pub retention: RetentionConfig,
}

#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Default))]
pub struct RetentionConfig {
    pub keep_resolved_days: i64,
    pub purge_every_ticks: u32,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let sweep_interval_secs = get_env_value_or_default("SWEEP_INTERVAL_SECS", 30u64);
        let metrics_port = get_env_value_or_default("METRICS_PORT", 8080u16);
        let keep_resolved_days = get_env_value_or_default("RETENTION_KEEP_RESOLVED_DAYS", 90i64);
        let purge_every_ticks = get_env_value_or_default("RETENTION_PURGE_EVERY_TICKS", 120u32);
        Self {
            sweep_interval: Duration::from_secs(sweep_interval_secs),
            metrics_port,
            retention: RetentionConfig {
                keep_resolved_days,
                purge_every_ticks,
            },
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            url: get_env_mandatory_value("DATABASE_URL")?,
            max_connections: get_env_value_or_default("DATABASE_MAX_CONNECTIONS", 5),
        })
    }
}
