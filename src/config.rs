use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub password: PasswordConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: u32| {
            get(key)
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(default)
        };

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            memory_kib: number("PASSWORD_MEMORY_KIB", defaults.memory_kib),
            iterations: number("PASSWORD_ITERATIONS", defaults.iterations),
            parallelism: number("PASSWORD_PARALLELISM", defaults.parallelism),
        };
        let log = LogConfig {
            filter: get("RUST_LOG").unwrap_or_else(|| "userbase=debug".into()),
            json: get("LOG_FORMAT").map(|v| v == "json").unwrap_or(false),
        };

        Ok(Self {
            database_url,
            max_connections: number("DATABASE_MAX_CONNECTIONS", 10),
            password,
            log,
        })
    }
}
