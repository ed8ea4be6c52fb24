use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Origins accepted when neither CORS_ORIGINS nor ALLOW_CORS_ALL is set.
const DEV_ORIGINS: [&str; 5] = [
    "http://localhost:5173", // Vite dev server
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
    "https://localhost:5173",
];

#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn allows(&self, origin: &str) -> bool {
        match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::List(list) => list.iter().any(|o| o == origin),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub max_connections: u32,
    pub log_dir: String,
    pub allowed_origins: AllowedOrigins,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {v}"))?,
            None => 5,
        };

        let allow_all = lookup("ALLOW_CORS_ALL").is_some_and(|v| v.trim() == "true");
        let allowed_origins = if allow_all {
            AllowedOrigins::Any
        } else {
            parse_origins(lookup("CORS_ORIGINS").as_deref().unwrap_or(""))
        };

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8000".to_string()),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://hrms.db".to_string()),
            max_connections,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            allowed_origins,
        })
    }
}

/// Comma-separated origin list; an empty value falls back to the local dev origins.
pub fn parse_origins(raw: &str) -> AllowedOrigins {
    let list: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if list.is_empty() {
        AllowedOrigins::List(DEV_ORIGINS.iter().map(|o| o.to_string()).collect())
    } else if list.iter().any(|o| o == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(list)
    }
}
