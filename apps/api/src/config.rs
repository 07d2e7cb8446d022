use anyhow::{Context, Result};

const DEFAULT_INSTITUTION: &str = "K J Somaiya College of Engineering";

/// Which persistence layer backs the storage trait.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Process-local maps, faculty seeded at startup. Default.
    Memory,
    /// Managed backend accessed over its REST surface.
    Supabase { url: String, service_key: String },
}

/// Application configuration loaded from environment variables.
/// Startup aborts if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub storage_backend: StorageBackend,
    /// Institution line printed on the download letterhead.
    pub institution_name: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
            Ok("supabase") => StorageBackend::Supabase {
                url: require_env("SUPABASE_URL")?,
                service_key: require_env("SUPABASE_SERVICE_KEY")?,
            },
            Ok("memory") | Err(_) => StorageBackend::Memory,
            Ok(other) => {
                anyhow::bail!("STORAGE_BACKEND must be 'memory' or 'supabase', got '{other}'")
            }
        };

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            storage_backend,
            institution_name: std::env::var("INSTITUTION_NAME")
                .unwrap_or_else(|_| DEFAULT_INSTITUTION.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
