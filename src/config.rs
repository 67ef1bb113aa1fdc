//! Server configuration.
//!
//! Every option can be given on the command line or through the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PAGEFILTER_HOST` | 127.0.0.1 | Host to bind |
//! | `PAGEFILTER_PORT` | 8080 | Port to listen on |
//! | `DATABASE_URL` | `sqlite::memory:` | Sea-ORM connection string |
//! | `PAGEFILTER_LOG_LEVEL` | info | Log level, overridden by `RUST_LOG` |
//! | `PAGEFILTER_SEED` | 0 | Random persons generated at startup |
//! | `PAGEFILTER_ENABLE_CORS` | true | Permissive CORS layer |

use clap::{ArgAction, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "pagefilter")]
#[command(about = "Filtered, sorted and paginated person records")]
pub struct ServerConfig {
    /// Host address to bind to.
    #[arg(long, env = "PAGEFILTER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PAGEFILTER_PORT", default_value = "8080")]
    pub port: u16,

    /// Database connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    pub database_url: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "PAGEFILTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Number of random persons to generate at startup.
    #[arg(long, env = "PAGEFILTER_SEED", default_value = "0")]
    pub seed: u32,

    /// Enable CORS (`--enable-cors false` turns it off).
    #[arg(long, env = "PAGEFILTER_ENABLE_CORS", default_value = "true", action = ArgAction::Set)]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            log_level: "info".to_string(),
            seed: 0,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// # Errors
    ///
    /// Every problem found, one message each.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.host.trim().is_empty() {
            errors.push("Host cannot be empty".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if !["error", "warn", "info", "debug", "trace"]
            .iter()
            .any(|level| level.eq_ignore_ascii_case(&self.log_level))
        {
            errors.push(format!("Unknown log level '{}'", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Ephemeral port, in-memory database, verbose logging.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            enable_cors: false,
            ..Self::default()
        }
    }
}
