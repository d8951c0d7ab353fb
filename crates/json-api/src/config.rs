//! Server configuration

use bibliotek_app::integrations::accounting::AccountingConfig;
use clap::Parser;

/// Bibliotek JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "bibliotek-json", about = "Bibliotek JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Accounting provider authorization page URL
    #[arg(long, env = "ACCOUNTING_AUTHORIZE_URL")]
    pub accounting_authorize_url: String,

    /// Accounting provider token endpoint URL
    #[arg(long, env = "ACCOUNTING_TOKEN_URL")]
    pub accounting_token_url: String,

    /// OAuth client id registered with the accounting provider
    #[arg(long, env = "ACCOUNTING_CLIENT_ID")]
    pub accounting_client_id: String,

    /// OAuth client secret registered with the accounting provider
    #[arg(long, env = "ACCOUNTING_CLIENT_SECRET")]
    pub accounting_client_secret: String,

    /// Our callback URL registered with the accounting provider
    #[arg(long, env = "ACCOUNTING_REDIRECT_URI")]
    pub accounting_redirect_uri: String,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// OAuth settings for the accounting integration.
    #[must_use]
    pub fn accounting_config(&self) -> AccountingConfig {
        AccountingConfig {
            authorize_url: self.accounting_authorize_url.clone(),
            token_url: self.accounting_token_url.clone(),
            client_id: self.accounting_client_id.clone(),
            client_secret: self.accounting_client_secret.clone(),
            redirect_uri: self.accounting_redirect_uri.clone(),
        }
    }
}
