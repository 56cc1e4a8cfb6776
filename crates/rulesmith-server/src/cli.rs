use std::path::PathBuf;

use clap::Parser;

use crate::config::{HistoryBackendKind, LogFormat, LogLevel, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "rulesmith-server",
    about = "AI WAF rule copilot: generate firewall rules from plain English",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind address override (takes precedence over config file)
    #[arg(long)]
    pub bind_address: Option<String>,

    /// Port override
    #[arg(short, long)]
    pub port: Option<u16>,

    /// History backend override: memory or sqlite
    #[arg(long)]
    pub backend: Option<HistoryBackendKind>,

    /// SQLite database path override
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Bearer token for the model endpoint
    #[arg(long, env = "RULESMITH_API_TOKEN")]
    pub api_token: Option<String>,

    /// Log level override (takes precedence over config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Log format: json (default, production) or text (development)
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Fold command-line overrides into a loaded config.
    pub fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(ref bind_address) = self.bind_address {
            config.http.bind_address = bind_address.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if let Some(backend) = self.backend {
            config.history.backend = backend;
        }
        if let Some(ref path) = self.db_path {
            config.history.path = path.clone();
        }
        if let Some(ref token) = self.api_token {
            config.model.api_token = token.clone();
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_defaults_to_no_overrides() {
        let cli = Cli::try_parse_from(["rulesmith-server"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.port.is_none());
        assert!(cli.backend.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn cli_custom_config_path() {
        let cli =
            Cli::try_parse_from(["rulesmith-server", "--config", "/tmp/rulesmith.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rulesmith.toml")));
    }

    #[test]
    fn cli_backend_override() {
        let cli = Cli::try_parse_from(["rulesmith-server", "--backend", "memory"]).unwrap();
        assert_eq!(cli.backend, Some(HistoryBackendKind::Memory));
    }

    #[test]
    fn cli_invalid_backend_rejected() {
        assert!(Cli::try_parse_from(["rulesmith-server", "--backend", "postgres"]).is_err());
    }

    #[test]
    fn cli_log_level_override() {
        let cli = Cli::try_parse_from(["rulesmith-server", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn cli_invalid_log_level_rejected() {
        assert!(Cli::try_parse_from(["rulesmith-server", "--log-level", "banana"]).is_err());
    }

    #[test]
    fn cli_log_format_text() {
        let cli = Cli::try_parse_from(["rulesmith-server", "--log-format", "text"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Text));
    }

    #[test]
    fn apply_to_overrides_only_given_fields() {
        let cli = Cli::try_parse_from([
            "rulesmith-server",
            "--port",
            "9000",
            "--backend",
            "memory",
            "--log-level",
            "trace",
        ])
        .unwrap();

        let mut config = ServerConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.http.port, 9000);
        assert_eq!(config.history.backend, HistoryBackendKind::Memory);
        assert_eq!(config.log.level, LogLevel::Trace);
        // Untouched fields keep their defaults
        assert_eq!(config.http.bind_address, "127.0.0.1");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn apply_to_sets_api_token() {
        let cli =
            Cli::try_parse_from(["rulesmith-server", "--api-token", "cf-token-123"]).unwrap();

        let mut config = ServerConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.model.api_token, "cf-token-123");
    }

    #[test]
    fn cli_db_path_override() {
        let cli =
            Cli::try_parse_from(["rulesmith-server", "--db-path", "/var/lib/rules.db"]).unwrap();

        let mut config = ServerConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.history.path, PathBuf::from("/var/lib/rules.db"));
    }
}
