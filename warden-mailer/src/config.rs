use crate::transports::TlsConfig;
use crate::{FileTransport, Mailer, MailerError, SendmailTransport, SmtpTransport};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Selects and configures the transport used to deliver notification mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailerConfig {
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    Smtp {
        host: String,
        port: Option<u16>,
        username: Option<String>,
        password: Option<String>,
        tls: Option<TlsType>,
    },
    File {
        output_dir: PathBuf,
    },
    Sendmail {
        command: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsType {
    None,
    StartTls,
    Tls,
}

impl From<TlsType> for TlsConfig {
    fn from(tls_type: TlsType) -> Self {
        match tls_type {
            TlsType::None => TlsConfig::None,
            TlsType::StartTls => TlsConfig::StartTls,
            TlsType::Tls => TlsConfig::Tls,
        }
    }
}

impl std::str::FromStr for TlsType {
    type Err = MailerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TlsType::None),
            "starttls" => Ok(TlsType::StartTls),
            "tls" => Ok(TlsType::Tls),
            other => Err(MailerError::Config(format!("unknown TLS mode '{other}'"))),
        }
    }
}

impl MailerConfig {
    /// Reads the transport from `MAILER_*` environment variables.
    ///
    /// SMTP wins over the file transport, which wins over sendmail. With nothing set,
    /// mail is written to `./emails`.
    pub fn from_env() -> Result<Self, MailerError> {
        let transport = if let Ok(smtp_host) = std::env::var("MAILER_SMTP_HOST") {
            let port = match std::env::var("MAILER_SMTP_PORT") {
                Ok(port) => Some(port.parse().map_err(|_| {
                    MailerError::Config(format!("invalid MAILER_SMTP_PORT '{port}'"))
                })?),
                Err(_) => None,
            };
            let tls = match std::env::var("MAILER_SMTP_TLS") {
                Ok(tls) => Some(tls.parse()?),
                Err(_) => None,
            };

            TransportConfig::Smtp {
                host: smtp_host,
                port,
                username: std::env::var("MAILER_SMTP_USERNAME").ok(),
                password: std::env::var("MAILER_SMTP_PASSWORD").ok(),
                tls,
            }
        } else if let Ok(output_dir) = std::env::var("MAILER_FILE_OUTPUT_DIR") {
            TransportConfig::File {
                output_dir: PathBuf::from(output_dir),
            }
        } else if std::env::var("MAILER_SENDMAIL").is_ok() {
            TransportConfig::Sendmail {
                command: std::env::var("MAILER_SENDMAIL_COMMAND").ok(),
            }
        } else {
            TransportConfig::File {
                output_dir: PathBuf::from("./emails"),
            }
        };

        Ok(Self { transport })
    }

    /// Builds the configured transport.
    ///
    /// An SMTP transport must be built from within a Tokio runtime, see
    /// [`SmtpTransportBuilder::build`](crate::transports::SmtpTransportBuilder::build).
    pub fn build_transport(&self) -> Result<Box<dyn Mailer>, MailerError> {
        match &self.transport {
            TransportConfig::Smtp {
                host,
                port,
                username,
                password,
                tls,
            } => {
                let mut builder = SmtpTransport::builder(host);

                if let Some(port) = port {
                    builder = builder.port(*port);
                }

                match (username, password) {
                    (Some(username), Some(password)) => {
                        builder = builder.credentials(username, password);
                    }
                    (Some(_), None) | (None, Some(_)) => {
                        return Err(MailerError::Config(
                            "SMTP username and password must be set together".to_string(),
                        ));
                    }
                    (None, None) => {}
                }

                if let Some(tls) = tls {
                    builder = builder.tls((*tls).into());
                }

                Ok(Box::new(builder.build()?))
            }
            TransportConfig::File { output_dir } => Ok(Box::new(FileTransport::new(output_dir)?)),
            TransportConfig::Sendmail { command } => match command {
                Some(command) => Ok(Box::new(SendmailTransport::with_command(command))),
                None => Ok(Box::new(SendmailTransport::new())),
            },
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::File {
                output_dir: PathBuf::from("./emails"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MailerConfig::default();

        match config.transport {
            TransportConfig::File { output_dir } => {
                assert_eq!(output_dir, PathBuf::from("./emails"));
            }
            _ => panic!("Expected file transport"),
        }
    }

    #[test]
    fn test_deserialize_smtp_config() {
        let config: MailerConfig = serde_json::from_str(
            r#"{
                "transport": {
                    "type": "smtp",
                    "host": "smtp.example.com",
                    "port": 465,
                    "username": "alerts",
                    "password": "secret",
                    "tls": "tls"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.transport,
            TransportConfig::Smtp {
                host: "smtp.example.com".to_string(),
                port: Some(465),
                username: Some("alerts".to_string()),
                password: Some("secret".to_string()),
                tls: Some(TlsType::Tls),
            }
        );
    }

    #[test]
    fn test_tls_type_from_str() {
        assert_eq!("STARTTLS".parse::<TlsType>().unwrap(), TlsType::StartTls);
        assert_eq!("none".parse::<TlsType>().unwrap(), TlsType::None);
        assert!("ssl".parse::<TlsType>().is_err());
    }

    #[test]
    fn test_build_file_transport() {
        let dir = tempfile::tempdir().unwrap();
        let config = MailerConfig {
            transport: TransportConfig::File {
                output_dir: dir.path().to_path_buf(),
            },
        };
        assert!(config.build_transport().is_ok());
    }

    #[tokio::test]
    async fn test_build_smtp_transport() {
        let config = MailerConfig {
            transport: TransportConfig::Smtp {
                host: "localhost".to_string(),
                port: Some(1025),
                username: None,
                password: None,
                tls: Some(TlsType::None),
            },
        };

        assert!(config.build_transport().is_ok());
    }

    #[test]
    fn test_partial_smtp_credentials_rejected() {
        let config = MailerConfig {
            transport: TransportConfig::Smtp {
                host: "localhost".to_string(),
                port: None,
                username: Some("alerts".to_string()),
                password: None,
                tls: Some(TlsType::None),
            },
        };

        assert!(matches!(
            config.build_transport(),
            Err(MailerError::Config(_))
        ));
    }
}
