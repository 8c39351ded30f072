use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Account not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Invalid notification message: {0}")]
    InvalidMessage(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing configuration: {0}")]
    Missing(String),
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event handler error: {0}")]
    HandlerError(String),
}

impl Error {
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound(_)))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let storage_error = Error::Storage(StorageError::NotFound("alice".to_string()));
        assert_eq!(
            storage_error.to_string(),
            "Storage error: Account not found: alice"
        );

        let config_error = Error::Config(ConfigError::InvalidValue {
            key: "WARDEN_FAILED_ATTEMPTS_THRESHOLD".to_string(),
            value: "five".to_string(),
        });
        assert_eq!(
            config_error.to_string(),
            "Configuration error: Invalid value for WARDEN_FAILED_ATTEMPTS_THRESHOLD: five"
        );

        assert_eq!(
            NotificationError::Transport("connection refused".to_string()).to_string(),
            "Mail transport failed: connection refused"
        );
    }

    #[test]
    fn test_error_classification() {
        let not_found: Error = StorageError::NotFound("bob".to_string()).into();
        assert!(not_found.is_storage_error());
        assert!(not_found.is_not_found());
        assert!(!not_found.is_config_error());

        let database: Error = StorageError::Database("timeout".to_string()).into();
        assert!(database.is_storage_error());
        assert!(!database.is_not_found());

        let config: Error = ConfigError::Missing("notificationMail.to".to_string()).into();
        assert!(config.is_config_error());
    }
}
